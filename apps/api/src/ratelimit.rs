//! Per-address rate limiting for the generation endpoints.
//!
//! One mutex-guarded map of recent admission times per client IP. The
//! admission check and the recording of a new hit happen inside the same
//! critical section; two concurrent requests can never both take the last
//! slot. State is in-process only and resets on restart.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};

use crate::errors::AppError;
use crate::state::AppState;

/// Quota applied to `POST /generate` and `POST /essay`.
pub const GENERATION_QUOTA: usize = 3;
pub const GENERATION_WINDOW: Duration = Duration::from_secs(60);

pub struct RateLimiter {
    quota: usize,
    window: Duration,
    hits: Mutex<HashMap<IpAddr, Vec<Instant>>>,
}

impl RateLimiter {
    pub fn new(quota: usize, window: Duration) -> Self {
        Self {
            quota,
            window,
            hits: Mutex::new(HashMap::new()),
        }
    }

    /// Admits the request and records it, or rejects it. Hits older than the
    /// window are pruned on every call, so the map stays bounded by traffic.
    pub fn try_acquire(&self, addr: IpAddr) -> bool {
        let now = Instant::now();
        let mut hits = self.hits.lock().expect("rate limiter mutex poisoned");

        let entry = hits.entry(addr).or_default();
        entry.retain(|t| now.duration_since(*t) < self.window);

        if entry.len() >= self.quota {
            return false;
        }
        entry.push(now);
        true
    }
}

/// Middleware for generation-triggering routes. Runs before authentication so
/// an over-quota caller costs no auth round-trip and no model call.
pub async fn enforce(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !state.limiter.try_acquire(addr.ip()) {
        return Err(AppError::RateLimited);
    }
    Ok(next.run(req).await)
}
