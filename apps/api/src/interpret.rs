//! Interpretation of raw model output.
//!
//! When structured output was requested the text is parsed as JSON; a parse
//! failure degrades to an error-shaped document that still carries the raw
//! text, so the caller always receives something renderable.

use serde_json::{json, Value};
use tracing::warn;

/// Turns raw generated text into the response document.
///
/// Never fails: a structured response that does not parse comes back as
/// `{"error": ..., "raw": <text verbatim>}`.
pub fn interpret(raw: &str, structured: bool) -> Value {
    if !structured {
        return Value::String(raw.to_string());
    }

    let candidate = strip_json_fences(raw);
    match serde_json::from_str::<Value>(candidate) {
        Ok(document) => document,
        Err(e) => {
            warn!("Structured output did not parse as JSON: {e}");
            json!({
                "error": "The generated response could not be parsed as a structured document",
                "raw": raw,
            })
        }
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
