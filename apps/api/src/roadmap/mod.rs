// Roadmap generation: validated profile in, structured admissions plan out.
// All model calls go through llm_client; no direct API calls here.

pub mod handlers;
pub mod prompts;
