// Resume evaluation: PDF text → structured resume → ATS score against a JD.
// All model calls go through llm_client.

pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod scorer;
pub mod structurer;
