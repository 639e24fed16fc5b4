//! Observability for Builder School: subscriber setup and GenAI span
//! vocabulary.

pub mod genai_attrs;
pub mod tracing_setup;
