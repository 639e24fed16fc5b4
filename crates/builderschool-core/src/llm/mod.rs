//! LLM provider abstractions for Builder School.
//!
//! - `LlmProvider`: RPITIT trait for concrete provider implementations
//! - `BoxLlmProvider`: object-safe wrapper for dynamic dispatch
//! - `CompletionClient`: fixed-temperature completions with error classification

pub mod box_provider;
pub mod client;
pub mod provider;
