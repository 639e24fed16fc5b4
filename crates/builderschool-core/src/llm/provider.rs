//! LlmProvider trait definition.
//!
//! The core abstraction every chat-completion backend implements. Uses
//! RPITIT for `complete`; [`super::box_provider::BoxLlmProvider`] supplies
//! dynamic dispatch on top.

use builderschool_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for LLM provider backends.
///
/// Implementations live in builderschool-infra (e.g.,
/// `OpenAiCompatibleProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "groq", "openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
