//! Completion client: one system prompt plus one user message in, text out.
//!
//! Every generation step goes through [`CompletionClient::complete`], which
//! pins the sampling temperature, wraps the call in a `gen_ai.complete`
//! span, and folds provider failures into the [`WizardError`] categories
//! the front ends know how to explain.

use tracing::{Instrument, debug, info_span, warn};

use builderschool_types::error::WizardError;
use builderschool_types::llm::{CompletionRequest, LlmError, StopReason};

use super::box_provider::BoxLlmProvider;

/// Sampling temperature shared by every generation step.
pub const TEMPERATURE: f64 = 0.7;

/// Thin wrapper pairing a provider with the model it should be asked for.
pub struct CompletionClient {
    provider: BoxLlmProvider,
    model: String,
}

impl CompletionClient {
    pub fn new(provider: BoxLlmProvider, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Send `system` + `user` and return the model's text.
    ///
    /// No retry: the first failure is classified and returned.
    pub async fn complete(
        &self,
        operation: &'static str,
        system: &str,
        user: &str,
        max_tokens: u32,
    ) -> Result<String, WizardError> {
        let request = CompletionRequest {
            model: self.model.clone(),
            system: system.to_string(),
            prompt: user.to_string(),
            max_tokens,
            temperature: TEMPERATURE,
        };

        let span = info_span!(
            "gen_ai.complete",
            gen_ai.system = self.provider.name(),
            gen_ai.operation.name = operation,
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = max_tokens,
            gen_ai.request.temperature = TEMPERATURE,
        );

        let response = self
            .provider
            .complete(&request)
            .instrument(span)
            .await
            .map_err(|err| {
                warn!(operation, error = %err, "completion failed");
                classify_llm_error(err)
            })?;

        debug!(
            operation,
            gen_ai.usage.input_tokens = response.usage.input_tokens,
            gen_ai.usage.output_tokens = response.usage.output_tokens,
            gen_ai.response.finish_reasons = %response.stop_reason,
            "completion finished"
        );
        if response.stop_reason == StopReason::MaxTokens {
            warn!(operation, max_tokens, "completion hit the token budget; output may be truncated");
        }

        Ok(response.content)
    }
}

/// Map a provider error onto the student-facing categories.
///
/// Typed variants map directly. Untyped provider messages fall back to
/// keyword matching on the lowercased text, checked in order auth, rate
/// limit, availability.
pub fn classify_llm_error(err: LlmError) -> WizardError {
    match err {
        LlmError::AuthenticationFailed => WizardError::Auth(err.to_string()),
        LlmError::RateLimited(_) => WizardError::RateLimited(err.to_string()),
        LlmError::Overloaded(msg) => WizardError::ServiceUnavailable(msg),
        LlmError::Provider { message } => classify_message(message),
        LlmError::Deserialization(_) | LlmError::InvalidRequest(_) => {
            WizardError::Unknown(err.to_string())
        }
    }
}

const AUTH_MARKERS: [&str; 4] = ["401", "invalid", "api key", "auth"];
const RATE_MARKERS: [&str; 3] = ["429", "rate", "quota"];
const UNAVAILABLE_MARKERS: [&str; 2] = ["503", "unavailable"];

fn classify_message(message: String) -> WizardError {
    let lower = message.to_lowercase();
    let has = |markers: &[&str]| markers.iter().any(|m| lower.contains(m));

    if has(&AUTH_MARKERS) {
        WizardError::Auth(message)
    } else if has(&RATE_MARKERS) {
        WizardError::RateLimited(message)
    } else if has(&UNAVAILABLE_MARKERS) {
        WizardError::ServiceUnavailable(message)
    } else {
        WizardError::Unknown(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedLlmProvider;

    fn provider_error(message: &str) -> LlmError {
        LlmError::Provider {
            message: message.to_string(),
        }
    }

    #[test]
    fn typed_errors_map_directly() {
        assert!(matches!(
            classify_llm_error(LlmError::AuthenticationFailed),
            WizardError::Auth(_)
        ));
        assert!(matches!(
            classify_llm_error(LlmError::RateLimited("slow down".into())),
            WizardError::RateLimited(_)
        ));
        assert!(matches!(
            classify_llm_error(LlmError::Overloaded("busy".into())),
            WizardError::ServiceUnavailable(_)
        ));
        assert!(matches!(
            classify_llm_error(LlmError::InvalidRequest("invalid max_tokens".into())),
            WizardError::Unknown(_)
        ));
    }

    #[test]
    fn provider_messages_use_keyword_heuristics() {
        assert!(matches!(
            classify_llm_error(provider_error("HTTP 401 Unauthorized")),
            WizardError::Auth(_)
        ));
        assert!(matches!(
            classify_llm_error(provider_error("Invalid API Key provided")),
            WizardError::Auth(_)
        ));
        assert!(matches!(
            classify_llm_error(provider_error("429 Too Many Requests")),
            WizardError::RateLimited(_)
        ));
        assert!(matches!(
            classify_llm_error(provider_error("monthly quota exceeded")),
            WizardError::RateLimited(_)
        ));
        assert!(matches!(
            classify_llm_error(provider_error("503 Service Unavailable")),
            WizardError::ServiceUnavailable(_)
        ));
        match classify_llm_error(provider_error("connection reset by peer")) {
            WizardError::Unknown(msg) => assert_eq!(msg, "connection reset by peer"),
            other => panic!("expected Unknown, got {other:?}"),
        }
    }

    #[test]
    fn auth_markers_take_precedence() {
        // Both an auth and a rate marker: auth is checked first.
        assert!(matches!(
            classify_llm_error(provider_error("invalid rate plan")),
            WizardError::Auth(_)
        ));
    }

    #[tokio::test]
    async fn complete_sends_system_user_and_fixed_temperature() {
        let provider = ScriptedLlmProvider::new();
        provider.push_text("hello");
        let client = CompletionClient::new(BoxLlmProvider::new(provider.clone()), "test-model");

        let text = client
            .complete("refine_idea", "be brief", "Idea: x", 1200)
            .await
            .unwrap();
        assert_eq!(text, "hello");

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.model, "test-model");
        assert_eq!(request.system, "be brief");
        assert_eq!(request.prompt, "Idea: x");
        assert_eq!(request.max_tokens, 1200);
        assert_eq!(request.temperature, TEMPERATURE);
    }

    #[tokio::test]
    async fn complete_classifies_failures() {
        let provider = ScriptedLlmProvider::new();
        provider.push_error(LlmError::AuthenticationFailed);
        let client = CompletionClient::new(BoxLlmProvider::new(provider), "test-model");

        let err = client.complete("refine_idea", "s", "u", 10).await.unwrap_err();
        assert!(matches!(err, WizardError::Auth(_)));
    }
}
