//! OpenAI-compatible chat provider.
//!
//! One [`OpenAiCompatibleProvider`] serves Groq (the default), OpenAI, and
//! any other endpoint that speaks the chat completions protocol, selected
//! by base URL. Uses [`async_openai`] for request/response types.

pub mod config;

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest, FinishReason,
};
use secrecy::ExposeSecret;
use tracing::{debug, warn};

use builderschool_core::llm::provider::LlmProvider;
use builderschool_types::llm::{CompletionRequest, CompletionResponse, LlmError, StopReason, Usage};

use self::config::OpenAiCompatConfig;

/// Provider for any OpenAI-compatible chat completions API.
///
/// Does not derive `Debug`: the `async_openai::Client` holds the API key.
pub struct OpenAiCompatibleProvider {
    client: Client<OpenAIConfig>,
    provider_name: String,
    model: String,
    max_output_tokens: u32,
}

impl OpenAiCompatibleProvider {
    pub fn new(config: OpenAiCompatConfig) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.api_key.expose_secret())
            .with_api_base(&config.base_url);

        debug!(
            provider = %config.provider_name,
            base_url = %config.base_url,
            model = %config.model,
            "configured chat provider"
        );

        Self {
            client: Client::with_config(openai_config),
            provider_name: config.provider_name,
            model: config.model,
            max_output_tokens: config.max_output_tokens,
        }
    }

    /// Build a [`CreateChatCompletionRequest`] from a generic [`CompletionRequest`].
    ///
    /// The token budget is capped at what the endpoint accepts.
    fn build_request(&self, request: &CompletionRequest) -> CreateChatCompletionRequest {
        let messages = vec![
            ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                content: ChatCompletionRequestSystemMessageContent::Text(request.system.clone()),
                name: None,
            }),
            ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                content: ChatCompletionRequestUserMessageContent::Text(request.prompt.clone()),
                name: None,
            }),
        ];

        let model = if request.model.is_empty() {
            self.model.clone()
        } else {
            request.model.clone()
        };

        let max_tokens = if request.max_tokens > self.max_output_tokens {
            warn!(
                provider = %self.provider_name,
                requested = request.max_tokens,
                limit = self.max_output_tokens,
                "token budget exceeds the provider limit; capping"
            );
            self.max_output_tokens
        } else {
            request.max_tokens
        };

        CreateChatCompletionRequest {
            model,
            messages,
            max_completion_tokens: Some(max_tokens),
            temperature: Some(request.temperature as f32),
            ..Default::default()
        }
    }
}

impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.provider_name
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let oai_request = self.build_request(request);

        let response = self
            .client
            .chat()
            .create(oai_request)
            .await
            .map_err(map_openai_error)?;

        let first = response.choices.first();
        let content = first
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        let stop_reason = first
            .and_then(|c| c.finish_reason.as_ref())
            .map(|fr| match fr {
                FinishReason::Length => StopReason::MaxTokens,
                FinishReason::ContentFilter => StopReason::ContentFilter,
                FinishReason::Stop | FinishReason::ToolCalls | FinishReason::FunctionCall => {
                    StopReason::EndTurn
                }
            })
            .unwrap_or(StopReason::EndTurn);

        let usage = response
            .usage
            .map(|u| Usage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            id: response.id,
            content,
            model: response.model,
            stop_reason,
            usage,
        })
    }
}

/// Map an `async_openai::error::OpenAIError` to an [`LlmError`].
///
/// Structured codes and HTTP statuses become typed variants; anything else
/// is passed on as `Provider` with the full message for keyword matching.
fn map_openai_error(err: async_openai::error::OpenAIError) -> LlmError {
    use async_openai::error::OpenAIError;

    match &err {
        OpenAIError::ApiError(api_err) => {
            let code = api_err.code.as_deref().unwrap_or("");
            let error_type = api_err.r#type.as_deref().unwrap_or("");

            if code == "invalid_api_key"
                || code == "authentication_error"
                || error_type == "authentication_error"
                || api_err.message.contains("Incorrect API key")
                || api_err.message.contains("Invalid API Key")
                || api_err.message.contains("Invalid API key")
            {
                LlmError::AuthenticationFailed
            } else if code == "rate_limit_exceeded" || error_type == "rate_limit_error" {
                LlmError::RateLimited(api_err.message.clone())
            } else if code == "server_error"
                || code == "service_unavailable"
                || error_type == "overloaded_error"
            {
                LlmError::Overloaded(api_err.message.clone())
            } else {
                LlmError::Provider {
                    message: err.to_string(),
                }
            }
        }
        OpenAIError::Reqwest(reqwest_err) => match reqwest_err.status().map(|s| s.as_u16()) {
            Some(401 | 403) => LlmError::AuthenticationFailed,
            Some(429) => LlmError::RateLimited(err.to_string()),
            Some(503 | 529) => LlmError::Overloaded(err.to_string()),
            _ => LlmError::Provider {
                message: err.to_string(),
            },
        },
        OpenAIError::JSONDeserialize(_, content) => {
            LlmError::Deserialization(format!("failed to parse response: {content}"))
        }
        OpenAIError::InvalidArgument(msg) => LlmError::InvalidRequest(msg.clone()),
        _ => LlmError::Provider {
            message: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use builderschool_types::config::AppConfig;
    use secrecy::SecretString;

    use super::config::from_app_config;

    fn provider_for(app: &AppConfig) -> OpenAiCompatibleProvider {
        OpenAiCompatibleProvider::new(from_app_config(app, SecretString::from("gsk-test".to_string())))
    }

    fn groq() -> OpenAiCompatibleProvider {
        provider_for(&AppConfig::default())
    }

    fn request(model: &str, max_tokens: u32) -> CompletionRequest {
        CompletionRequest {
            model: model.to_string(),
            system: "Return JSON".to_string(),
            prompt: "Idea: tutor app".to_string(),
            max_tokens,
            temperature: 0.7,
        }
    }

    #[test]
    fn default_config_is_groq() {
        let provider = groq();
        assert_eq!(provider.name(), "groq");
        assert_eq!(provider.model, "llama-3.3-70b-versatile");
        assert_eq!(provider.max_output_tokens, 32_768);
    }

    #[test]
    fn build_request_puts_system_first() {
        let oai_req = groq().build_request(&request("llama-3.3-70b-versatile", 1200));

        assert_eq!(oai_req.messages.len(), 2);
        assert!(matches!(oai_req.messages[0], ChatCompletionRequestMessage::System(_)));
        assert!(matches!(oai_req.messages[1], ChatCompletionRequestMessage::User(_)));
        assert_eq!(oai_req.max_completion_tokens, Some(1200));
        assert_eq!(oai_req.temperature, Some(0.7));
        assert!(oai_req.stream.is_none());
    }

    #[test]
    fn build_request_empty_model_uses_default() {
        let oai_req = groq().build_request(&request("", 1200));
        assert_eq!(oai_req.model, "llama-3.3-70b-versatile");
    }

    #[test]
    fn build_request_caps_budget_at_provider_limit() {
        let app = AppConfig {
            provider_name: "local".to_string(),
            base_url: "http://localhost:11434/v1".to_string(),
            ..AppConfig::default()
        };
        let provider = provider_for(&app);

        let oai_req = provider.build_request(&request("", 3500));
        assert_eq!(oai_req.max_completion_tokens, Some(3500));

        let oai_req = provider.build_request(&request("", 9000));
        assert_eq!(oai_req.max_completion_tokens, Some(4_096));
    }

    #[test]
    fn map_openai_error_invalid_key() {
        use async_openai::error::{ApiError, OpenAIError};
        let api_err = ApiError {
            message: "Invalid API Key".to_string(),
            r#type: Some("invalid_request_error".to_string()),
            param: None,
            code: Some("invalid_api_key".to_string()),
        };
        let err = map_openai_error(OpenAIError::ApiError(api_err));
        assert!(matches!(err, LlmError::AuthenticationFailed));
    }

    #[test]
    fn map_openai_error_rate_limit() {
        use async_openai::error::{ApiError, OpenAIError};
        let api_err = ApiError {
            message: "Rate limit reached for model".to_string(),
            r#type: Some("tokens".to_string()),
            param: None,
            code: Some("rate_limit_exceeded".to_string()),
        };
        let err = map_openai_error(OpenAIError::ApiError(api_err));
        match err {
            LlmError::RateLimited(message) => assert!(message.contains("Rate limit reached")),
            other => panic!("expected RateLimited, got {other:?}"),
        }
    }

    #[test]
    fn map_openai_error_unknown_code_keeps_message() {
        use async_openai::error::{ApiError, OpenAIError};
        let api_err = ApiError {
            message: "model is decommissioned".to_string(),
            r#type: Some("invalid_request_error".to_string()),
            param: None,
            code: Some("model_decommissioned".to_string()),
        };
        match map_openai_error(OpenAIError::ApiError(api_err)) {
            LlmError::Provider { message } => assert!(message.contains("decommissioned")),
            other => panic!("expected Provider, got {other:?}"),
        }
    }

    #[test]
    fn map_openai_error_invalid_argument() {
        use async_openai::error::OpenAIError;
        let err = map_openai_error(OpenAIError::InvalidArgument("bad arg".to_string()));
        assert!(matches!(err, LlmError::InvalidRequest(_)));
    }
}
