//! Configuration for OpenAI-compatible endpoints.
//!
//! Everything comes from the user's `config.toml` via [`from_app_config`];
//! only the output-token ceiling is looked up per known provider.

use secrecy::SecretString;

use builderschool_types::config::AppConfig;

/// Configuration for an OpenAI-compatible LLM provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`]. No `Debug`:
/// the key must not end up in logs.
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "groq", "openai").
    pub provider_name: String,
    /// Base URL for the API, without a trailing slash.
    pub base_url: String,
    pub api_key: SecretString,
    /// Default model, used when a request leaves its model empty.
    pub model: String,
    /// Largest completion the endpoint accepts.
    pub max_output_tokens: u32,
}

/// Build from `config.toml`, trusting its base URL over any preset.
pub fn from_app_config(config: &AppConfig, api_key: SecretString) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: config.provider_name.clone(),
        base_url: config.base_url.trim_end_matches('/').to_string(),
        api_key,
        model: config.model.clone(),
        max_output_tokens: output_limit_for(&config.provider_name),
    }
}

fn output_limit_for(provider_name: &str) -> u32 {
    match provider_name {
        "groq" => 32_768,
        "openai" => 16_384,
        // Conservative for endpoints we know nothing about.
        _ => 4_096,
    }
}
