//! LLM provider implementations.
//!
//! [`build_provider`] turns the loaded [`AppConfig`] and a resolved key into
//! the type-erased provider the wizard runs on.

pub mod openai_compat;

use secrecy::SecretString;

use builderschool_core::llm::box_provider::BoxLlmProvider;
use builderschool_types::config::AppConfig;

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::from_app_config;

/// Create a [`BoxLlmProvider`] for the configured endpoint.
pub fn build_provider(config: &AppConfig, api_key: SecretString) -> BoxLlmProvider {
    BoxLlmProvider::new(OpenAiCompatibleProvider::new(from_app_config(config, api_key)))
}
