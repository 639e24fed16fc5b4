//! Configuration types for Builder School.
//!
//! `AppConfig` mirrors `config.toml`. Every field has a default, so an empty
//! or missing file yields a working Groq setup.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Provider label used in logs and spans.
    #[serde(default = "default_provider_name")]
    pub provider_name: String,

    /// Base URL of the OpenAI-compatible endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Chat model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// Environment variable consulted when no key is given explicitly.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_provider_name() -> String {
    "groq".to_string()
}

fn default_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_api_key_env() -> String {
    "GROQ_API_KEY".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider_name: default_provider_name(),
            base_url: default_base_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            server: ServerConfig::default(),
        }
    }
}

/// Bind address for `serve`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}
