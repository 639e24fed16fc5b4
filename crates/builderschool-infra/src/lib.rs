//! Infrastructure layer for Builder School.
//!
//! Concrete adapters behind the ports in `builderschool-core`: the
//! OpenAI-compatible chat provider, the `config.toml` loader, and API key
//! resolution.

pub mod config;
pub mod llm;
pub mod secret;
