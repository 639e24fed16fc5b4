//! Shared domain types for Builder School.
//!
//! The wizard session, the generated plan artifacts, LLM request/response
//! shapes, configuration, and the error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod error;
pub mod export;
pub mod llm;
pub mod plan;
pub mod session;
pub mod wizard;
