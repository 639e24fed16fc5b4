//! Business logic for Builder School.
//!
//! Defines the provider port (`LlmProvider`) that `builderschool-infra`
//! implements, the generation templates, and the wizard state machine.
//! Depends only on `builderschool-types` and `builderschool-observe`, never
//! on an HTTP client.

pub mod extract;
pub mod generation;
pub mod llm;
pub mod wizard;

#[cfg(test)]
pub(crate) mod test_support;
