//! Structured generation: prompt templates and the one procedure that runs
//! them.
//!
//! Each template is a small struct borrowing the session data it needs. It
//! supplies a system prompt, a user message, a token budget and a parser;
//! [`generate`] runs complete -> parse and turns a parse failure into
//! [`WizardError::MalformedOutput`] carrying the raw text.

pub mod evaluation;
pub mod mentor;
pub mod prototype;
pub mod refine;

use serde::de::DeserializeOwned;
use tracing::warn;

use builderschool_types::error::WizardError;

use crate::extract::extract_json;
use crate::llm::client::CompletionClient;

pub use evaluation::{BlueprintPrompt, ReadinessScorePrompt};
pub use mentor::{MentorFeedbackPrompt, MentorQuestionsPrompt};
pub use prototype::{PrototypeArtifactExt, PrototypePrompt, split_sections};
pub use refine::RefinePrompt;

/// A prompt/parser pair for one generation step.
pub trait GenerationTemplate {
    type Output;

    /// Operation name used in spans and error messages.
    const OPERATION: &'static str;

    /// Output token budget for the call.
    const MAX_TOKENS: u32;

    fn system_prompt(&self) -> String;

    fn user_message(&self) -> String;

    /// Turn raw model text into the output, or explain why it can't.
    fn parse(&self, raw: &str) -> Result<Self::Output, String>;
}

/// Run a template against the completion client.
pub async fn generate<T: GenerationTemplate>(
    client: &CompletionClient,
    template: &T,
) -> Result<T::Output, WizardError> {
    let raw = client
        .complete(
            T::OPERATION,
            &template.system_prompt(),
            &template.user_message(),
            T::MAX_TOKENS,
        )
        .await?;

    template.parse(&raw).map_err(|reason| {
        warn!(operation = T::OPERATION, %reason, raw_len = raw.len(), "model output rejected");
        WizardError::MalformedOutput {
            operation: T::OPERATION,
            reason,
            raw,
        }
    })
}

/// Extract the JSON span from `raw` and deserialize it.
pub(crate) fn parse_json<T: DeserializeOwned>(raw: &str) -> Result<T, String> {
    serde_json::from_str(&extract_json(raw)).map_err(|e| format!("invalid JSON: {e}"))
}

pub(crate) fn require_text(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("`{field}` is empty"))
    } else {
        Ok(())
    }
}

/// Exactly `expected` entries, none blank.
pub(crate) fn require_items(field: &str, items: &[String], expected: usize) -> Result<(), String> {
    if items.len() != expected {
        return Err(format!(
            "`{field}` has {} entries, expected {expected}",
            items.len()
        ));
    }
    for (i, item) in items.iter().enumerate() {
        require_text(&format!("{field}[{i}]"), item)?;
    }
    Ok(())
}

/// Bullet-free comma list used by several user messages.
pub(crate) fn join_features(features: &[String]) -> String {
    features.join(", ")
}

/// Numbered answer/feedback history, one block per answered question.
pub(crate) fn answer_history(answers: &[String], responses: &[String]) -> String {
    answers
        .iter()
        .zip(responses)
        .enumerate()
        .map(|(i, (answer, feedback))| {
            format!("Q{} Answer: {answer}\nMentor Feedback: {feedback}\n\n", i + 1)
        })
        .collect()
}
