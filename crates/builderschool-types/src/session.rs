//! The single mutable wizard session record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::plan::{ImprovedBlueprint, PrototypeArtifact, ReadinessScore, Refinement};
use crate::wizard::{IdeaInput, Stage};

/// Everything accumulated during one run of the wizard.
///
/// Fields further down the list are derived from the ones above them and
/// stay `None` (or empty) until their prerequisites exist. Mutation goes
/// through the session extension trait in `builderschool-core`, which keeps
/// the downstream-clearing rules in one place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardSession {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub stage: Stage,
    pub input: Option<IdeaInput>,
    pub refinement: Option<Refinement>,
    pub mentor_questions: Option<Vec<String>>,
    /// Index-aligned with `mentor_questions`; always the same length as
    /// `mentor_responses`.
    pub mentor_answers: Vec<String>,
    pub mentor_responses: Vec<String>,
    pub readiness_score: Option<ReadinessScore>,
    pub improved_blueprint: Option<ImprovedBlueprint>,
    pub prototype: Option<PrototypeArtifact>,
}

impl WizardSession {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::now_v7(),
            started_at: Utc::now(),
            stage: Stage::IdeaInput,
            input: None,
            refinement: None,
            mentor_questions: None,
            mentor_answers: Vec::new(),
            mentor_responses: Vec::new(),
            readiness_score: None,
            improved_blueprint: None,
            prototype: None,
        }
    }

    /// Index of the next unanswered mentor question.
    pub fn current_question_index(&self) -> usize {
        self.mentor_answers.len()
    }

    /// The mentor question awaiting an answer, if any.
    pub fn current_question(&self) -> Option<&str> {
        self.mentor_questions
            .as_ref()
            .and_then(|qs| qs.get(self.current_question_index()))
            .map(String::as_str)
    }

    /// True once every generated mentor question has an answer.
    pub fn all_questions_answered(&self) -> bool {
        match &self.mentor_questions {
            Some(qs) => !qs.is_empty() && self.current_question_index() >= qs.len(),
            None => false,
        }
    }
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_starts_empty_at_stage_one() {
        let session = WizardSession::new();
        assert_eq!(session.stage, Stage::IdeaInput);
        assert!(session.input.is_none());
        assert!(session.refinement.is_none());
        assert_eq!(session.current_question_index(), 0);
        assert!(session.current_question().is_none());
        assert!(!session.all_questions_answered());
    }

    #[test]
    fn current_question_tracks_answers() {
        let mut session = WizardSession::new();
        session.mentor_questions = Some(vec!["a?".into(), "b?".into(), "c?".into()]);
        assert_eq!(session.current_question(), Some("a?"));

        session.mentor_answers.push("x".into());
        session.mentor_responses.push("fb".into());
        assert_eq!(session.current_question_index(), 1);
        assert_eq!(session.current_question(), Some("b?"));

        session.mentor_answers.extend(["y".into(), "z".into()]);
        assert!(session.all_questions_answered());
        assert!(session.current_question().is_none());
    }

    #[test]
    fn session_ids_are_unique() {
        let a = WizardSession::new();
        let b = WizardSession::new();
        assert_ne!(a.session_id, b.session_id);
    }
}
