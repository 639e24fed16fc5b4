//! Session transition rules.
//!
//! `WizardSession` lives in `builderschool-types`; this module adds an
//! extension trait (`WizardSessionExt`) that owns every rule about which
//! actions are legal where and what each one clears. Commit methods take
//! already-generated data, so a failed generation never reaches them and
//! the session stays exactly as it was.

use builderschool_types::error::WizardError;
use builderschool_types::plan::{
    ImprovedBlueprint, MENTOR_QUESTION_COUNT, PrototypeArtifact, ReadinessScore, Refinement,
};
use builderschool_types::session::WizardSession;
use builderschool_types::wizard::{IdeaInput, Stage, WizardAction};

/// Lifecycle management for `WizardSession`.
pub trait WizardSessionExt {
    /// Actions legal in the current state, in button order.
    fn available_actions(&self) -> Vec<WizardAction>;

    /// `Ok` if `action` is legal now, `InvalidTransition` otherwise.
    fn ensure_action(&self, action: WizardAction) -> Result<(), WizardError>;

    /// Null out every field derived at or after `stage`.
    ///
    /// `Stage::IdeaInput` also drops the input itself.
    fn clear_from(&mut self, stage: Stage);

    /// 1 -> 2 with a fresh refinement.
    fn commit_idea(&mut self, input: IdeaInput, refinement: Refinement);

    /// 2 -> 3 with a fresh question set.
    fn commit_mentor_questions(&mut self, questions: Vec<String>);

    /// Append one answer together with its feedback.
    fn commit_answer(&mut self, answer: String, feedback: String);

    /// Stay at 3 with no answers.
    fn restart_qa(&mut self);

    /// 3 -> 2, keeping everything.
    fn back_to_refinement(&mut self);

    /// 3 -> 4 with a fresh score and blueprint.
    fn commit_evaluation(&mut self, score: ReadinessScore, blueprint: ImprovedBlueprint);

    /// 4 -> 3, keeping everything.
    fn back_to_mentor(&mut self);

    /// 4 -> 5 with a fresh prototype.
    fn commit_prototype(&mut self, prototype: PrototypeArtifact);

    /// Back to an empty stage 1 under a new session id.
    fn full_reset(&mut self);
}

impl WizardSessionExt for WizardSession {
    fn available_actions(&self) -> Vec<WizardAction> {
        match self.stage {
            Stage::IdeaInput => vec![WizardAction::SubmitIdea],
            Stage::Refinement => vec![WizardAction::StartMentorSession, WizardAction::ChangeIdea],
            Stage::MentorSession => {
                let mut actions = Vec::with_capacity(3);
                if self.all_questions_answered() {
                    actions.push(WizardAction::SeeEvaluation);
                } else {
                    actions.push(WizardAction::AnswerQuestion);
                }
                actions.push(WizardAction::RestartQa);
                actions.push(WizardAction::BackToRefinement);
                actions
            }
            Stage::ScoreAndBlueprint => {
                vec![WizardAction::GeneratePrototype, WizardAction::BackToMentor]
            }
            Stage::Prototype => vec![WizardAction::StartOver],
        }
    }

    fn ensure_action(&self, action: WizardAction) -> Result<(), WizardError> {
        if self.available_actions().contains(&action) {
            Ok(())
        } else {
            Err(WizardError::InvalidTransition {
                action,
                stage: self.stage,
            })
        }
    }

    fn clear_from(&mut self, stage: Stage) {
        // Fall through from the earliest stage down to the prototype.
        if stage <= Stage::IdeaInput {
            self.input = None;
        }
        if stage <= Stage::Refinement {
            self.refinement = None;
        }
        if stage <= Stage::MentorSession {
            self.mentor_questions = None;
            self.mentor_answers.clear();
            self.mentor_responses.clear();
        }
        if stage <= Stage::ScoreAndBlueprint {
            self.readiness_score = None;
            self.improved_blueprint = None;
        }
        self.prototype = None;
    }

    fn commit_idea(&mut self, input: IdeaInput, refinement: Refinement) {
        self.clear_from(Stage::Refinement);
        self.input = Some(input);
        self.refinement = Some(refinement);
        self.stage = Stage::Refinement;
    }

    fn commit_mentor_questions(&mut self, questions: Vec<String>) {
        self.clear_from(Stage::MentorSession);
        self.mentor_questions = Some(questions);
        self.stage = Stage::MentorSession;
    }

    fn commit_answer(&mut self, answer: String, feedback: String) {
        debug_assert!(self.current_question_index() < MENTOR_QUESTION_COUNT);
        self.mentor_answers.push(answer);
        self.mentor_responses.push(feedback);
    }

    fn restart_qa(&mut self) {
        self.mentor_answers.clear();
        self.mentor_responses.clear();
        self.clear_from(Stage::ScoreAndBlueprint);
    }

    fn back_to_refinement(&mut self) {
        self.stage = Stage::Refinement;
    }

    fn commit_evaluation(&mut self, score: ReadinessScore, blueprint: ImprovedBlueprint) {
        self.clear_from(Stage::ScoreAndBlueprint);
        self.readiness_score = Some(score);
        self.improved_blueprint = Some(blueprint);
        self.stage = Stage::ScoreAndBlueprint;
    }

    fn back_to_mentor(&mut self) {
        self.stage = Stage::MentorSession;
    }

    fn commit_prototype(&mut self, prototype: PrototypeArtifact) {
        self.prototype = Some(prototype);
        self.stage = Stage::Prototype;
    }

    fn full_reset(&mut self) {
        *self = WizardSession::new();
    }
}
