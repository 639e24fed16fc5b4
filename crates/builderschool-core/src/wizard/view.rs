//! Presentation model shared by the web UI and the terminal wizard.

use serde::Serialize;
use uuid::Uuid;

use builderschool_types::export::{MentorExchange, SessionExport};
use builderschool_types::plan::{
    ImprovedBlueprint, PrototypeSection, ReadinessScore, Refinement, ScoreBand,
};
use builderschool_types::session::WizardSession;
use builderschool_types::wizard::{IdeaInput, IdeaType, Stage, WizardAction};

use crate::generation::PrototypeArtifactExt;

use super::export::build_export;
use super::state::WizardSessionExt;

/// Where a step sits relative to the active one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Done,
    Current,
    Pending,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepView {
    pub stage: Stage,
    pub label: &'static str,
    pub status: StepStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionView {
    pub action: WizardAction,
    pub caption: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct MentorView {
    pub question_count: usize,
    pub current_question_index: usize,
    pub current_question: Option<String>,
    pub exchanges: Vec<MentorExchange>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DimensionView {
    pub label: &'static str,
    pub score: u8,
    pub band: ScoreBand,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationView {
    pub score: ReadinessScore,
    pub band: ScoreBand,
    pub dimensions: Vec<DimensionView>,
    pub blueprint: ImprovedBlueprint,
}

#[derive(Debug, Clone, Serialize)]
pub struct PrototypeView {
    pub idea_type: IdeaType,
    pub file_name: &'static str,
    pub language: &'static str,
    pub code: String,
    /// Populated for marketplace prototypes only.
    pub sections: Vec<PrototypeSection>,
    pub live_preview: bool,
    pub run_instructions: Option<&'static str>,
}

/// Everything a front end needs to draw the current step.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub stage: Stage,
    pub title: &'static str,
    pub progress: f32,
    pub steps: Vec<StepView>,
    pub available_actions: Vec<ActionView>,
    pub input: Option<IdeaInput>,
    pub refinement: Option<Refinement>,
    pub mentor: Option<MentorView>,
    pub evaluation: Option<EvaluationView>,
    pub prototype: Option<PrototypeView>,
    pub export: SessionExport,
}

pub fn step_status(step: Stage, current: Stage) -> StepStatus {
    if step < current {
        StepStatus::Done
    } else if step == current {
        StepStatus::Current
    } else {
        StepStatus::Pending
    }
}

pub fn score_band(score: f64) -> ScoreBand {
    ScoreBand::of(score)
}

impl SessionView {
    pub fn from_session(session: &WizardSession) -> Self {
        let export = build_export(session);

        let mentor = session.mentor_questions.as_ref().map(|questions| MentorView {
            question_count: questions.len(),
            current_question_index: session.current_question_index(),
            current_question: session.current_question().map(str::to_string),
            exchanges: export.step3_mentor_session.questions_and_answers.clone(),
        });

        let evaluation = match (&session.readiness_score, &session.improved_blueprint) {
            (Some(score), Some(blueprint)) => Some(EvaluationView {
                band: score_band(score.overall),
                dimensions: score
                    .dimensions()
                    .into_iter()
                    .map(|(label, value)| DimensionView {
                        label,
                        score: value,
                        band: score_band(f64::from(value)),
                    })
                    .collect(),
                score: score.clone(),
                blueprint: blueprint.clone(),
            }),
            _ => None,
        };

        let prototype = session.prototype.as_ref().map(|artifact| PrototypeView {
            idea_type: artifact.idea_type,
            file_name: artifact.file_name(),
            language: artifact.language(),
            code: artifact.code.clone(),
            sections: match artifact.idea_type {
                IdeaType::Marketplace => artifact.sections(),
                IdeaType::AppOrWebsite | IdeaType::AiTool => Vec::new(),
            },
            live_preview: artifact.has_live_preview(),
            run_instructions: artifact.run_instructions(),
        });

        Self {
            session_id: session.session_id,
            stage: session.stage,
            title: session.stage.title(),
            progress: session.stage.progress(),
            steps: Stage::ALL
                .iter()
                .map(|&stage| StepView {
                    stage,
                    label: stage.label(),
                    status: step_status(stage, session.stage),
                })
                .collect(),
            available_actions: session
                .available_actions()
                .into_iter()
                .map(|action| ActionView {
                    action,
                    caption: action.caption(),
                })
                .collect(),
            input: session.input.clone(),
            refinement: session.refinement.clone(),
            mentor,
            evaluation,
            prototype,
            export,
        }
    }
}
