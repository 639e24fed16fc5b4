//! Shape of the downloadable session document (`builder_school_session.json`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::plan::{ImprovedBlueprint, ReadinessScore, Refinement};
use crate::wizard::{IdeaType, Stage, StudentClass};

pub const EXPORT_APP_NAME: &str = "Builder School in a Box";
pub const EXPORT_FILE_NAME: &str = "builder_school_session.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionExport {
    pub meta: ExportMeta,
    pub step1_input: ExportInput,
    pub step2_refinement: Option<Refinement>,
    pub step3_mentor_session: ExportMentorSession,
    pub step4_evaluation: ExportEvaluation,
    pub step5_prototype: ExportPrototype,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMeta {
    pub app: String,
    pub stage_reached: Stage,
    pub session_id: Uuid,
    pub exported_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportInput {
    pub idea: Option<String>,
    pub student_class: Option<StudentClass>,
    pub idea_type: Option<IdeaType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMentorSession {
    pub questions_and_answers: Vec<MentorExchange>,
}

/// One question with whatever answer and feedback exist for it so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentorExchange {
    pub question: String,
    pub student_answer: Option<String>,
    pub mentor_feedback: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportEvaluation {
    pub readiness_score: Option<ReadinessScore>,
    pub improved_blueprint: Option<ImprovedBlueprint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportPrototype {
    pub code: Option<String>,
    pub file_name: Option<String>,
}
