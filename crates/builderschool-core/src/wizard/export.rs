//! Whole-session export document.

use chrono::Utc;

use builderschool_types::export::{
    EXPORT_APP_NAME, ExportEvaluation, ExportInput, ExportMentorSession, ExportMeta,
    ExportPrototype, MentorExchange, SessionExport,
};
use builderschool_types::session::WizardSession;

/// Snapshot everything the session holds. Missing pieces become `null`.
pub fn build_export(session: &WizardSession) -> SessionExport {
    let questions_and_answers = session
        .mentor_questions
        .iter()
        .flatten()
        .enumerate()
        .map(|(i, question)| MentorExchange {
            question: question.clone(),
            student_answer: session.mentor_answers.get(i).cloned(),
            mentor_feedback: session.mentor_responses.get(i).cloned(),
        })
        .collect();

    let input = session.input.as_ref();
    let prototype = session.prototype.as_ref();

    SessionExport {
        meta: ExportMeta {
            app: EXPORT_APP_NAME.to_string(),
            stage_reached: session.stage,
            session_id: session.session_id,
            exported_at: Utc::now(),
        },
        step1_input: ExportInput {
            idea: input.map(|i| i.idea.clone()),
            student_class: input.map(|i| i.student_class),
            idea_type: input.map(|i| i.idea_type),
        },
        step2_refinement: session.refinement.clone(),
        step3_mentor_session: ExportMentorSession {
            questions_and_answers,
        },
        step4_evaluation: ExportEvaluation {
            readiness_score: session.readiness_score.clone(),
            improved_blueprint: session.improved_blueprint.clone(),
        },
        step5_prototype: ExportPrototype {
            code: prototype.map(|p| p.code.clone()),
            file_name: prototype.map(|p| p.file_name().to_string()),
        },
    }
}

/// Pretty-printed UTF-8 JSON of [`build_export`].
pub fn export_json_pretty(session: &WizardSession) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&build_export(session))
}
