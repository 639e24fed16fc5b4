//! REST API handlers for the wizard session.
//!
//! Every action endpoint locks the session, runs the wizard operation, and
//! answers with the refreshed [`SessionView`] inside the standard
//! `ApiResponse` envelope. The two download endpoints return the raw file
//! with a `Content-Disposition: attachment` header.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use builderschool_core::wizard::{SessionView, export_json_pretty};
use builderschool_types::export::EXPORT_FILE_NAME;
use builderschool_types::session::WizardSession;
use builderschool_types::wizard::{IdeaInput, IdeaType, Stage, StudentClass};

use crate::http::error::AppError;
use crate::http::response::{ApiMeta, ApiResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Body of `POST /session/idea`.
#[derive(Debug, Deserialize)]
pub struct IdeaRequest {
    pub idea: String,
    #[serde(default)]
    pub student_class: StudentClass,
    pub idea_type: IdeaType,
}

impl From<IdeaRequest> for IdeaInput {
    fn from(req: IdeaRequest) -> Self {
        IdeaInput {
            idea: req.idea,
            student_class: req.student_class,
            idea_type: req.idea_type,
        }
    }
}

/// Body of `POST /session/mentor/answer`.
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

/// Body of `POST /session/api-key`.
#[derive(Deserialize)]
pub struct ApiKeyRequest {
    pub api_key: String,
}

/// Whether wizard actions can reach the model.
#[derive(Debug, Serialize)]
pub struct CredentialStatus {
    pub configured: bool,
    pub provider: String,
    pub api_key_env: String,
}

async fn credential_status(state: &AppState) -> CredentialStatus {
    CredentialStatus {
        configured: state.has_credentials().await,
        provider: state.config.provider_name.clone(),
        api_key_env: state.config.api_key_env.clone(),
    }
}

fn view_response(session: &WizardSession, start: Instant) -> ApiResponse<SessionView> {
    ApiResponse::success(SessionView::from_session(session), ApiMeta::since(start))
}

fn attachment(content_type: &'static str, file_name: &str, body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    )
        .into_response()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/session
pub async fn get_session(State(state): State<AppState>) -> ApiResponse<SessionView> {
    let start = Instant::now();
    let session = state.session.lock().await;
    view_response(&session, start)
}

/// POST /api/v1/session/idea
pub async fn submit_idea(
    State(state): State<AppState>,
    payload: Result<Json<IdeaRequest>, JsonRejection>,
) -> Result<ApiResponse<SessionView>, AppError> {
    let start = Instant::now();
    let Json(req) = payload?;
    let service = state.service().await?;

    let mut session = state.session.lock().await;
    service.submit_idea(&mut session, req.into()).await?;
    Ok(view_response(&session, start))
}

/// POST /api/v1/session/change-idea
pub async fn change_idea(State(state): State<AppState>) -> Result<ApiResponse<SessionView>, AppError> {
    let start = Instant::now();
    let service = state.service().await?;

    let mut session = state.session.lock().await;
    service.change_idea(&mut session)?;
    Ok(view_response(&session, start))
}

/// POST /api/v1/session/mentor/start
pub async fn start_mentor_session(
    State(state): State<AppState>,
) -> Result<ApiResponse<SessionView>, AppError> {
    let start = Instant::now();
    let service = state.service().await?;

    let mut session = state.session.lock().await;
    service.start_mentor_session(&mut session).await?;
    Ok(view_response(&session, start))
}

/// POST /api/v1/session/mentor/answer
pub async fn answer_question(
    State(state): State<AppState>,
    payload: Result<Json<AnswerRequest>, JsonRejection>,
) -> Result<ApiResponse<SessionView>, AppError> {
    let start = Instant::now();
    let Json(req) = payload?;
    let service = state.service().await?;

    let mut session = state.session.lock().await;
    service.answer_question(&mut session, &req.answer).await?;
    Ok(view_response(&session, start))
}

/// POST /api/v1/session/mentor/restart
pub async fn restart_qa(State(state): State<AppState>) -> Result<ApiResponse<SessionView>, AppError> {
    let start = Instant::now();
    let service = state.service().await?;

    let mut session = state.session.lock().await;
    service.restart_qa(&mut session)?;
    Ok(view_response(&session, start))
}

/// POST /api/v1/session/mentor/back
pub async fn back_to_refinement(
    State(state): State<AppState>,
) -> Result<ApiResponse<SessionView>, AppError> {
    let start = Instant::now();
    let service = state.service().await?;

    let mut session = state.session.lock().await;
    service.back_to_refinement(&mut session)?;
    Ok(view_response(&session, start))
}

/// POST /api/v1/session/evaluation
pub async fn see_evaluation(
    State(state): State<AppState>,
) -> Result<ApiResponse<SessionView>, AppError> {
    let start = Instant::now();
    let service = state.service().await?;

    let mut session = state.session.lock().await;
    service.see_evaluation(&mut session).await?;
    Ok(view_response(&session, start))
}

/// POST /api/v1/session/evaluation/back
pub async fn back_to_mentor(
    State(state): State<AppState>,
) -> Result<ApiResponse<SessionView>, AppError> {
    let start = Instant::now();
    let service = state.service().await?;

    let mut session = state.session.lock().await;
    service.back_to_mentor(&mut session)?;
    Ok(view_response(&session, start))
}

/// POST /api/v1/session/prototype
pub async fn generate_prototype(
    State(state): State<AppState>,
) -> Result<ApiResponse<SessionView>, AppError> {
    let start = Instant::now();
    let service = state.service().await?;

    let mut session = state.session.lock().await;
    service.generate_prototype(&mut session).await?;
    Ok(view_response(&session, start))
}

/// POST /api/v1/session/start-over
pub async fn start_over(State(state): State<AppState>) -> Result<ApiResponse<SessionView>, AppError> {
    let start = Instant::now();
    let service = state.service().await?;

    let mut session = state.session.lock().await;
    service.start_over(&mut session)?;
    Ok(view_response(&session, start))
}

/// GET /api/v1/session/api-key
pub async fn get_credentials(State(state): State<AppState>) -> ApiResponse<CredentialStatus> {
    let start = Instant::now();
    ApiResponse::success(credential_status(&state).await, ApiMeta::since(start))
}

/// POST /api/v1/session/api-key
///
/// The typed key takes precedence over the environment variable.
pub async fn set_credentials(
    State(state): State<AppState>,
    payload: Result<Json<ApiKeyRequest>, JsonRejection>,
) -> Result<ApiResponse<CredentialStatus>, AppError> {
    let start = Instant::now();
    let Json(req) = payload?;
    state.set_api_key(SecretString::from(req.api_key)).await?;
    Ok(ApiResponse::success(
        credential_status(&state).await,
        ApiMeta::since(start),
    ))
}

/// GET /api/v1/session/export
///
/// Available once a refinement exists.
pub async fn download_export(State(state): State<AppState>) -> Result<Response, AppError> {
    let session = state.session.lock().await;
    if session.stage < Stage::Refinement {
        return Err(AppError::NotAvailable(
            "Refine an idea before exporting the session.".to_string(),
        ));
    }

    let body = export_json_pretty(&session).map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(attachment(
        "application/json; charset=utf-8",
        EXPORT_FILE_NAME,
        body,
    ))
}

/// GET /api/v1/session/prototype
pub async fn download_prototype(State(state): State<AppState>) -> Result<Response, AppError> {
    let session = state.session.lock().await;
    match (&session.prototype, session.stage) {
        (Some(artifact), Stage::Prototype) => Ok(attachment(
            artifact.content_type(),
            artifact.file_name(),
            artifact.code.clone(),
        )),
        _ => Err(AppError::NotAvailable(
            "No prototype has been generated yet.".to_string(),
        )),
    }
}
