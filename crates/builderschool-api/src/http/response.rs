//! Envelope response format for all API responses.
//!
//! Every response is wrapped in a consistent envelope:
//! ```json
//! {
//!   "data": { ... },
//!   "meta": { "request_id": "...", "timestamp": "...", "response_time_ms": 5 },
//!   "errors": []
//! }
//! ```

use std::time::Instant;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Envelope response wrapping all API data.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// The main response payload; `null` on error.
    pub data: Option<T>,

    /// Request metadata.
    pub meta: ApiMeta,

    /// Error list (empty on success).
    pub errors: Vec<ApiErrorDetail>,
}

/// Metadata included in every response.
#[derive(Debug, Serialize)]
pub struct ApiMeta {
    /// Unique request identifier for tracing.
    pub request_id: String,
    /// ISO-8601 timestamp of the response.
    pub timestamp: String,
    /// Response time in milliseconds.
    pub response_time_ms: u64,
}

impl ApiMeta {
    /// Metadata for a request that started at `start`.
    pub fn since(start: Instant) -> Self {
        Self {
            request_id: uuid::Uuid::now_v7().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            response_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

/// Individual error detail.
#[derive(Debug, Serialize)]
pub struct ApiErrorDetail {
    /// Machine-readable error code.
    pub code: String,
    /// Message suitable for showing to the student.
    pub message: String,
    /// Additional context, e.g. the raw model output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a success response with data.
    pub fn success(data: T, meta: ApiMeta) -> Self {
        Self {
            data: Some(data),
            meta,
            errors: Vec::new(),
        }
    }
}

impl ApiResponse<()> {
    /// Create an error response (no data).
    pub fn error(detail: ApiErrorDetail, meta: ApiMeta) -> Self {
        Self {
            data: None,
            meta,
            errors: vec![detail],
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    /// Serialize the envelope with an explicit status code.
    pub fn into_response_with(self, status: StatusCode) -> Response {
        let body = serde_json::to_string(&self).unwrap_or_else(|_| {
            r#"{"data":null,"errors":[{"code":"SERIALIZATION_ERROR","message":"Failed to serialize response"}]}"#.to_string()
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response()
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        self.into_response_with(StatusCode::OK)
    }
}
