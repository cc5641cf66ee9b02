//! API error envelope
//!
//! Every JSON endpoint fails with `{ "error", "kind", "code" }`.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::services::roadmap::{MISSING_QUERY_MESSAGE, RoadmapError};

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub kind: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, kind: &'static str, message: impl Into<String>) -> Self {
        Self { status, kind, message: message.into() }
    }
}

impl From<RoadmapError> for ApiError {
    fn from(err: RoadmapError) -> Self {
        let status = match &err {
            RoadmapError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            RoadmapError::MissingApiKey => StatusCode::SERVICE_UNAVAILABLE,
            RoadmapError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            RoadmapError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            RoadmapError::GenerationFailed(_)
            | RoadmapError::EmptyResponse
            | RoadmapError::InvalidResponseFormat(_)
            | RoadmapError::SchemaMismatch(_) => StatusCode::BAD_GATEWAY,
        };

        if status.is_server_error() {
            tracing::error!("Roadmap request failed: {}", err);
        }

        Self::new(status, err.kind().as_str(), err.user_message())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        RoadmapError::from(errors).into()
    }
}

/// Unreadable or mis-shaped request bodies are the caller's fault: 400 in the
/// usual envelope, never axum's plain-text rejection
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        RoadmapError::InvalidRequest(MISSING_QUERY_MESSAGE.to_string()).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "error": self.message,
            "kind": self.kind,
            "code": self.status.as_u16(),
        }));

        (self.status, body).into_response()
    }
}
