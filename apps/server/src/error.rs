use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use po_classifier_ai::AiError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Ai(#[from] AiError),
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    error: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            ApiError::Ai(e) => match e {
                AiError::EmptyInput => (StatusCode::BAD_REQUEST, e.code()),
                AiError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, e.code()),
                e if e.is_backend_failure() => (StatusCode::BAD_GATEWAY, e.code()),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, e.code()),
            },
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };
        if status.is_server_error() {
            tracing::warn!(code = error, "Request failed: {}", self);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            error,
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
