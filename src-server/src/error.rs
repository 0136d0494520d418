use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use feedtrack_core::errors::{Error as CoreError, ValidationError};
use serde::Serialize;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    code: &'static str,
    message: String,
    /// Set when the dashboard should offer a retry instead of an empty state
    retryable: bool,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Core(CoreError::DataUnavailable(_)) => {
                (StatusCode::SERVICE_UNAVAILABLE, "data_unavailable")
            }
            ApiError::Core(CoreError::Validation(ValidationError::DuplicateTarget { .. })) => {
                (StatusCode::CONFLICT, "duplicate_target")
            }
            ApiError::Core(CoreError::Validation(_)) => (StatusCode::BAD_REQUEST, "validation"),
            ApiError::Core(CoreError::NotFound(_)) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!("{}", self);
        }
        let retryable = matches!(&self, ApiError::Core(e) if e.is_retryable());
        let body = ErrorBody {
            code,
            message: self.to_string(),
            retryable,
        };
        (status, Json(body)).into_response()
    }
}
