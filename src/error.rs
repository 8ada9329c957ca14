use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::users::repo_types::RepoError;

/// Error returned by every handler. Each kind maps to its own status and code.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedInput(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::MalformedInput(rejection.body_text())
    }
}

fn is_unavailable(e: &sqlx::Error) -> bool {
    matches!(
        e,
        sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::MalformedInput(msg) => {
                (StatusCode::BAD_REQUEST, "MALFORMED_INPUT", msg.clone())
            }
            AppError::Repo(RepoError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", self.to_string())
            }
            AppError::Repo(RepoError::Ambiguous { .. }) => {
                (StatusCode::CONFLICT, "AMBIGUOUS_RESULT", self.to_string())
            }
            AppError::Repo(RepoError::ValueTooLong { .. }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALUE_TOO_LONG",
                self.to_string(),
            ),
            AppError::Repo(RepoError::Storage(e)) if is_unavailable(e) => {
                error!(error = %e, "storage unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "STORAGE_UNAVAILABLE",
                    "Storage is unavailable".to_string(),
                )
            }
            AppError::Repo(RepoError::Storage(e)) => {
                error!(error = %e, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
