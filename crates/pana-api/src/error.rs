use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pana_persist::PersistError;
use pana_study::StudyError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    /// Upstream or internal failure; `error` names the operation that failed
    #[error("{error}: {message}")]
    Failed { error: &'static str, message: String },
}

impl ApiError {
    pub fn unauthorized() -> Self {
        ApiError::Unauthorized("Unauthorized".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, json!({ "error": msg })),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            ApiError::Failed { error, message } => {
                tracing::error!(error, message = %message, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": error, "message": message }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Map a failure to a response, naming the operation on 500s
pub trait Classify {
    fn classify(self, operation: &'static str) -> ApiError;
}

impl Classify for StudyError {
    fn classify(self, operation: &'static str) -> ApiError {
        match self {
            StudyError::Validation(msg) => ApiError::BadRequest(msg),
            StudyError::SourceUnavailable { ref path, .. } => {
                ApiError::NotFound(format!("Page source not found: {}", path.display()))
            }
            StudyError::Persist(err) => err.classify(operation),
            other => ApiError::Failed {
                error: operation,
                message: other.to_string(),
            },
        }
    }
}

impl Classify for PersistError {
    fn classify(self, operation: &'static str) -> ApiError {
        match self {
            PersistError::UserNotFound(_) => ApiError::NotFound("User not found".to_string()),
            other => ApiError::Failed {
                error: operation,
                message: other.to_string(),
            },
        }
    }
}

impl Classify for anyhow::Error {
    fn classify(self, operation: &'static str) -> ApiError {
        ApiError::Failed {
            error: operation,
            message: self.to_string(),
        }
    }
}

pub trait ResultExt<T> {
    fn or_fail(self, operation: &'static str) -> ApiResult<T>;
}

impl<T, E: Classify> ResultExt<T> for Result<T, E> {
    fn or_fail(self, operation: &'static str) -> ApiResult<T> {
        self.map_err(|e| e.classify(operation))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
