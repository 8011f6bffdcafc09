//! Error type of the HTTP layer and its status-code mapping.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use crate::catalog::StorageError;
use crate::utils::ValidationError;

/// Errors surfaced by the REST handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Parameters or body failed validation
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Malformed request outside the validator's scope (ids, bodies)
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize)]
struct ErrorResponse {
    message: String,
}

impl ApiError {
    pub fn publication_not_found() -> Self {
        ApiError::NotFound("Publication not found".to_string())
    }

    pub fn invalid_publication_id(raw: &str) -> Self {
        ApiError::BadRequest(format!("Invalid publication id: \"{}\"", raw))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ApiError::Storage(err) => {
                tracing::error!(error = %err, "storage failure");
                "Internal server error".to_string()
            }
            other => {
                tracing::warn!(error = %other, "rejected request");
                other.to_string()
            }
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse { message })
    }
}
