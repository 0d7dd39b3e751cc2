//! Application error type. Every failure in this system is user-facing:
//! missing things become 404 pages, everything unexpected becomes a 500
//! page, and auth failures are handled by the extractors in `auth`.

use actix_web::{HttpResponse, ResponseError, http::StatusCode, http::header::ContentType};
use thiserror::Error;

use crate::render::pages;
use quill_core::error::{DomainError, RepoError};
use quill_core::ports::AuthError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::NotFound(detail) => pages::error_page(404, "Not Found", detail),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                pages::error_page(500, "Internal Server Error", "Something went wrong.")
            }
        };

        HttpResponse::build(self.status_code())
            .content_type(ContentType::html())
            .body(body)
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, id } => {
                AppError::NotFound(format!("{entity_type} {id} not found"))
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
