use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::{response::ErrorBody, validation::ValidationErrors};

#[derive(Debug, Error)]
pub enum AppError {
    /// Carries the client-facing message, e.g. "Category Not Found".
    #[error("{0}")]
    NotFound(&'static str),

    #[error("The given data was invalid.")]
    Validation(ValidationErrors),

    #[error("Bad Request {0}")]
    BadRequest(String),

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("Unauthenticated.")]
    Unauthorized,

    #[error("Conflict")]
    Conflict(String),

    #[error("Database error")]
    DbError(#[from] sqlx::Error),

    #[error("ORM error")]
    OrmError(DbErr),

    #[error("Storage error")]
    Io(#[from] std::io::Error),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        // A unique constraint can still trip when two writers pass validation concurrently.
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => AppError::Conflict(detail),
            _ => AppError::OrmError(err),
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::BadRequest(err.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::DbError(_)
            | AppError::OrmError(_)
            | AppError::Io(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match self {
            AppError::Validation(errors) => ErrorBody::fields(errors),
            AppError::Conflict(detail) => {
                tracing::warn!(detail = %detail, "unique constraint violated after validation");
                ErrorBody::message("The resource conflicts with an existing record.")
            }
            AppError::DbError(ref err) => {
                tracing::error!(error = %err, "database error");
                ErrorBody::message(self.to_string())
            }
            AppError::OrmError(ref err) => {
                tracing::error!(error = %err, "orm error");
                ErrorBody::message(self.to_string())
            }
            AppError::Io(ref err) => {
                tracing::error!(error = %err, "storage error");
                ErrorBody::message(self.to_string())
            }
            AppError::Internal(ref err) => {
                tracing::error!(error = %err, "internal error");
                ErrorBody::message(self.to_string())
            }
            other => ErrorBody::message(other.to_string()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
