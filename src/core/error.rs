use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::{ErrorResponse, FieldError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Filesystem error: {0}")]
    Filesystem(#[from] std::io::Error),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("No files were uploaded")]
    NoFilesProvided,

    #[error("Validation failed on {} field(s)", .0.len())]
    FieldValidation(Vec<FieldError>),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error occurred".to_string(),
                    None,
                )
            }
            AppError::Filesystem(ref e) => {
                tracing::error!("Filesystem error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to store uploaded files".to_string(),
                    None,
                )
            }
            AppError::UnsupportedFileType(ref content_type) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                format!("Unsupported file type: {}", content_type),
                None,
            ),
            AppError::NoFilesProvided => (
                StatusCode::BAD_REQUEST,
                "No files were uploaded.".to_string(),
                None,
            ),
            AppError::FieldValidation(errors) => (
                StatusCode::BAD_REQUEST,
                "Validation failed".to_string(),
                Some(errors),
            ),
            AppError::ExtractionFailed(ref msg) => {
                tracing::error!("Extraction failed: {}", msg);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "Failed to upload and extract game.".to_string(),
                    None,
                )
            }
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::PayloadTooLarge(ref msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, msg.clone(), None)
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse::new(message, errors));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (
                AppError::UnsupportedFileType("text/plain".to_string()),
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ),
            (AppError::NoFilesProvided, StatusCode::BAD_REQUEST),
            (AppError::FieldValidation(vec![]), StatusCode::BAD_REQUEST),
            (
                AppError::ExtractionFailed("bad zip".to_string()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::PayloadTooLarge("length limit exceeded".to_string()),
                StatusCode::PAYLOAD_TOO_LARGE,
            ),
            (
                AppError::Database(sqlx::Error::RowNotFound),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::Filesystem(std::io::Error::other("disk full")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
