//! Error types for the PeerShare server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Access denied: {0}")]
    Access(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Not available: {0}")]
    NotAvailable(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    pub status: u16,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            // Business-rule conflicts share the 400 class with malformed input.
            AppError::NotAvailable(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Access(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            AppError::AlreadyExists(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            message,
            status: status.as_u16(),
        });

        (status, body).into_response()
    }
}

impl AppError {
    /// Translate a store-level unique-constraint violation into AlreadyExists.
    /// Applied once at the repository create/update call sites.
    pub fn on_unique_violation(err: sqlx::Error, message: &str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::AlreadyExists(message.to_string())
            }
            _ => AppError::Database(err),
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::Validation("v".into()), StatusCode::BAD_REQUEST),
            (AppError::NotAvailable("n".into()), StatusCode::BAD_REQUEST),
            (AppError::NotFound("n".into()), StatusCode::NOT_FOUND),
            (AppError::Access("a".into()), StatusCode::FORBIDDEN),
            (AppError::AlreadyExists("e".into()), StatusCode::CONFLICT),
            (
                AppError::Internal("i".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
