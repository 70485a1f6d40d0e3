//! Application error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use cropshare_core::auth::AuthError;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
///
/// Rejection bodies are plain text; this application has no structured
/// error schema. `Internal` keeps its detail server-side and answers
/// with an opaque message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, m),
            AppError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, m),
            AppError::Forbidden(m) => (StatusCode::FORBIDDEN, m),
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, m),
            AppError::Conflict(m) => (StatusCode::CONFLICT, m),
            AppError::Internal(detail) => {
                error!(%detail, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error.".to_string(),
                )
            }
        };
        (status, message).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            // The missing-cookie rejection is a 403, not a 401; this
            // asymmetry is long-standing, client-visible behavior.
            AuthError::TokenMissing => {
                AppError::Forbidden("Access denied. No token provided.".into())
            }
            AuthError::TokenInvalid | AuthError::TokenExpired => {
                AppError::Unauthorized("Invalid token.".into())
            }
            // A token whose user has vanished is treated as unauthenticated.
            AuthError::UserNotFound => AppError::Unauthorized("Invalid token.".into()),
            AuthError::RoleDenied => AppError::Forbidden(
                "Access denied. You do not have the required permission.".into(),
            ),
            AuthError::AccountBlocked => {
                AppError::Forbidden("Your account has been blocked".into())
            }
            AuthError::Signing => AppError::Internal("signing secret is not configured".into()),
            AuthError::Store(e) => AppError::Internal(e.to_string()),
            AuthError::Internal(m) => AppError::Internal(m),
        }
    }
}
