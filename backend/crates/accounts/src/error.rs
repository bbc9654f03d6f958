//! Account Error Types
//!
//! This module provides account-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Token verification failures (bad signature, expiry, stored-state
//! mismatch) are all collapsed into [`AccountError::Unauthorized`] so a
//! forged token and a merely stale one are indistinguishable to callers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Account-specific result type alias
pub type AccountResult<T> = Result<T, AccountError>;

/// Account-specific error variants
#[derive(Debug, Error)]
pub enum AccountError {
    /// Malformed or missing input
    #[error("{0}")]
    Validation(String),

    /// Username or email already registered
    #[error("Username or email already registered")]
    Conflict,

    /// No user matches the supplied identity
    #[error("User not found")]
    NotFound,

    /// Password verification failed
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, invalid, expired or superseded session token
    #[error("Unauthorized request")]
    Unauthorized,

    /// Mandatory asset upload did not produce a URL
    #[error("Asset upload failed: {0}")]
    Asset(String),

    /// Required configuration is absent or malformed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccountError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AccountError::Validation(_) | AccountError::Asset(_) => StatusCode::BAD_REQUEST,
            AccountError::Conflict => StatusCode::CONFLICT,
            AccountError::NotFound => StatusCode::NOT_FOUND,
            AccountError::InvalidCredentials | AccountError::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            AccountError::Config(_) | AccountError::Database(_) | AccountError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::Validation(_) | AccountError::Asset(_) => ErrorKind::BadRequest,
            AccountError::Conflict => ErrorKind::Conflict,
            AccountError::NotFound => ErrorKind::NotFound,
            AccountError::InvalidCredentials | AccountError::Unauthorized => {
                ErrorKind::Unauthorized
            }
            AccountError::Config(_) | AccountError::Database(_) | AccountError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AccountError::Database(e) => {
                tracing::error!(error = %e, "Account database error");
            }
            AccountError::Internal(msg) => {
                tracing::error!(message = %msg, "Account internal error");
            }
            AccountError::Config(msg) => {
                tracing::error!(message = %msg, "Account configuration error");
            }
            AccountError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AccountError::Unauthorized => {
                tracing::warn!("Rejected session token");
            }
            _ => {
                tracing::debug!(error = %self, "Account error");
            }
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AccountError {
    fn from(err: AppError) -> Self {
        AccountError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AccountError::Validation("empty".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AccountError::Conflict.status_code(), StatusCode::CONFLICT);
        assert_eq!(AccountError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AccountError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AccountError::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AccountError::Asset("no url".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AccountError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_token_failures_are_indistinguishable() {
        // Expiry, forgery and store mismatch all collapse to the same
        // kind and message at the boundary.
        let err = AccountError::Unauthorized;
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert_eq!(err.to_string(), "Unauthorized request");
    }
}
