//! API error types and handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::auth::PasswordError;
use crate::directory::DirectoryError;

/// Application error type. Every internal failure is converted into exactly
/// one of these before it crosses the service boundary; no internal error
/// detail reaches a response body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or malformed required input; caller fixable
    #[error("Validation error: {0}")]
    Validation(String),
    /// Email already registered. Same outcome whether the pre-check or the
    /// directory's uniqueness constraint detected the collision.
    #[error("User already exists")]
    DuplicateAccount,
    /// Unknown email OR wrong password. Deliberately one variant with one
    /// message so callers cannot enumerate accounts.
    #[error("Invalid credentials")]
    InvalidCredentials,
    /// Token missing, malformed, forged, or expired. One message for all;
    /// the caller must not learn which.
    #[error("Invalid token")]
    Unauthenticated,
    /// Valid token but the referenced account no longer exists
    #[error("User not found")]
    AccountNotFound,
    /// Unexpected server fault; detail goes to logs only
    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::DuplicateAccount => (StatusCode::BAD_REQUEST, "ACCOUNT_EXISTS"),
            ApiError::InvalidCredentials => (StatusCode::BAD_REQUEST, "INVALID_CREDENTIALS"),
            ApiError::Unauthenticated => (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED"),
            ApiError::AccountNotFound => (StatusCode::NOT_FOUND, "ACCOUNT_NOT_FOUND"),
            ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

impl From<DirectoryError> for ApiError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::Duplicate => ApiError::DuplicateAccount,
            DirectoryError::Database(detail) => {
                tracing::error!(%detail, "directory failure");
                ApiError::Internal
            }
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        tracing::error!(error = %err, "password hashing failure");
        ApiError::Internal
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                ApiError::Validation("x".into()),
                StatusCode::BAD_REQUEST,
            ),
            (ApiError::DuplicateAccount, StatusCode::BAD_REQUEST),
            (ApiError::InvalidCredentials, StatusCode::BAD_REQUEST),
            (ApiError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (ApiError::AccountNotFound, StatusCode::NOT_FOUND),
            (ApiError::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_duplicate_from_directory_race() {
        // A uniqueness violation caught at create time maps to the same
        // outcome as the pre-check path
        let err: ApiError = DirectoryError::Duplicate.into();
        assert!(matches!(err, ApiError::DuplicateAccount));
    }
}
