//! Auth Error Types
//!
//! Every failure in the auth flow is one of these variants. Handlers only
//! propagate them with `?`; the `IntoResponse` impl below is the single
//! boundary that picks the status code and logs.

use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// PostgreSQL SQLSTATE codes that mean "the input violated a schema rule"
/// https://www.postgresql.org/docs/current/errcodes-appendix.html
const VALIDATION_SQLSTATES: &[&str] = &["23502", "23505", "23514"];
/// invalid_text_representation (e.g. a malformed UUID literal)
const MALFORMED_IDENTIFIER_SQLSTATE: &str = "22P02";

#[derive(Debug, Error)]
pub enum AuthError {
    /// Client sent missing or invalid input
    #[error("A required parameter was omitted or invalid")]
    BadParams,

    /// Unknown email or wrong password; deliberately indistinguishable
    #[error("The provided email or password is incorrect")]
    BadCredentials,

    /// No valid bearer token on a protected route
    #[error("A valid bearer token is required")]
    Unauthorized,

    /// Store-level validation (unique, required, check constraints)
    #[error("The received params failed validation: {0}")]
    Validation(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Malformed identifier: {0}")]
    MalformedIdentifier(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::BadParams
            | AuthError::Validation(_)
            | AuthError::MalformedIdentifier(_) => ErrorKind::UnprocessableEntity,
            AuthError::BadCredentials | AuthError::Unauthorized => ErrorKind::Unauthorized,
            AuthError::NotFound(_) => ErrorKind::NotFound,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Stable name reported in the response body
    pub fn name(&self) -> &'static str {
        match self {
            AuthError::BadParams => "BAD_PARAMS",
            AuthError::BadCredentials => "BAD_CREDENTIALS",
            AuthError::Unauthorized => "UNAUTHORIZED",
            AuthError::Validation(_) => "VALIDATION_FAILURE",
            AuthError::NotFound(_) => "NOT_FOUND",
            AuthError::MalformedIdentifier(_) => "MALFORMED_IDENTIFIER",
            AuthError::Database(_) | AuthError::Internal(_) => "INTERNAL",
        }
    }

    /// Convert to AppError
    ///
    /// Server-side failures get a generic message; driver details stay in
    /// the logs.
    pub fn to_app_error(&self) -> AppError {
        let message = if self.kind().is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };
        AppError::new(self.kind(), message).with_name(self.name())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        let status = self.kind().status_code();
        match self {
            AuthError::Database(e) => {
                tracing::error!(status, error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(status, message = %msg, "Auth internal error");
            }
            AuthError::BadCredentials => {
                tracing::warn!(status, "Invalid sign-in attempt");
            }
            AuthError::Unauthorized => {
                tracing::warn!(status, "Rejected unauthenticated request");
            }
            _ => {
                tracing::warn!(status, error = %self, "Auth request failed");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        let classified = match &err {
            sqlx::Error::RowNotFound => Some(AuthError::NotFound("user".to_string())),
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().map(|c| c.into_owned());
                match code.as_deref() {
                    Some(code) if VALIDATION_SQLSTATES.contains(&code) => {
                        let detail = match db_err.constraint() {
                            Some(constraint) => format!("constraint {constraint} violated"),
                            None => db_err.message().to_string(),
                        };
                        Some(AuthError::Validation(detail))
                    }
                    Some(MALFORMED_IDENTIFIER_SQLSTATE) => Some(AuthError::MalformedIdentifier(
                        db_err.message().to_string(),
                    )),
                    _ => None,
                }
            }
            _ => None,
        };

        classified.unwrap_or_else(|| AuthError::Database(err))
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "Rejected request body");
        AuthError::BadParams
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::UnprocessableEntity => AuthError::Validation(err.message().to_string()),
            ErrorKind::NotFound => AuthError::NotFound(err.message().to_string()),
            ErrorKind::Unauthorized => AuthError::Unauthorized,
            _ => AuthError::Internal(err.to_string()),
        }
    }
}

impl From<platform::password::PasswordHashError> for AuthError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_table() {
        let cases = [
            (AuthError::Validation("dup".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (AuthError::NotFound("user".into()), StatusCode::NOT_FOUND),
            (AuthError::MalformedIdentifier("id".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (AuthError::BadParams, StatusCode::UNPROCESSABLE_ENTITY),
            (AuthError::BadCredentials, StatusCode::UNAUTHORIZED),
            (AuthError::Unauthorized, StatusCode::UNAUTHORIZED),
            (AuthError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (AuthError::Database(sqlx::Error::PoolTimedOut), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err = AuthError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, AuthError::NotFound(_)));
    }

    #[test]
    fn test_unclassified_driver_error_is_internal() {
        let err = AuthError::from(sqlx::Error::PoolClosed);
        assert_eq!(err.kind(), ErrorKind::InternalServerError);
    }

    #[test]
    fn test_internal_message_is_not_leaked() {
        let app = AuthError::Internal("secret driver detail".into()).to_app_error();
        assert_eq!(app.message(), "Internal server error");
        assert_eq!(app.name(), "INTERNAL");
    }

    #[test]
    fn test_app_error_conversion() {
        let err = AuthError::from(AppError::unprocessable("Invalid email format"));
        assert!(matches!(err, AuthError::Validation(ref m) if m == "Invalid email format"));
    }
}
