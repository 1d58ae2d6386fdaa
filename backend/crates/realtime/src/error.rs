//! Realtime Error Types

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type RealtimeResult<T> = Result<T, RealtimeError>;

#[derive(Debug, Error)]
pub enum RealtimeError {
    #[error("ABLY_API_KEY is not configured")]
    MissingApiKey,

    /// Key is not in `keyName:keySecret` form
    #[error("ABLY_API_KEY is malformed")]
    MalformedApiKey,

    #[error("Invalid capability: {0}")]
    InvalidCapability(#[from] serde_json::Error),
}

impl RealtimeError {
    pub fn name(&self) -> &'static str {
        match self {
            RealtimeError::MissingApiKey => "REALTIME_NOT_CONFIGURED",
            RealtimeError::MalformedApiKey | RealtimeError::InvalidCapability(_) => {
                "REALTIME_MISCONFIGURED"
            }
        }
    }

    /// Every variant is a server-side configuration problem
    pub fn to_app_error(&self) -> AppError {
        AppError::new(
            ErrorKind::InternalServerError,
            "Error requesting token request",
        )
        .with_name(self.name())
    }
}

impl IntoResponse for RealtimeError {
    fn into_response(self) -> Response {
        tracing::error!(
            status = ErrorKind::InternalServerError.status_code(),
            error = %self,
            "Failed to create token request"
        );
        self.to_app_error().into_response()
    }
}
