//! Error conversions
//!
//! HTTP rendering of [`AppError`]. This is the only place a status code and
//! error body are produced.

#[cfg(feature = "axum")]
use super::app_error::AppError;

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl AppError {
    /// JSON body sent to clients: `{ status, name, message }`
    pub fn to_body(&self) -> serde_json::Value {
        serde_json::json!({
            "status": self.status_code(),
            "name": self.name(),
            "message": self.message(),
        })
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(self.to_body())).into_response()
    }
}
