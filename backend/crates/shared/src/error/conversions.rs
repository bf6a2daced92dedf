//! Error conversions - Rendering and framework rejections
//!
//! Provides the HTTP rendering of [`AppError`] and the conversion of
//! framework body rejections into it.

#[cfg(feature = "axum")]
use super::app_error::AppError;

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // 5xx detail stays in the logs
        let detail = if self.is_server_error() {
            self.kind().as_str()
        } else {
            self.message()
        };

        // RFC 7807 Problem Details for HTTP APIs
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": detail,
            "code": self.code(),
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(feature = "axum")]
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        use axum::extract::rejection::JsonRejection;

        let message = rejection.body_text();
        match rejection {
            JsonRejection::JsonDataError(_) => AppError::unprocessable(message).with_source(rejection),
            _ => AppError::bad_request(message).with_source(rejection),
        }
    }
}
