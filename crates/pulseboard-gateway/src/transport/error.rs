//! HTTP mapping for `PulseError`.
//!
//! The core crate stays HTTP-free; this newtype is where error variants meet
//! status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use pulseboard_core::error::PulseError;

#[derive(Debug)]
pub struct ApiError(pub PulseError);

impl From<PulseError> for ApiError {
    fn from(e: PulseError) -> Self {
        Self(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            PulseError::BadRequest(_) | PulseError::UnsupportedVersion => StatusCode::BAD_REQUEST,
            PulseError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            PulseError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        let body = Json(json!({
            "success": false,
            "error": self.0.client_code().as_str(),
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}
