//! HTTP boundary errors.
//!
//! Every failure the caller can see is a 400 with a fixed message. Details are
//! logged, never returned.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use survey_core::ErrorBody;

/// Message returned for unreadable bodies and unexpected failures.
pub const BAD_REQUEST_MESSAGE: &str = "Bad Request";

/// Message returned when the body parses but fails validation.
pub const INVALID_PAYLOAD_MESSAGE: &str = "Invalid payload";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    /// Malformed body or any unexpected failure.
    BadRequest,
    /// Body is not an object with a long enough `want`.
    InvalidPayload,
}

impl ApiError {
    pub fn message(&self) -> &'static str {
        match self {
            ApiError::BadRequest => BAD_REQUEST_MESSAGE,
            ApiError::InvalidPayload => INVALID_PAYLOAD_MESSAGE,
        }
    }
}

impl From<survey_core::Error> for ApiError {
    fn from(err: survey_core::Error) -> Self {
        match err {
            survey_core::Error::InvalidPayload => ApiError::InvalidPayload,
            other => {
                tracing::debug!(error = %other, "Rejecting request");
                ApiError::BadRequest
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message().to_string(),
        });

        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

/// Converts a panic caught by `CatchPanicLayer` into the generic error response.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    tracing::error!(panic = detail, "Request handler panicked");

    ApiError::BadRequest.into_response()
}
