//! HTTP handlers.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, HeaderMap, HeaderName},
    response::{Html, IntoResponse},
    Json,
};
use chrono::Utc;
use serde_json::Value;
use survey_core::{normalize, NormalizedRecord, RequestMeta, SubmitAck};

use crate::{ApiError, AppState};

const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

/// Single-page survey form.
const INDEX_HTML: &str = include_str!("../static/index.html");

/// Accept a survey submission.
///
/// The body is parsed as JSON whatever its `Content-Type`. On success the
/// normalized record is logged and, when a webhook is configured, handed to
/// the forwarder without waiting for delivery.
///
/// # Responses
///
/// - 200 `{"ok": true}`
/// - 400 `{"error": "Invalid payload"}` when `want` is missing or too short
/// - 400 `{"error": "Bad Request"}` for anything else
pub async fn submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SubmitAck>, ApiError> {
    let body = body.map_err(|e| {
        tracing::debug!(error = %e, "Failed to read request body");
        ApiError::BadRequest
    })?;

    let value: Value = serde_json::from_slice(&body)
        .map_err(|e| survey_core::Error::MalformedRequest(e.to_string()))?;

    let record = normalize(&value, request_meta(&headers), Utc::now())?;

    if let Some(forwarder) = &state.webhook {
        forwarder.dispatch(record.clone());
    }

    log_submission(&record);

    Ok(Json(SubmitAck::OK))
}

/// Health check.
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Serve the survey form page.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

fn request_meta(headers: &HeaderMap) -> RequestMeta {
    RequestMeta::new(
        header_string(headers, &header::USER_AGENT),
        header_string(headers, &header::REFERER),
        header_string(headers, &X_FORWARDED_FOR),
    )
}

/// Header value as text. Repeated headers are joined with `", "`; values that
/// are not visible ASCII are skipped.
fn header_string(headers: &HeaderMap, name: &HeaderName) -> Option<String> {
    let values: Vec<&str> = headers
        .get_all(name)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();
    (!values.is_empty()).then(|| values.join(", "))
}

fn log_submission(record: &NormalizedRecord) {
    match serde_json::to_string(record) {
        Ok(json) => tracing::info!(record = %json, "Survey submission"),
        Err(e) => tracing::warn!(error = %e, "Survey submission (record not serializable)"),
    }
}
