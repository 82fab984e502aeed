//! HTTP handlers.
//!
//! - `POST /analytics-events`: ingest one event, echo current counters
//! - `GET /analytics-summary`: counters, rates, and campaigns

use axum::{
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use chrono::Utc;

use pulseboard_core::error::PulseError;
use pulseboard_core::protocol::{SummaryResponse, TrackRequest, TrackResponse};

use crate::app_state::AppState;
use crate::transport::error::ApiError;

pub async fn track_event(
    State(app): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<TrackResponse>, ApiError> {
    let metrics = app.metrics();

    let body = body.map_err(|rej| {
        if rej.status() == StatusCode::PAYLOAD_TOO_LARGE {
            metrics.validation_rejections.inc(&[("reason", "too_large")]);
            PulseError::PayloadTooLarge
        } else {
            metrics.validation_rejections.inc(&[("reason", "malformed_body")]);
            PulseError::BadRequest(rej.body_text())
        }
    })?;

    let req = TrackRequest::from_slice(&body).inspect_err(|_| {
        metrics.validation_rejections.inc(&[("reason", "malformed_body")]);
    })?;

    let recorded = app.analytics().ingest(req).inspect_err(|_| {
        metrics.validation_rejections.inc(&[("reason", "missing_event")]);
    })?;

    metrics.events.inc(&[("kind", recorded.kind.label())]);

    Ok(Json(TrackResponse {
        success: true,
        event: recorded.event,
        timestamp: recorded.at,
        current_metrics: recorded.current,
    }))
}

pub async fn analytics_summary(State(app): State<AppState>) -> Json<SummaryResponse> {
    Json(SummaryResponse::new(app.analytics().summarize(), Utc::now()))
}
