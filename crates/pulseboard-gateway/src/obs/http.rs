use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};

use crate::app_state::AppState;

/// Route-layer middleware: count requests by route/status and time them.
pub async fn record_request(State(app): State<AppState>, req: Request, next: Next) -> Response {
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".into());

    let started = Instant::now();
    let resp = next.run(req).await;
    let elapsed = started.elapsed();

    let metrics = app.metrics();
    metrics
        .http_requests
        .inc(&[("route", route.as_str()), ("status", resp.status().as_str())]);
    metrics.request_duration.observe(&[("route", route.as_str())], elapsed);

    tracing::trace!(%route, status = %resp.status(), ?elapsed, "request served");
    resp
}
