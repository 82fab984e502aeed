//! Axum router wiring.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, obs, ops, transport::http};

pub fn build_router(state: AppState) -> Router {
    let max_body = state.cfg().server.max_body_bytes;

    Router::new()
        .route("/analytics-events", post(http::track_event))
        .route("/analytics-summary", get(http::analytics_summary))
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            obs::http::record_request,
        ))
        .layer(DefaultBodyLimit::max(max_body))
        .with_state(state)
}
