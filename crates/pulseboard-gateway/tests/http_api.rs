#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use pulseboard_gateway::{app_state::AppState, config, router};

fn app() -> Router {
    let cfg = config::load_from_str("version: 1\nserver:\n  max_body_bytes: 1024\n").unwrap();
    router::build_router(AppState::new(cfg))
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn post_event(app: &Router, body: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(Method::POST)
        .uri("/analytics-events")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, bytes) = send(app, req).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let (status, bytes) = send(app, req).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn track_event_echoes_current_metrics() {
    let app = app();
    let (status, v) = post_event(&app, json!({ "event": "page_view", "userId": "v-1" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["success"], true);
    assert_eq!(v["event"], "page_view");
    assert!(v["timestamp"].as_str().unwrap().ends_with('Z'));
    assert_eq!(
        v["currentMetrics"],
        json!({
            "pageViews": 1,
            "uniqueVisitors": 1,
            "conversions": 0,
            "engagement": 0,
            "realTimeUsers": 1
        })
    );
}

#[tokio::test]
async fn missing_event_is_400_and_counts_nothing() {
    let app = app();
    let (status, v) = post_event(&app, json!({ "userId": "v-1" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(v["success"], false);
    assert_eq!(v["error"], "BAD_REQUEST");

    let (_, summary) = get_json(&app, "/analytics-summary").await;
    assert_eq!(summary["metrics"]["uniqueVisitors"], 0);
}

#[tokio::test]
async fn malformed_json_is_400() {
    let app = app();
    let req = Request::builder()
        .method(Method::POST)
        .uri("/analytics-events")
        .body(Body::from("{\"event\":"))
        .unwrap();
    let (status, bytes) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let v: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(v["error"], "BAD_REQUEST");
}

#[tokio::test]
async fn oversized_body_is_413() {
    let app = app();
    let padding = "x".repeat(4096);
    let (status, v) = post_event(&app, json!({ "event": "page_view", "pad": padding })).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(v["error"], "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn summary_reports_rates_and_campaigns() {
    let app = app();
    for _ in 0..4 {
        post_event(&app, json!({ "event": "page_view" })).await;
    }
    post_event(&app, json!({ "event": "conversion" })).await;
    post_event(
        &app,
        json!({
            "event": "campaign_start",
            "campaignId": "spring",
            "data": { "name": "Spring Launch", "views": 99 }
        }),
    )
    .await;
    post_event(&app, json!({ "event": "campaign_view", "campaignId": "spring" })).await;
    post_event(&app, json!({ "event": "campaign_view", "campaignId": "ghost" })).await;

    let (status, v) = get_json(&app, "/analytics-summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["success"], true);
    assert_eq!(v["metrics"]["pageViews"], 4);
    assert_eq!(v["metrics"]["realTimeUsers"], 4);
    assert_eq!(v["metrics"]["conversionRate"], 25.0);
    assert_eq!(v["metrics"]["engagementRate"], 0.0);

    let campaigns = v["campaigns"].as_array().unwrap();
    assert_eq!(campaigns.len(), 1);
    assert_eq!(campaigns[0]["id"], "spring");
    assert_eq!(campaigns[0]["name"], "Spring Launch");
    assert_eq!(campaigns[0]["views"], 1);
    assert!(campaigns[0]["startTime"].is_string());
}

#[tokio::test]
async fn unknown_event_is_accepted() {
    let app = app();
    let (status, v) = post_event(&app, json!({ "event": "video_play" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["event"], "video_play");
    assert_eq!(v["currentMetrics"]["pageViews"], 0);
}

#[tokio::test]
async fn loosely_typed_fields_are_tolerated() {
    let app = app();
    let (status, v) = post_event(&app, json!({ "event": "page_view", "data": "x" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["currentMetrics"]["pageViews"], 1);

    let (status, _) = post_event(&app, json!({ "event": "page_view", "userId": 42 })).await;
    assert_eq!(status, StatusCode::OK);

    let (status, v) = post_event(&app, json!({ "event": 7 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["event"], "7");

    let (status, v) = post_event(&app, json!({ "event": "   " })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["event"], "   ");

    let (_, summary) = get_json(&app, "/analytics-summary").await;
    assert_eq!(summary["metrics"]["pageViews"], 2);
    assert_eq!(summary["metrics"]["uniqueVisitors"], 1);
}

#[tokio::test]
async fn healthz_ok() {
    let (status, v) = get_json(&app(), "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["status"], "ok");
}

#[tokio::test]
async fn metrics_exposes_service_counters() {
    let app = app();
    post_event(&app, json!({ "event": "page_view" })).await;
    post_event(&app, json!({ "event": "video_play" })).await;
    post_event(&app, json!({})).await;

    let req = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
    let (status, bytes) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(bytes).unwrap();

    assert!(text.contains("pulseboard_events_total{kind=\"page_view\"} 1"));
    assert!(text.contains("pulseboard_events_total{kind=\"unknown\"} 1"));
    assert!(text.contains("pulseboard_validation_rejections_total{reason=\"missing_event\"} 1"));
    assert!(text.contains("pulseboard_http_requests_total{route=\"/analytics-events\",status=\"200\"} 2"));
    assert!(text.contains("pulseboard_realtime_users 1"));
    assert!(text.contains("pulseboard_decay_pending 1"));
}
