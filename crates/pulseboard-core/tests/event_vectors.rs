//! Ingestion envelope vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use pulseboard_core::protocol::{EventKind, TrackRequest};

fn load(name: &str) -> Vec<u8> {
    fs::read(format!("tests/vectors/{name}")).unwrap()
}

#[test]
fn parse_track_min() {
    let ev = TrackRequest::from_slice(&load("track_min.json"))
        .unwrap()
        .validate()
        .unwrap();
    assert_eq!(ev.kind, EventKind::PageView);
    assert_eq!(ev.name, "page_view");
    assert!(ev.visitor_id.is_none());
    assert!(ev.campaign_id.is_none());
    assert!(ev.extra.is_empty());
}

#[test]
fn parse_track_full_ignores_unknown_top_level_fields() {
    let ev = TrackRequest::from_slice(&load("track_full.json"))
        .unwrap()
        .validate()
        .unwrap();
    assert_eq!(ev.kind, EventKind::CampaignStart);
    assert_eq!(ev.visitor_id.as_deref(), Some("visitor-42"));
    assert_eq!(ev.campaign_id.as_deref(), Some("spring-launch"));
    assert_eq!(ev.extra["channel"], "email");
    assert_eq!(ev.extra["budget"], 1200);
}

#[test]
fn missing_event_is_bad_request() {
    let err = TrackRequest::from_slice(&load("track_missing_event.json"))
        .unwrap()
        .validate()
        .expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn empty_object_is_bad_request() {
    let err = TrackRequest::from_slice(b"{}")
        .unwrap()
        .validate()
        .expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
    assert!(err.to_string().contains("event is required"));
}

#[test]
fn falsy_event_is_bad_request() {
    let bodies: [&[u8]; 4] = [
        br#"{"event":""}"#,
        br#"{"event":null}"#,
        br#"{"event":false}"#,
        br#"{"event":0}"#,
    ];
    for body in bodies {
        let err = TrackRequest::from_slice(body)
            .unwrap()
            .validate()
            .expect_err("must fail");
        assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
    }
}

#[test]
fn whitespace_event_is_an_unknown_kind() {
    let ev = TrackRequest::from_slice(br#"{"event":"   "}"#)
        .unwrap()
        .validate()
        .unwrap();
    assert_eq!(ev.kind, EventKind::Unknown("   ".into()));
    assert_eq!(ev.name, "   ");
}

#[test]
fn non_string_event_is_an_unknown_kind() {
    let ev = TrackRequest::from_slice(br#"{"event":7}"#)
        .unwrap()
        .validate()
        .unwrap();
    assert_eq!(ev.kind.label(), "unknown");
    assert_eq!(ev.name, "7");
}

#[test]
fn non_object_data_is_ignored() {
    let ev = TrackRequest::from_slice(&load("track_bad_data.json"))
        .unwrap()
        .validate()
        .unwrap();
    assert_eq!(ev.kind, EventKind::CampaignStart);
    assert_eq!(ev.campaign_id.as_deref(), Some("c1"));
    assert!(ev.extra.is_empty());

    let ev = TrackRequest::from_slice(br#"{"event":"page_view","data":"x"}"#)
        .unwrap()
        .validate()
        .unwrap();
    assert_eq!(ev.kind, EventKind::PageView);
    assert!(ev.extra.is_empty());
}

#[test]
fn numeric_ids_are_kept_as_text() {
    let ev = TrackRequest::from_slice(br#"{"event":"campaign_view","userId":42,"campaignId":7}"#)
        .unwrap()
        .validate()
        .unwrap();
    assert_eq!(ev.visitor_id.as_deref(), Some("42"));
    assert_eq!(ev.campaign_id.as_deref(), Some("7"));
}

#[test]
fn wrongly_typed_ids_are_absent() {
    let ev = TrackRequest::from_slice(br#"{"event":"page_view","userId":0,"campaignId":{"a":1}}"#)
        .unwrap()
        .validate()
        .unwrap();
    assert!(ev.visitor_id.is_none());
    assert!(ev.campaign_id.is_none());
}

#[test]
fn malformed_json_is_bad_request() {
    let err = TrackRequest::from_slice(b"{\"event\":").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn empty_ids_are_treated_as_absent() {
    let ev = TrackRequest::from_slice(br#"{"event":"campaign_view","userId":"","campaignId":""}"#)
        .unwrap()
        .validate()
        .unwrap();
    assert!(ev.visitor_id.is_none());
    assert!(ev.campaign_id.is_none());
}

#[test]
fn unknown_kind_is_accepted_and_echoed_verbatim() {
    let ev = TrackRequest::from_slice(br#"{"event":"newsletter_signup"}"#)
        .unwrap()
        .validate()
        .unwrap();
    assert_eq!(ev.kind, EventKind::Unknown("newsletter_signup".into()));
    assert_eq!(ev.kind.label(), "unknown");
    assert_eq!(ev.name, "newsletter_signup");
}

#[test]
fn campaign_scope() {
    assert!(EventKind::parse("campaign_click").is_campaign_scoped());
    assert!(!EventKind::parse("page_view").is_campaign_scoped());
    assert!(!EventKind::parse("campaign_pause").is_campaign_scoped());
}
