//! Ingestion envelope (JSON) and event vocabulary.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{PulseError, Result};

/// Event kinds understood by the aggregator.
///
/// Anything else parses to `Unknown`: accepted by the store, counted by no
/// field. This permissive arm is intentional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    PageView,
    Conversion,
    Engagement,
    CampaignStart,
    CampaignView,
    CampaignClick,
    CampaignConversion,
    Unknown(String),
}

impl EventKind {
    pub fn parse(s: &str) -> Self {
        match s {
            "page_view" => EventKind::PageView,
            "conversion" => EventKind::Conversion,
            "engagement" => EventKind::Engagement,
            "campaign_start" => EventKind::CampaignStart,
            "campaign_view" => EventKind::CampaignView,
            "campaign_click" => EventKind::CampaignClick,
            "campaign_conversion" => EventKind::CampaignConversion,
            other => EventKind::Unknown(other.to_string()),
        }
    }

    /// Wire name. Unknown kinds report `"unknown"` so metric labels stay bounded.
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::PageView => "page_view",
            EventKind::Conversion => "conversion",
            EventKind::Engagement => "engagement",
            EventKind::CampaignStart => "campaign_start",
            EventKind::CampaignView => "campaign_view",
            EventKind::CampaignClick => "campaign_click",
            EventKind::CampaignConversion => "campaign_conversion",
            EventKind::Unknown(_) => "unknown",
        }
    }

    pub fn is_campaign_scoped(&self) -> bool {
        matches!(
            self,
            EventKind::CampaignStart
                | EventKind::CampaignView
                | EventKind::CampaignClick
                | EventKind::CampaignConversion
        )
    }
}

/// `POST /analytics-events` body.
///
/// Unknown top-level fields are ignored. Fields are kept as raw JSON values:
/// a wrongly typed id or `data` is dropped, a non-string `event` becomes an
/// unknown kind. Only a missing or falsy `event` is rejected.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRequest {
    #[serde(default)]
    pub event: Option<Value>,
    /// Visitor id used for unique-visitor tracking.
    #[serde(default)]
    pub user_id: Option<Value>,
    #[serde(default)]
    pub campaign_id: Option<Value>,
    /// Extra fields merged into a new campaign record on `campaign_start`.
    /// Only an object is used; any other value is ignored.
    #[serde(default)]
    pub data: Option<Value>,
}

impl TrackRequest {
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body)
            .map_err(|e| PulseError::BadRequest(format!("invalid event body: {e}")))
    }

    /// Validate and normalize.
    ///
    /// `event` must be present and truthy (not `null`, `false`, `0`, or `""`).
    /// A non-string `event` is kept as its JSON text and parses to
    /// `EventKind::Unknown`. Ids accept non-empty strings and non-zero numbers.
    pub fn validate(self) -> Result<TrackedEvent> {
        let (kind, name) = match self.event {
            Some(Value::String(s)) if !s.is_empty() => (EventKind::parse(&s), s),
            Some(v) if is_truthy(&v) => {
                let text = v.to_string();
                (EventKind::Unknown(text.clone()), text)
            }
            _ => return Err(PulseError::BadRequest("event is required".into())),
        };

        let extra = match self.data {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };

        Ok(TrackedEvent {
            kind,
            name,
            visitor_id: self.user_id.and_then(id_text),
            campaign_id: self.campaign_id.and_then(id_text),
            extra,
        })
    }
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Id from a raw value: non-empty strings verbatim, non-zero numbers as text.
fn id_text(v: Value) -> Option<String> {
    match v {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
        _ => None,
    }
}

/// A validated event, ready for the store.
#[derive(Debug, Clone)]
pub struct TrackedEvent {
    pub kind: EventKind,
    /// Event name exactly as sent, echoed back to the caller.
    pub name: String,
    pub visitor_id: Option<String>,
    pub campaign_id: Option<String>,
    pub extra: Map<String, Value>,
}

impl TrackedEvent {
    /// Shorthand for tests and internal callers.
    pub fn new(kind: &str) -> Self {
        Self {
            kind: EventKind::parse(kind),
            name: kind.to_string(),
            visitor_id: None,
            campaign_id: None,
            extra: Map::new(),
        }
    }

    pub fn visitor(mut self, id: impl Into<String>) -> Self {
        self.visitor_id = Some(id.into());
        self
    }

    pub fn campaign(mut self, id: impl Into<String>) -> Self {
        self.campaign_id = Some(id.into());
        self
    }

    pub fn with_extra(mut self, extra: Map<String, Value>) -> Self {
        self.extra = extra;
        self
    }
}
