//! Counter snapshots, campaign records, and HTTP response envelopes.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use super::timestamp;

/// Field names owned by `CampaignRecord`; extra data may not shadow them.
pub const RESERVED_CAMPAIGN_FIELDS: [&str; 5] = ["id", "startTime", "views", "clicks", "conversions"];

/// Per-campaign counters plus caller-supplied fields captured at `campaign_start`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignRecord {
    pub id: String,
    #[serde(serialize_with = "timestamp::serialize")]
    pub start_time: DateTime<Utc>,
    pub views: u64,
    pub clicks: u64,
    pub conversions: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CampaignRecord {
    /// Fresh record with zeroed counters. Reserved keys in `extra` are dropped.
    pub fn start(id: String, start_time: DateTime<Utc>, mut extra: Map<String, Value>) -> Self {
        extra.retain(|k, _| !RESERVED_CAMPAIGN_FIELDS.contains(&k.as_str()));
        Self {
            id,
            start_time,
            views: 0,
            clicks: 0,
            conversions: 0,
            extra,
        }
    }
}

/// Counters echoed back on every ingest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentMetrics {
    pub page_views: u64,
    pub unique_visitors: u64,
    pub conversions: u64,
    pub engagement: u64,
    pub real_time_users: u64,
}

/// Counters plus derived rates (percent, one decimal).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMetrics {
    pub page_views: u64,
    pub unique_visitors: u64,
    pub conversions: u64,
    pub engagement: u64,
    pub real_time_users: u64,
    pub conversion_rate: f64,
    pub engagement_rate: f64,
}

impl SummaryMetrics {
    pub fn from_current(m: CurrentMetrics) -> Self {
        Self {
            page_views: m.page_views,
            unique_visitors: m.unique_visitors,
            conversions: m.conversions,
            engagement: m.engagement,
            real_time_users: m.real_time_users,
            conversion_rate: rate(m.conversions, m.page_views),
            engagement_rate: rate(m.engagement, m.page_views),
        }
    }
}

/// `part / whole * 100`, rounded to one decimal place; `0.0` when `whole == 0`.
///
/// Rounds the exact binary value of the quotient, ties away from zero, so
/// `rate(3, 2000)` (0.1499...) is `0.1`, not `0.2`.
pub fn rate(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let pct = part as f64 / whole as f64 * 100.0;
    round_one_decimal(pct)
}

fn round_one_decimal(x: f64) -> f64 {
    // The only doubles sitting exactly on a one-decimal tie end in .25 or
    // .75, i.e. `x * 4` is an odd integer (scaling by 4 is exact).
    let quarters = x * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
        return (x * 10.0).ceil() / 10.0;
    }
    // `{:.1}` rounds the exact decimal expansion; ties are handled above.
    format!("{x:.1}").parse::<f64>().unwrap_or(0.0)
}

/// Point-in-time view of the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub metrics: SummaryMetrics,
    /// Campaign records in insertion order.
    pub campaigns: Vec<CampaignRecord>,
}

/// `POST /analytics-events` success body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackResponse {
    pub success: bool,
    pub event: String,
    #[serde(serialize_with = "timestamp::serialize")]
    pub timestamp: DateTime<Utc>,
    pub current_metrics: CurrentMetrics,
}

/// `GET /analytics-summary` body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub success: bool,
    pub metrics: SummaryMetrics,
    pub campaigns: Vec<CampaignRecord>,
    #[serde(serialize_with = "timestamp::serialize")]
    pub timestamp: DateTime<Utc>,
}

impl SummaryResponse {
    pub fn new(summary: Summary, timestamp: DateTime<Utc>) -> Self {
        Self {
            success: true,
            metrics: summary.metrics,
            campaigns: summary.campaigns,
            timestamp,
        }
    }
}
