//! Analytics wire formats.
//!
//! - `event`: the ingestion body (`TrackRequest`) and the `EventKind` vocabulary.
//! - `summary`: counter snapshots, campaign records, and response envelopes.
//!
//! Parsing is panic-free: a malformed event is reported as `PulseError`
//! so a bad client can never take the aggregator down.

pub mod event;
pub mod summary;
pub mod timestamp;

pub use event::{EventKind, TrackRequest, TrackedEvent};
pub use summary::{
    rate, CampaignRecord, CurrentMetrics, Summary, SummaryMetrics, SummaryResponse, TrackResponse,
};
