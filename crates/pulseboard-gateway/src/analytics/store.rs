use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use pulseboard_core::error::Result;
use pulseboard_core::protocol::{
    CampaignRecord, CurrentMetrics, EventKind, Summary, SummaryMetrics, TrackRequest, TrackedEvent,
};

use super::decay;

/// Result of a successful ingest.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub kind: EventKind,
    /// Event name as sent by the caller.
    pub event: String,
    pub at: DateTime<Utc>,
    /// Counters read under the same lock as the mutation.
    pub current: CurrentMetrics,
}

/// All mutable analytics state. Only reachable through `Shared::lock`.
#[derive(Debug, Default)]
pub(crate) struct MetricsState {
    page_views: u64,
    unique_visitors: HashSet<String>,
    conversions: u64,
    engagement: u64,
    real_time_users: u64,
    campaigns: Vec<CampaignRecord>,
    campaign_index: HashMap<String, usize>,
    /// Pending gauge decrements, oldest first. The window is constant so the
    /// queue is always sorted.
    decay_queue: VecDeque<Instant>,
}

impl MetricsState {
    /// Apply one event. Returns true when a decay deadline should be queued.
    fn apply(&mut self, ev: TrackedEvent, now: DateTime<Utc>) -> bool {
        if let Some(visitor) = ev.visitor_id {
            self.unique_visitors.insert(visitor);
        }

        match ev.kind {
            EventKind::PageView => {
                self.page_views += 1;
                self.real_time_users += 1;
                return true;
            }
            EventKind::Conversion => self.conversions += 1,
            EventKind::Engagement => self.engagement += 1,
            EventKind::CampaignStart => {
                if let Some(id) = ev.campaign_id {
                    self.start_campaign(id, now, ev.extra);
                }
            }
            EventKind::CampaignView => self.bump_campaign(ev.campaign_id.as_deref(), |c| c.views += 1),
            EventKind::CampaignClick => self.bump_campaign(ev.campaign_id.as_deref(), |c| c.clicks += 1),
            EventKind::CampaignConversion => {
                self.bump_campaign(ev.campaign_id.as_deref(), |c| c.conversions += 1)
            }
            // Accepted on purpose: unknown kinds only feed unique-visitor tracking.
            EventKind::Unknown(name) => {
                tracing::debug!(event = %name, "unknown event kind ignored");
            }
        }
        false
    }

    /// Create or replace a campaign. A replaced campaign keeps its list position.
    fn start_campaign(&mut self, id: String, now: DateTime<Utc>, extra: Map<String, Value>) {
        let record = CampaignRecord::start(id.clone(), now, extra);
        match self.campaign_index.get(&id).copied() {
            Some(slot) => {
                tracing::info!(campaign = %id, "campaign restarted, counters reset");
                self.campaigns[slot] = record;
            }
            None => {
                self.campaign_index.insert(id, self.campaigns.len());
                self.campaigns.push(record);
            }
        }
    }

    fn bump_campaign(&mut self, id: Option<&str>, f: impl FnOnce(&mut CampaignRecord)) {
        let Some(id) = id else { return; };
        match self.campaign_index.get(id).copied() {
            Some(slot) => f(&mut self.campaigns[slot]),
            None => tracing::debug!(campaign = %id, "event for unknown campaign ignored"),
        }
    }

    fn current(&self) -> CurrentMetrics {
        CurrentMetrics {
            page_views: self.page_views,
            unique_visitors: self.unique_visitors.len() as u64,
            conversions: self.conversions,
            engagement: self.engagement,
            real_time_users: self.real_time_users,
        }
    }
}

/// State shared between the store handle and its decay task.
pub(crate) struct Shared {
    state: Mutex<MetricsState>,
    pub(crate) wake: Notify,
}

impl Shared {
    /// Poisoning is recovered: every field is a plain counter or set and
    /// stays consistent even if a holder panicked.
    fn lock(&self) -> MutexGuard<'_, MetricsState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Pop every deadline `<= now` and decrement the gauge once per deadline
    /// (saturating at zero). Returns the next pending deadline, if any.
    pub(crate) fn expire_due(&self, now: Instant) -> Option<Instant> {
        let mut st = self.lock();
        let mut expired = 0u64;
        while st.decay_queue.front().is_some_and(|d| *d <= now) {
            st.decay_queue.pop_front();
            st.real_time_users = st.real_time_users.saturating_sub(1);
            expired += 1;
        }
        if expired > 0 {
            tracing::trace!(expired, remaining = st.real_time_users, "realtime users decayed");
        }
        st.decay_queue.front().copied()
    }
}

/// In-memory analytics aggregator.
///
/// One instance per process (or per test), injected into request handlers
/// through `AppState`. All mutation goes through `ingest`/`record`; all reads
/// through `summarize` or the counters echoed by `record`.
///
/// Owns a background decay task, so construction must happen inside a Tokio
/// runtime. Dropping the store aborts the task and discards pending decays.
pub struct AnalyticsStore {
    shared: Arc<Shared>,
    window: Duration,
    decay_task: JoinHandle<()>,
}

impl AnalyticsStore {
    pub fn new(window: Duration) -> Self {
        let shared = Arc::new(Shared {
            state: Mutex::new(MetricsState::default()),
            wake: Notify::new(),
        });
        let decay_task = decay::spawn(Arc::clone(&shared));
        Self {
            shared,
            window,
            decay_task,
        }
    }

    pub fn realtime_window(&self) -> Duration {
        self.window
    }

    /// Validate a raw request and record it. Nothing is mutated on failure.
    pub fn ingest(&self, req: TrackRequest) -> Result<Recorded> {
        let ev = req.validate().inspect_err(|e| {
            tracing::debug!(error = %e, "event rejected");
        })?;
        Ok(self.record(ev))
    }

    /// Record a validated event.
    pub fn record(&self, ev: TrackedEvent) -> Recorded {
        let at = Utc::now();
        let kind = ev.kind.clone();
        let event = ev.name.clone();
        tracing::debug!(event = %event, campaign = ?ev.campaign_id, "event recorded");
        if ev.kind.is_campaign_scoped() && ev.campaign_id.is_none() {
            tracing::debug!(event = %event, "campaign event without campaignId, campaigns untouched");
        }

        let current = {
            let mut st = self.shared.lock();
            if st.apply(ev, at) {
                let was_idle = st.decay_queue.is_empty();
                st.decay_queue.push_back(Instant::now() + self.window);
                if was_idle {
                    self.shared.wake.notify_one();
                }
            }
            st.current()
        };

        Recorded {
            kind,
            event,
            at,
            current,
        }
    }

    /// Point-in-time snapshot with derived rates and all campaigns.
    pub fn summarize(&self) -> Summary {
        let st = self.shared.lock();
        Summary {
            metrics: SummaryMetrics::from_current(st.current()),
            campaigns: st.campaigns.clone(),
        }
    }

    /// Run one decay sweep against `now`. The background task does this on
    /// its own; exposed so callers can force a deterministic sweep.
    pub fn expire_due(&self, now: Instant) {
        self.shared.expire_due(now);
    }

    /// Raw counters without rates or campaigns.
    pub fn current(&self) -> CurrentMetrics {
        self.shared.lock().current()
    }

    pub fn campaign_count(&self) -> usize {
        self.shared.lock().campaigns.len()
    }

    /// Page views whose gauge decrement has not fired yet.
    pub fn pending_decays(&self) -> usize {
        self.shared.lock().decay_queue.len()
    }
}

impl Drop for AnalyticsStore {
    fn drop(&mut self) {
        self.decay_task.abort();
    }
}
