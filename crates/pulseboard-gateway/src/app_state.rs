//! Shared application state.
//!
//! The analytics store is constructed here and injected into every handler;
//! there is no process-global state, so tests can build isolated instances.

use std::sync::Arc;

use crate::analytics::AnalyticsStore;
use crate::config::AppConfig;
use crate::obs::ServiceMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    analytics: Arc<AnalyticsStore>,
    metrics: Arc<ServiceMetrics>,
}

struct AppStateInner {
    cfg: AppConfig,
}

impl AppState {
    /// Build application state. Must run inside a Tokio runtime (the store
    /// spawns its decay task).
    pub fn new(cfg: AppConfig) -> Self {
        let analytics = Arc::new(AnalyticsStore::new(cfg.analytics.realtime_window()));
        Self {
            inner: Arc::new(AppStateInner { cfg }),
            analytics,
            metrics: Arc::new(ServiceMetrics::default()),
        }
    }

    pub fn cfg(&self) -> &AppConfig {
        &self.inner.cfg
    }

    pub fn analytics(&self) -> Arc<AnalyticsStore> {
        Arc::clone(&self.analytics)
    }

    pub fn metrics(&self) -> Arc<ServiceMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Store-derived gauges appended to `/metrics`.
    pub fn metrics_gauges(&self) -> Vec<(&'static str, u64)> {
        let store = &self.analytics;
        vec![
            ("pulseboard_realtime_users", store.current().real_time_users),
            ("pulseboard_campaigns_tracked", store.campaign_count() as u64),
            ("pulseboard_decay_pending", store.pending_decays() as u64),
        ]
    }
}
