//! Lightweight in-process service metrics.
//!
//! Counters are stored as atomics, rendered by the `/metrics` handler, and
//! fed by the request middleware in `http`.

pub mod http;
pub mod metrics;

pub use metrics::ServiceMetrics;
