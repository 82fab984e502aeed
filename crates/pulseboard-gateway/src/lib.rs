//! pulseboard gateway library entry.
//!
//! Wires config, the analytics store, service metrics, and HTTP transport
//! into one axum service. Consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod analytics;
pub mod app_state;
pub mod config;
pub mod obs;
pub mod ops;
pub mod router;
pub mod transport;
