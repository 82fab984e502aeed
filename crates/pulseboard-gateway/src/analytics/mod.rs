//! In-process analytics aggregator.
//!
//! Event counters, unique-visitor tracking, per-campaign metrics, and a
//! time-decayed real-time users gauge. Single process, in memory, best effort:
//! nothing here survives a restart.

mod decay;
mod store;

pub use store::{AnalyticsStore, Recorded};
