//! pulseboard core: transport-agnostic analytics contracts and error types.
//!
//! This crate defines the event wire format, the event vocabulary, and the
//! response shapes shared by the gateway and its tests. It carries no HTTP or
//! runtime dependencies so the contracts can be reused by other front ends.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed events surface as `PulseError::BadRequest` instead of panicking.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{Result, PulseError};
