//! Transport layer (HTTP).
//!
//! Handlers decode the request body once, hand validated events to the
//! analytics store, and map `PulseError` onto HTTP responses.

pub mod error;
pub mod http;

pub use error::ApiError;
