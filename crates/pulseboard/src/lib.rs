//! Top-level facade crate for pulseboard.
//!
//! Re-exports core contracts and the gateway library so users can depend on a single crate.

pub mod core {
    pub use pulseboard_core::*;
}

pub mod gateway {
    pub use pulseboard_gateway::*;
}
