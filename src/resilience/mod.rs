//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to upstream:
//!     → timeouts.rs (optional round-trip deadline)
//!     → On failure: error mapped to 502/504, other requests unaffected
//! ```
//!
//! # Design Decisions
//! - No retries and no request buffering; the body streams once
//! - A hung upstream only blocks its own request

pub mod timeouts;
