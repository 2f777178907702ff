//! Reverse proxy subsystem.
//!
//! # Data Flow
//! ```text
//! Request under the proxy prefix
//!     → handler.rs (strip hop-by-hop, add X-Forwarded-For)
//!     → director.rs (strip prefix, point at origin, set Host)
//!     → transport.rs (round trip to the upstream)
//!     → cookies.rs (re-scope Set-Cookie paths under the prefix)
//!     → Response to client
//! ```
//!
//! # Design Decisions
//! - One upstream origin, configured at startup
//! - Bodies stream through in both directions, nothing is buffered
//! - Upstream failures become 502/504 for that request only

use std::time::Duration;

pub mod cookies;
pub mod director;
pub mod handler;
pub mod transport;

pub use handler::ProxyHandler;
pub use transport::{HyperTransport, Transport};

/// Per-request failure of the proxy path.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// Connecting to or talking with the upstream failed.
    #[error("upstream request failed: {0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),

    /// No response within the configured deadline.
    #[error("upstream did not answer within {0:?}")]
    Timeout(Duration),

    /// The outbound URI could not be built.
    #[error("invalid upstream target: {0}")]
    InvalidTarget(String),
}
