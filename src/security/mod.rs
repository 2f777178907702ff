//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Every response:
//!     → headers.rs (configured static headers, overwriting)
//!
//! Proxied traffic:
//!     → headers.rs (strip hop-by-hop, add X-Forwarded-For)
//! ```

pub mod headers;
