//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → router.rs (route lookup)
//!     → matcher.rs (evaluate prefix)
//!     → Handler::Local (SPA resolver + file server)
//!       or Handler::Proxy (director + transport + cookie rewriter)
//!
//! Route Compilation (at startup):
//!     RouteConfig
//!     → `/` for local files, optional proxy prefix
//!     → Sort by prefix length
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always matches same route

pub mod matcher;
pub mod router;

pub use router::{Handler, Router};
