//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!
//! Events of note:
//!     → every request (method, uri) before routing
//!     → SPA substitutions (requested, fallback)
//!     → proxy rewrites (from, to) and upstream failures
//! ```
//!
//! # Design Decisions
//! - Structured logging through tracing
//! - Logging is fire-and-forget; no handler depends on it

pub mod logging;
