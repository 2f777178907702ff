//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults
//!     → optional TOML file (loader.rs)
//!     → command-line flags (args.rs)
//!     → validation.rs (semantic checks)
//!     → RouteConfig (validated, immutable)
//!     → shared via Arc to every handler
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - All fields have defaults to allow running with no flags at all
//! - Validation separates syntactic (serde/clap) from semantic checks

pub mod args;
pub mod loader;
pub mod schema;
pub mod validation;

pub use args::Cli;
pub use loader::ConfigError;
pub use schema::{ProxyRoute, RouteConfig};
