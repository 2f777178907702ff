//! Local file serving.
//!
//! # Data Flow
//! ```text
//! Request outside the proxy prefix
//!     → resolver.rs (does the file exist? else substitute the fallback)
//!     → service.rs (hand the effective path to ServeDir)
//!     → Response to client
//! ```

pub mod resolver;
pub mod service;

pub use resolver::SpaResolver;
pub use service::StaticFiles;
