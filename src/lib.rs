//! Static-asset edge server.
//!
//! Serves a directory over HTTP with three additions: fixed response
//! headers, a fallback resource for unknown paths (single-page-application
//! routing), and a reverse proxy for one path prefix that re-scopes the
//! upstream's cookies under that prefix.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ access log ─▶ static headers ─▶ routing::Router
//!                                                        │
//!                          ┌─────────────────────────────┴──────────────┐
//!                          ▼ path starts with proxy prefix              ▼ otherwise
//!                   proxy::director                            statics::resolver
//!                          │                                            │
//!                   proxy::transport ───────▶ Upstream          ServeDir (serve_path)
//!                          │
//!                   proxy::cookies
//! ```

// Core subsystems
pub mod config;
pub mod http;
pub mod proxy;
pub mod routing;
pub mod statics;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod security;

pub use config::RouteConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
