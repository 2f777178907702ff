//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → access log → static headers
//!     → routing layer decides local files or proxy
//!     → response.rs (proxy failures mapped to 502/504)
//!     → Send to client
//! ```

pub mod response;
pub mod server;

pub use server::HttpServer;
