//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Log every request before it is dispatched
//! - Announce the effective configuration at startup
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Log level from config, overridable with RUST_LOG
//! - The fmt layer colors output itself when attached to a terminal

use std::net::SocketAddr;

use axum::{body::Body, http::Request};
use tower_http::trace::{DefaultMakeSpan, HttpMakeClassifier, TraceLayer};
use tracing::{Level, Span};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::RouteConfig;

/// Install the global subscriber.
pub fn init(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("edge_server={},tower_http=warn", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Trace layer whose request hook is the access log.
pub type AccessLog = TraceLayer<HttpMakeClassifier, DefaultMakeSpan, fn(&Request<Body>, &Span)>;

/// Build the access log layer. Installed outermost, so the request line is
/// logged before routing picks a handler.
pub fn access_log() -> AccessLog {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(log_request as fn(&Request<Body>, &Span))
}

fn log_request(request: &Request<Body>, _span: &Span) {
    tracing::info!(method = %request.method(), uri = %request.uri(), "Request");
}

/// Announce what the server is about to do.
pub fn log_startup(addr: &SocketAddr, config: &RouteConfig) {
    tracing::info!(
        address = %addr,
        path = %config.serve_path.display(),
        "Starting server"
    );

    for (name, value) in &config.headers {
        tracing::info!(header = %name, value = %value, "Adding header");
    }

    if let Some(fallback) = &config.fallback {
        tracing::info!(fallback = %fallback, "SPA fallback enabled");
    }

    if let Some(proxy) = config.proxy() {
        tracing::info!(from = %proxy.prefix, to = %proxy.origin, "Proxy enabled");
    }

    if let Some(timeout) = config.upstream_timeout() {
        tracing::info!(timeout = ?timeout, "Upstream timeout set");
    }
}
