//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store the registered prefixes and their handlers
//! - Look up the handler for a request
//! - Dispatch to the local file chain or the proxy chain
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Longest prefix wins; the proxy prefix beats the `/` catch-all
//! - Explicit no-match (404) for targets that are not paths, e.g. `*`

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
};

use crate::proxy::ProxyHandler;
use crate::routing::matcher::{Matcher, PathPrefixMatcher};
use crate::statics::StaticFiles;

/// Prefix the local file chain is registered under.
pub const ROOT: &str = "/";

/// The two handler chains a request can end up in.
#[derive(Clone)]
pub enum Handler {
    Local(StaticFiles),
    Proxy(ProxyHandler),
}

impl Handler {
    /// Run the chain this handler stands for.
    pub async fn handle(&self, request: Request<Body>) -> Response {
        match self {
            Handler::Local(files) => files.handle(request).await,
            Handler::Proxy(proxy) => proxy.handle(request).await,
        }
    }
}

/// Prefix-based dispatcher over the local and proxy chains.
pub struct Router {
    routes: Vec<(PathPrefixMatcher, Handler)>,
}

impl Router {
    /// Create a new router. The local chain owns `/`; the proxy, when
    /// configured, owns its prefix.
    pub fn new(local: StaticFiles, proxy: Option<ProxyHandler>) -> Self {
        let mut routes = Vec::with_capacity(2);
        if let Some(proxy) = proxy {
            routes.push((PathPrefixMatcher::new(proxy.prefix()), Handler::Proxy(proxy)));
        }
        routes.push((PathPrefixMatcher::new(ROOT), Handler::Local(local)));

        // Stable sort: on equal length the proxy, registered first, stays ahead.
        routes.sort_by(|(a, _), (b, _)| b.specificity().cmp(&a.specificity()));

        Self { routes }
    }

    /// Find the handler for `request`, most specific prefix first.
    pub fn route(&self, request: &Request<Body>) -> Option<&Handler> {
        self.routes
            .iter()
            .find(|(matcher, _)| matcher.matches(request))
            .map(|(_, handler)| handler)
    }

    /// Hand `request` to its handler, or answer 404 when nothing matches.
    pub async fn dispatch(&self, request: Request<Body>) -> Response {
        match self.route(&request) {
            Some(handler) => handler.handle(request).await,
            None => {
                tracing::warn!(uri = %request.uri(), "No route matched");
                (StatusCode::NOT_FOUND, "No matching route found").into_response()
            }
        }
    }
}
