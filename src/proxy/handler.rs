//! Proxy handler chain: director → transport → cookie rewriter.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::Request,
    response::{IntoResponse, Response},
};
use url::Url;

use crate::proxy::{cookies, director, transport::Transport, ProxyError};
use crate::security::headers::{append_forwarded_for, strip_hop_by_hop};

/// Forwards requests under `prefix` to `origin`.
#[derive(Clone)]
pub struct ProxyHandler {
    prefix: String,
    origin: Url,
    transport: Arc<dyn Transport>,
}

impl ProxyHandler {
    /// Create a new proxy handler.
    pub fn new(prefix: impl Into<String>, origin: Url, transport: Arc<dyn Transport>) -> Self {
        Self {
            prefix: prefix.into(),
            origin,
            transport,
        }
    }

    /// Prefix this handler is mounted under.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Forward `request` and map any failure to a gateway response.
    pub async fn handle(&self, request: Request<Body>) -> Response {
        let uri = request.uri().clone();

        match self.forward(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(uri = %uri, origin = %self.origin, error = %e, "Upstream request failed");
                e.into_response()
            }
        }
    }

    async fn forward(&self, mut request: Request<Body>) -> Result<Response, ProxyError> {
        let client = request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());

        strip_hop_by_hop(request.headers_mut());
        if let Some(ip) = client {
            append_forwarded_for(request.headers_mut(), ip);
        }

        let outbound = director::direct(request, &self.prefix, &self.origin)?;
        let mut response = self.transport.round_trip(outbound).await?;

        strip_hop_by_hop(response.headers_mut());
        Ok(cookies::rewrite(response, &self.prefix))
    }
}
