//! Upstream HTTP transport.
//!
//! The proxy handler only needs "send this request, give me the response".
//! [`Transport`] is that seam; [`HyperTransport`] is the production
//! implementation on hyper-util's pooled client, and tests plug in their own.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use futures_util::future::BoxFuture;
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::proxy::ProxyError;
use crate::resilience::timeouts::with_deadline;

/// Performs one request/response exchange with the upstream.
pub trait Transport: Send + Sync + 'static {
    fn round_trip(&self, request: Request<Body>) -> BoxFuture<'static, Result<Response<Body>, ProxyError>>;
}

/// Pooled HTTP/1.1 client with an optional round-trip deadline.
///
/// The response future is owned by the request task. If the client goes
/// away, hyper drops that task and the upstream exchange is aborted with it.
#[derive(Clone)]
pub struct HyperTransport {
    client: Client<HttpConnector, Body>,
    deadline: Option<Duration>,
}

impl HyperTransport {
    pub fn new(deadline: Option<Duration>) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self { client, deadline }
    }
}

impl Transport for HyperTransport {
    fn round_trip(&self, request: Request<Body>) -> BoxFuture<'static, Result<Response<Body>, ProxyError>> {
        let client = self.client.clone();
        let deadline = self.deadline;

        Box::pin(async move {
            let response: Response<Incoming> = with_deadline(deadline, client.request(request)).await??;
            Ok(response.map(Body::new))
        })
    }
}
