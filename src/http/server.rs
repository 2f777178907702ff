//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the dispatching handler
//! - Wire up middleware (access log, static headers)
//! - Bind server to listener
//! - Dispatch requests to the local file chain or the proxy chain
//! - Drain in-flight requests on shutdown

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{body::Body, extract::State, http::Request, response::Response, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::config::{validation::validate_config, ConfigError, RouteConfig};
use crate::lifecycle::shutdown;
use crate::observability::logging::access_log;
use crate::proxy::{HyperTransport, ProxyHandler, Transport};
use crate::routing::Router as EdgeRouter;
use crate::security::headers::StaticHeaders;
use crate::statics::StaticFiles;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<EdgeRouter>,
}

/// HTTP server for the edge.
pub struct HttpServer {
    router: Router,
    config: Arc<RouteConfig>,
}

impl HttpServer {
    /// Create a server that reaches the upstream over the pooled hyper client.
    pub fn new(config: RouteConfig) -> Result<Self, ConfigError> {
        let transport = Arc::new(HyperTransport::new(config.upstream_timeout()));
        Self::with_transport(config, transport)
    }

    /// Create a server with a caller-supplied upstream transport.
    pub fn with_transport(config: RouteConfig, transport: Arc<dyn Transport>) -> Result<Self, ConfigError> {
        validate_config(&config).map_err(ConfigError::Validation)?;
        let headers = StaticHeaders::from_config(&config.headers)
            .map_err(|e| ConfigError::Validation(vec![e]))?;

        let local = StaticFiles::new(&config.serve_path, config.fallback.as_deref());
        let proxy = config
            .proxy()
            .map(|route| ProxyHandler::new(route.prefix, route.origin.clone(), transport));

        let state = AppState {
            router: Arc::new(EdgeRouter::new(local, proxy)),
        };

        let router = Self::build_router(state, &headers);
        Ok(Self {
            router,
            config: Arc::new(config),
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState, headers: &StaticHeaders) -> Router {
        let router = Router::new().fallback(dispatch).with_state(state);

        headers
            .layers()
            .fold(router, |router, layer| router.layer(layer))
            .layer(access_log())
    }

    /// The assembled application, for driving it without a socket.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RouteConfig {
        &self.config
    }

    /// Serve connections from `listener` until `stop` fires, then drain.
    pub async fn run(self, listener: TcpListener, stop: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown::wait(stop))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Single entry point behind the middleware stack.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    state.router.dispatch(request).await
}
