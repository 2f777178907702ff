//! Startup orchestration.
//!
//! # Responsibilities
//! - Bind the listener only after the configuration validated
//! - Announce the effective configuration
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use std::io;

use tokio::net::TcpListener;

use crate::config::RouteConfig;
use crate::observability::logging;

/// Bind the configured address and log the startup banner.
pub async fn bind(config: &RouteConfig) -> io::Result<TcpListener> {
    let listener = TcpListener::bind(config.listen_addr()).await?;
    logging::log_startup(&listener.local_addr()?, config);

    Ok(listener)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_resolves_host_name() {
        let config = RouteConfig {
            listen: "localhost:0".into(),
            ..Default::default()
        };
        let listener = bind(&config).await.unwrap();
        let addr = listener.local_addr().unwrap();

        assert!(addr.ip().is_loopback());
        assert_ne!(addr.port(), 0);
    }
}
