//! Configuration schema definitions.
//!
//! `RouteConfig` is built once at startup (defaults, then an optional TOML
//! file, then command-line flags) and is read-only afterwards. Every request
//! handler sees it through an `Arc`, so no locking is involved.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

/// Root configuration for the edge server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouteConfig {
    /// Listen address, e.g. `:8080`, `127.0.0.1:8080` or `localhost:8080`.
    pub listen: String,

    /// Directory served for every request outside the proxy prefix.
    pub serve_path: PathBuf,

    /// Resource served when the requested one does not exist (SPA routing).
    pub fallback: Option<String>,

    /// Headers set on every response. Keys are unique.
    pub headers: BTreeMap<String, String>,

    /// Path prefix that is forwarded upstream.
    pub proxy_from: Option<String>,

    /// Upstream origin receiving the forwarded requests.
    pub proxy_to: Option<Url>,

    /// Deadline for a single upstream round trip. `None` waits forever.
    pub upstream_timeout_secs: Option<u64>,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            listen: ":8080".to_string(),
            serve_path: PathBuf::from("./"),
            fallback: None,
            headers: BTreeMap::new(),
            proxy_from: None,
            proxy_to: None,
            upstream_timeout_secs: None,
            log_level: "info".to_string(),
        }
    }
}

/// The proxy half of the configuration, present only when both ends are set.
#[derive(Debug, Clone, Copy)]
pub struct ProxyRoute<'a> {
    pub prefix: &'a str,
    pub origin: &'a Url,
}

impl RouteConfig {
    /// The `host:port` to bind. A bare `:port` binds every interface; a host
    /// name is resolved when the listener binds.
    pub fn listen_addr(&self) -> String {
        if self.listen.starts_with(':') {
            format!("0.0.0.0{}", self.listen)
        } else {
            self.listen.clone()
        }
    }

    /// The proxy route, if both the prefix and the origin are configured.
    pub fn proxy(&self) -> Option<ProxyRoute<'_>> {
        match (&self.proxy_from, &self.proxy_to) {
            (Some(prefix), Some(origin)) => Some(ProxyRoute { prefix, origin }),
            _ => None,
        }
    }

    /// Deadline for a single upstream round trip.
    pub fn upstream_timeout(&self) -> Option<Duration> {
        self.upstream_timeout_secs.map(Duration::from_secs)
    }
}
