//! Header manipulation.
//!
//! # Responsibilities
//! - Set the configured static headers on every response
//! - Add X-Forwarded-For to forwarded requests
//! - Strip hop-by-hop headers in both directions of the proxy
//!
//! # Design Decisions
//! - Static headers overwrite, never append, so applying twice is harmless
//! - Header names and values are validated at startup, not per request

use std::collections::BTreeMap;
use std::net::IpAddr;

use axum::http::{header, HeaderMap, HeaderName, HeaderValue};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::validation::ValidationError;

/// Headers connection-specific to a single transport hop (RFC 9110 §7.6.1).
static HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

static X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

/// The fixed set of headers injected into every response.
#[derive(Debug, Clone, Default)]
pub struct StaticHeaders {
    headers: Vec<(HeaderName, HeaderValue)>,
}

impl StaticHeaders {
    /// Convert the configured map into typed headers.
    pub fn from_config(headers: &BTreeMap<String, String>) -> Result<Self, ValidationError> {
        let headers = headers
            .iter()
            .map(|(name, value)| -> Result<_, ValidationError> {
                let name = HeaderName::from_bytes(name.as_bytes())
                    .map_err(|_| ValidationError::HeaderName(name.clone()))?;
                let value = HeaderValue::from_str(value)
                    .map_err(|_| ValidationError::HeaderValue(name.as_str().to_string()))?;
                Ok((name, value))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { headers })
    }

    /// One overriding layer per header; each replaces whatever value the
    /// inner service produced.
    pub fn layers(&self) -> impl Iterator<Item = SetResponseHeaderLayer<HeaderValue>> + '_ {
        self.headers
            .iter()
            .map(|(name, value)| SetResponseHeaderLayer::overriding(name.clone(), value.clone()))
    }
}

/// Remove hop-by-hop headers, including any named by `Connection`.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    let listed: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .filter_map(|name| HeaderName::from_bytes(name.trim().as_bytes()).ok())
        .collect();

    for name in listed.iter().chain(HOP_BY_HOP.iter()) {
        headers.remove(name);
    }
}

/// Append the client address to `X-Forwarded-For`.
pub fn append_forwarded_for(headers: &mut HeaderMap, client: IpAddr) {
    let prior = headers
        .get_all(&X_FORWARDED_FOR)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect::<Vec<_>>()
        .join(", ");

    let chain = if prior.is_empty() {
        client.to_string()
    } else {
        format!("{}, {}", prior, client)
    };

    if let Ok(value) = HeaderValue::from_str(&chain) {
        headers.insert(X_FORWARDED_FOR.clone(), value);
    }
}
