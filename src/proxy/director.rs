//! Outbound request construction.
//!
//! The director turns an inbound request into the one sent upstream: the
//! configured prefix is cut off the path exactly once, scheme and authority
//! come from the origin, and `Host` names the origin so virtual-hosted
//! upstreams route correctly. Method, query, body and the remaining headers
//! pass through untouched.

use axum::body::Body;
use axum::http::{header::HOST, HeaderValue, Request, Uri, Version};
use url::Url;

use crate::proxy::ProxyError;

/// Remove `prefix` from the front of `path` once. No normalization.
pub fn strip_prefix<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    path.strip_prefix(prefix)
}

/// `host[:port]` of the origin, as it goes into the URI and `Host`.
pub fn origin_authority(origin: &Url) -> Option<String> {
    let host = origin.host_str()?;
    Some(match origin.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// Path sent upstream: the origin's own base path followed by the stripped
/// inbound path, with exactly one slash between them.
pub fn outbound_path(base: &str, stripped: &str) -> String {
    let base = base.trim_end_matches('/');
    if stripped.starts_with('/') {
        format!("{}{}", base, stripped)
    } else {
        format!("{}/{}", base, stripped)
    }
}

/// Rewrite `request` for the upstream `origin`.
pub fn direct(request: Request<Body>, prefix: &str, origin: &Url) -> Result<Request<Body>, ProxyError> {
    let (mut parts, body) = request.into_parts();
    let original = parts.uri.clone();

    let stripped = strip_prefix(original.path(), prefix).unwrap_or(original.path());
    let path = outbound_path(origin.path(), stripped);
    let path_and_query = match original.query() {
        Some(query) => format!("{}?{}", path, query),
        None => path,
    };

    let authority = origin_authority(origin).ok_or_else(|| ProxyError::InvalidTarget(origin.to_string()))?;
    let uri = Uri::builder()
        .scheme(origin.scheme())
        .authority(authority.as_str())
        .path_and_query(path_and_query)
        .build()
        .map_err(|e| ProxyError::InvalidTarget(e.to_string()))?;
    let host = HeaderValue::from_str(&authority).map_err(|e| ProxyError::InvalidTarget(e.to_string()))?;

    tracing::info!(from = %original, to = %uri, "Proxying request");

    parts.uri = uri;
    // The pooled client speaks HTTP/1.1 to the upstream whatever the client used.
    parts.version = Version::HTTP_11;
    parts.headers.insert(HOST, host);

    Ok(Request::from_parts(parts, body))
}
