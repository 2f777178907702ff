//! Local static handler: SPA resolution in front of the file server.

use std::path::Path;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{uri::PathAndQuery, Request, Uri},
    response::Response,
};
use tower::ServiceExt;
use tower_http::services::ServeDir;

use crate::statics::resolver::SpaResolver;

/// Local file chain: SPA resolution in front of the file server.
#[derive(Clone)]
pub struct StaticFiles {
    resolver: Arc<SpaResolver>,
    files: ServeDir,
}

impl StaticFiles {
    /// Create a new file chain serving `root`.
    pub fn new(root: &Path, fallback: Option<&str>) -> Self {
        Self {
            resolver: Arc::new(SpaResolver::new(root, fallback)),
            files: ServeDir::new(root),
        }
    }

    /// Serve `request` from disk, substituting the fallback for missing files.
    pub async fn handle(&self, request: Request<Body>) -> Response {
        let effective = self.resolver.resolve(request.uri().path()).await.into_owned();
        let request = if effective != request.uri().path() {
            with_path(request, &effective)
        } else {
            request
        };

        match self.files.clone().oneshot(request).await {
            Ok(response) => response.map(Body::new),
            // ServeDir renders its own IO errors as responses.
            Err(never) => match never {},
        }
    }
}

/// Point the request at `path`, keeping its query string.
fn with_path(mut request: Request<Body>, path: &str) -> Request<Body> {
    let path_and_query = match request.uri().query() {
        Some(query) => format!("{}?{}", path, query),
        None => path.to_string(),
    };

    let mut parts = request.uri().clone().into_parts();
    parts.path_and_query = PathAndQuery::try_from(path_and_query).ok();
    if let Ok(uri) = Uri::from_parts(parts) {
        *request.uri_mut() = uri;
    }
    request
}
