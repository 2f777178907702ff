//! SPA fallback resolution.
//!
//! # Responsibilities
//! - Decide whether a requested resource exists under the serve root
//! - Substitute the configured fallback resource when it does not
//!
//! # Design Decisions
//! - Existence is checked on every request; edits on disk apply immediately
//! - Check and open are not atomic; a file removed in between is reported
//!   as not found by the file server, never by the resolver
//! - A name that would leave the serve root counts as non-existent

use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped when the fallback name is turned back into a URL path.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Decides which resource under the serve root answers a request.
#[derive(Debug, Clone)]
pub struct SpaResolver {
    root: PathBuf,
    /// Fallback as an encoded absolute URL path, e.g. `/index.html`.
    fallback: Option<String>,
}

impl SpaResolver {
    /// Create a new resolver rooted at `root`. Without a fallback every
    /// name resolves to itself.
    pub fn new(root: impl Into<PathBuf>, fallback: Option<&str>) -> Self {
        let fallback = fallback.map(|name| {
            let encoded = utf8_percent_encode(name.trim_start_matches('/'), PATH_SEGMENT);
            format!("/{}", encoded)
        });

        Self {
            root: root.into(),
            fallback,
        }
    }

    /// The encoded fallback path, if one is configured.
    pub fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }

    /// Map the requested URL path to the one that should be served.
    pub async fn resolve<'a>(&self, requested: &'a str) -> Cow<'a, str> {
        let Some(fallback) = &self.fallback else {
            return Cow::Borrowed(requested);
        };

        if self.exists(requested).await {
            return Cow::Borrowed(requested);
        }

        tracing::info!(requested = %requested, fallback = %fallback, "Serving SPA fallback");
        Cow::Owned(fallback.clone())
    }

    async fn exists(&self, requested: &str) -> bool {
        let Ok(decoded) = percent_decode_str(requested).decode_utf8() else {
            return false;
        };
        let Some(path) = join_contained(&self.root, &decoded) else {
            return false;
        };

        match tokio::fs::try_exists(&path).await {
            Ok(found) => found,
            Err(e) => {
                // Permission problems and the like are left for the file server to report.
                tracing::debug!(path = ?path, error = %e, "Existence check failed");
                true
            }
        }
    }
}

/// Join a decoded URL path onto `root`, refusing anything that escapes it.
pub fn join_contained(root: &Path, requested: &str) -> Option<PathBuf> {
    let mut path = root.to_path_buf();
    for component in Path::new(requested.trim_start_matches('/')).components() {
        match component {
            Component::Normal(segment) => path.push(segment),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(path)
}
