//! Route matching logic.
//!
//! # Responsibilities
//! - Match path prefix (case-sensitive, literal)
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - No regex and no normalization: the prefix is compared byte for byte
//! - Empty prefix = always matches (the local catch-all)

use axum::body::Body;
use axum::http::Request;

/// Trait for matching requests against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the request matches this condition.
    fn matches(&self, req: &Request<Body>) -> bool;

    /// Longer, more specific matchers win when several apply.
    fn specificity(&self) -> usize;
}

/// Matches the request path prefix.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The prefix being matched.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Matcher for PathPrefixMatcher {
    fn matches(&self, req: &Request<Body>) -> bool {
        req.uri().path().starts_with(&self.prefix)
    }

    fn specificity(&self) -> usize {
        self.prefix.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::default()).unwrap()
    }

    #[test]
    fn test_path_matcher() {
        let matcher = PathPrefixMatcher::new("/api");

        assert!(matcher.matches(&request("http://example.com/api/v1")));
        assert!(matcher.matches(&request("/api")));
        assert!(matcher.matches(&request("/api?x=1")));
        assert!(!matcher.matches(&request("http://example.com/images")));
        assert!(!matcher.matches(&request("/API/v1"))); // Case sensitive
        assert!(!matcher.matches(&request("/v1/api")));
    }

    #[test]
    fn test_root_matches_everything() {
        let matcher = PathPrefixMatcher::new("/");
        assert!(matcher.matches(&request("/")));
        assert!(matcher.matches(&request("/anything/at/all")));
        assert_eq!(matcher.specificity(), 1);
    }
}
