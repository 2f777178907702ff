//! Cookie path rewriting for proxied responses.
//!
//! Cookies set by the upstream are scoped to the upstream's own paths. Once
//! the upstream is mounted under a prefix, every `Set-Cookie` path has to be
//! moved under that prefix too, or the browser never sends the cookie back.
//!
//! Only the `Path` attribute changes. Name, value, every other attribute and
//! the order of the `Set-Cookie` lines are kept as received. A line that does
//! not parse is forwarded untouched.

use std::fmt;

use axum::http::{header::SET_COOKIE, HeaderMap, HeaderValue, Response};

/// A `Set-Cookie` line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CookieError {
    #[error("missing `=` in cookie pair")]
    MissingPair,

    #[error("invalid cookie name `{0}`")]
    InvalidName(String),

    #[error("invalid character in cookie value")]
    InvalidValue,
}

/// One parsed `Set-Cookie` line.
///
/// Attributes are kept as the trimmed text that appeared between semicolons
/// so they serialize back verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCookie {
    name: String,
    value: String,
    attributes: Vec<String>,
}

impl SetCookie {
    /// Parse a `Set-Cookie` header value.
    pub fn parse(line: &str) -> Result<Self, CookieError> {
        let mut parts = line.split(';');
        let pair = parts.next().unwrap_or_default();
        let (name, value) = pair.split_once('=').ok_or(CookieError::MissingPair)?;
        let (name, value) = (name.trim(), value.trim());

        if name.is_empty() || !name.bytes().all(is_token_byte) {
            return Err(CookieError::InvalidName(name.to_string()));
        }
        if value.bytes().any(|b| b.is_ascii_control()) {
            return Err(CookieError::InvalidValue);
        }

        let attributes = parts
            .map(str::trim)
            .filter(|attr| !attr.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            name: name.to_string(),
            value: value.to_string(),
            attributes,
        })
    }

    /// Cookie name as sent by the upstream.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of the last attribute called `key` (case-insensitive).
    /// Flag attributes such as `Secure` yield an empty string.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .rev()
            .find(|attr| attr_key(attr).eq_ignore_ascii_case(key))
            .map(|attr| attr.split_once('=').map_or("", |(_, v)| v.trim()))
    }

    /// The cookie's own `Path`, if it carries a non-empty one.
    pub fn path(&self) -> Option<&str> {
        self.attribute("Path").filter(|p| !p.is_empty())
    }

    /// Replace the `Path` attribute in place, or append one if absent.
    pub fn set_path(&mut self, path: &str) {
        let replacement = format!("Path={}", path);
        let mut replaced = false;

        self.attributes.retain_mut(|attr| {
            if !attr_key(attr).eq_ignore_ascii_case("Path") {
                return true;
            }
            if replaced {
                return false;
            }
            *attr = replacement.clone();
            replaced = true;
            true
        });

        if !replaced {
            self.attributes.push(replacement);
        }
    }
}

impl fmt::Display for SetCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)?;
        for attr in &self.attributes {
            write!(f, "; {}", attr)?;
        }
        Ok(())
    }
}

fn attr_key(attr: &str) -> &str {
    attr.split_once('=').map_or(attr, |(k, _)| k).trim()
}

// RFC 9110 token characters.
fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}

/// Join two URL paths segment-wise: empty segments collapse, the result is
/// absolute and has no trailing slash unless it is the root.
pub fn join_path(base: &str, path: &str) -> String {
    let segments: Vec<&str> = base
        .split('/')
        .chain(path.split('/'))
        .filter(|s| !s.is_empty())
        .collect();

    format!("/{}", segments.join("/"))
}

/// Rewrite one `Set-Cookie` value under `base`. Unparseable input is
/// returned unchanged.
pub fn rewrite_value(value: &HeaderValue, base: &str) -> Result<HeaderValue, CookieError> {
    let line = value.to_str().map_err(|_| CookieError::InvalidValue)?;
    let mut cookie = SetCookie::parse(line)?;
    let path = join_path(base, cookie.path().unwrap_or("/"));
    cookie.set_path(&path);
    tracing::debug!(cookie = %cookie.name(), path = %path, "Rewrote cookie path");

    HeaderValue::from_str(&cookie.to_string()).map_err(|_| CookieError::InvalidValue)
}

/// Re-scope every `Set-Cookie` header under `base`, keeping order and count.
pub fn rewrite_set_cookies(headers: &mut HeaderMap, base: &str) {
    let originals: Vec<HeaderValue> = headers.get_all(SET_COOKIE).iter().cloned().collect();
    if originals.is_empty() {
        return;
    }
    headers.remove(SET_COOKIE);

    for original in originals {
        let value = match rewrite_value(&original, base) {
            Ok(rewritten) => rewritten,
            Err(e) => {
                tracing::warn!(error = %e, cookie = ?original, "Passing malformed Set-Cookie through");
                original
            }
        };
        headers.append(SET_COOKIE, value);
    }
}

/// Response filter form of [`rewrite_set_cookies`].
pub fn rewrite<B>(mut response: Response<B>, base: &str) -> Response<B> {
    rewrite_set_cookies(response.headers_mut(), base);
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_accessors() {
        let cookie = SetCookie::parse(
            "sid=abc; Path=/app; Domain=example.com; Expires=Wed, 21 Oct 2026 07:28:00 GMT; Secure; HttpOnly",
        )
        .unwrap();

        assert_eq!(cookie.name(), "sid");
        assert_eq!(cookie.path(), Some("/app"));
        assert_eq!(cookie.attribute("domain"), Some("example.com"));
        assert_eq!(cookie.attribute("Expires"), Some("Wed, 21 Oct 2026 07:28:00 GMT"));
        assert_eq!(cookie.attribute("secure"), Some(""));
        assert_eq!(cookie.attribute("SameSite"), None);
    }

    #[test]
    fn test_malformed_lines() {
        assert_eq!(SetCookie::parse("no-pair"), Err(CookieError::MissingPair));
        assert_eq!(SetCookie::parse("=value"), Err(CookieError::InvalidName(String::new())));
        assert_eq!(
            SetCookie::parse("bad name=1"),
            Err(CookieError::InvalidName("bad name".into()))
        );
    }

    #[test]
    fn test_empty_value_is_allowed() {
        let cookie = SetCookie::parse("sid=; Max-Age=0").unwrap();
        assert_eq!(cookie.to_string(), "sid=; Max-Age=0");
    }

    #[test]
    fn test_set_path_keeps_attribute_order() {
        let mut cookie = SetCookie::parse("a=1; Secure; path=/x; SameSite=Lax; Path=/y").unwrap();
        cookie.set_path("/api/x");
        assert_eq!(cookie.to_string(), "a=1; Secure; Path=/api/x; SameSite=Lax");

        let mut cookie = SetCookie::parse("a=1; HttpOnly").unwrap();
        cookie.set_path("/api");
        assert_eq!(cookie.to_string(), "a=1; HttpOnly; Path=/api");
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("/api", "/"), "/api");
        assert_eq!(join_path("/api", "/users"), "/api/users");
        assert_eq!(join_path("/api/", "//users/"), "/api/users");
        assert_eq!(join_path("/", "/"), "/");
        assert_eq!(join_path("/api", "relative"), "/api/relative");
    }

    #[test]
    fn test_rewrite_preserves_count_and_pairs() {
        let mut headers = HeaderMap::new();
        headers.append(SET_COOKIE, HeaderValue::from_static("sid=abc; Path=/"));
        headers.append(SET_COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(SET_COOKIE, HeaderValue::from_static("garbage"));
        headers.append(SET_COOKIE, HeaderValue::from_static("pref=1; Path=/settings; HttpOnly"));
        headers.insert("content-type", HeaderValue::from_static("text/plain"));

        rewrite_set_cookies(&mut headers, "/api");

        let cookies: Vec<&str> = headers
            .get_all(SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();
        assert_eq!(
            cookies,
            vec![
                "sid=abc; Path=/api",
                "theme=dark; Path=/api",
                "garbage",
                "pref=1; Path=/api/settings; HttpOnly",
            ]
        );
        assert_eq!(headers["content-type"], "text/plain");
    }

    #[test]
    fn test_rewrite_response_without_cookies() {
        let response = Response::builder().status(204).body(()).unwrap();
        let response = rewrite(response, "/api");
        assert!(response.headers().is_empty());
    }
}
