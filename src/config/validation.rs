//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde and clap handle syntactic)
//! - Proxy prefix and origin must be usable before any request arrives
//! - Static headers must be legal HTTP names and values
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouteConfig → Result<(), Vec<ValidationError>>
//! - Runs before the listener is bound, so a bad proxy setup never serves

use std::path::{Component, Path};

use axum::http::{HeaderName, HeaderValue};

use crate::config::schema::RouteConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid listen address `{0}`")]
    ListenAddress(String),

    #[error("--proxy-from and --proxy-to must be given together")]
    IncompleteProxy,

    #[error("proxy prefix `{0}` must start with `/`")]
    ProxyPrefix(String),

    #[error("proxy origin `{0}` must be an http:// URL with a host")]
    ProxyOrigin(String),

    #[error("invalid header name `{0}`")]
    HeaderName(String),

    #[error("invalid value for header `{0}`")]
    HeaderValue(String),

    #[error("upstream timeout must be greater than zero")]
    UpstreamTimeout,

    #[error("fallback `{0}` must be a relative resource name inside the serve path")]
    Fallback(String),
}

/// Check the configuration, collecting every problem found.
pub fn validate_config(config: &RouteConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !is_host_port(&config.listen_addr()) {
        errors.push(ValidationError::ListenAddress(config.listen.clone()));
    }

    match (&config.proxy_from, &config.proxy_to) {
        (Some(prefix), Some(origin)) => {
            if !prefix.starts_with('/') {
                errors.push(ValidationError::ProxyPrefix(prefix.clone()));
            }
            if origin.scheme() != "http" || origin.host_str().is_none() {
                errors.push(ValidationError::ProxyOrigin(origin.to_string()));
            }
        }
        (None, None) => {}
        _ => errors.push(ValidationError::IncompleteProxy),
    }

    for (name, value) in &config.headers {
        if HeaderName::from_bytes(name.as_bytes()).is_err() {
            errors.push(ValidationError::HeaderName(name.clone()));
        } else if HeaderValue::from_str(value).is_err() {
            errors.push(ValidationError::HeaderValue(name.clone()));
        }
    }

    if config.upstream_timeout_secs == Some(0) {
        errors.push(ValidationError::UpstreamTimeout);
    }

    if let Some(fallback) = &config.fallback {
        if !is_contained(fallback) {
            errors.push(ValidationError::Fallback(fallback.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Syntax check only; names are resolved when the listener binds.
fn is_host_port(addr: &str) -> bool {
    match addr.rsplit_once(':') {
        Some((host, port)) => {
            !host.is_empty() && !host.contains(char::is_whitespace) && port.parse::<u16>().is_ok()
        }
        None => false,
    }
}

fn is_contained(name: &str) -> bool {
    let trimmed = name.trim_start_matches('/');
    !trimmed.is_empty()
        && Path::new(trimmed)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
