//! Configuration loading from disk and flags.

use std::fs;
use std::path::Path;

use crate::config::args::Cli;
use crate::config::schema::RouteConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Header `{0}` is not of the form Key:Value")]
    Header(String),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Read a TOML file over the defaults. Validation waits until flags are merged.
pub fn read_config(path: &Path) -> Result<RouteConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Build the startup configuration: defaults, then the file named by
/// `--config` if any, then every flag that was given.
pub fn from_cli(cli: Cli) -> Result<RouteConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => RouteConfig::default(),
    };

    if let Some(listen) = cli.listen {
        config.listen = listen;
    }
    if let Some(path) = cli.path {
        config.serve_path = path;
    }
    for pair in &cli.headers {
        let (name, value) = parse_header(pair)?;
        config.headers.insert(name, value);
    }
    if cli.redirect.is_some() {
        config.fallback = cli.redirect;
    }
    if cli.proxy_from.is_some() {
        config.proxy_from = cli.proxy_from;
    }
    if cli.proxy_to.is_some() {
        config.proxy_to = cli.proxy_to;
    }
    if cli.upstream_timeout.is_some() {
        config.upstream_timeout_secs = cli.upstream_timeout;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Split a `Key:Value` pair on the first colon.
pub fn parse_header(pair: &str) -> Result<(String, String), ConfigError> {
    match pair.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(ConfigError::Header(pair.to_string())),
    }
}
