//! Command-line flags.

use std::path::PathBuf;

use clap::Parser;
use url::Url;

#[derive(Debug, Default, Parser)]
#[command(name = "edge-server")]
#[command(about = "Static file server with SPA fallback and a prefix reverse proxy", long_about = None)]
pub struct Cli {
    /// Address to listen for requests on [default: :8080]
    #[arg(long)]
    pub listen: Option<String>,

    /// Directory the files are served from [default: ./]
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Header sent with every response, as `Key:Value` (repeatable)
    #[arg(long = "header", value_name = "KEY:VALUE")]
    pub headers: Vec<String>,

    /// Resource served when the requested file does not exist
    #[arg(long, value_name = "RESOURCE")]
    pub redirect: Option<String>,

    /// Path prefix forwarded to the upstream origin
    #[arg(long, value_name = "PREFIX")]
    pub proxy_from: Option<String>,

    /// Upstream origin, e.g. http://127.0.0.1:3000
    #[arg(long, value_name = "URL")]
    pub proxy_to: Option<Url>,

    /// Upstream round-trip deadline in seconds (none by default)
    #[arg(long, value_name = "SECS")]
    pub upstream_timeout: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Optional TOML file; flags override its keys
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::try_parse_from([
            "edge-server",
            "--listen",
            "127.0.0.1:9000",
            "--path",
            "dist",
            "--header",
            "X-Test:1",
            "--header",
            "X-Other: two",
            "--redirect",
            "index.html",
            "--proxy-from",
            "/api",
            "--proxy-to",
            "http://upstream:3000",
            "--upstream-timeout",
            "15",
        ])
        .unwrap();

        assert_eq!(cli.listen.as_deref(), Some("127.0.0.1:9000"));
        assert_eq!(cli.path, Some(PathBuf::from("dist")));
        assert_eq!(cli.headers, vec!["X-Test:1", "X-Other: two"]);
        assert_eq!(cli.redirect.as_deref(), Some("index.html"));
        assert_eq!(cli.proxy_from.as_deref(), Some("/api"));
        assert_eq!(cli.proxy_to.unwrap().port(), Some(3000));
        assert_eq!(cli.upstream_timeout, Some(15));
    }

    #[test]
    fn test_malformed_proxy_to_fails_parsing() {
        assert!(Cli::try_parse_from(["edge-server", "--proxy-to", "not a url"]).is_err());
    }
}
