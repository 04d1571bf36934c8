//! Command-line configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use thiserror::Error;
use url::Url;

/// Report rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// Failure diagnostics and a one-line summary.
    #[default]
    Text,
    /// The full report as JSON.
    Json,
}

/// Runs markdown HTTP test files against a live API.
#[derive(Debug, Parser)]
#[command(name = "silk")]
#[command(about = "Markdown driven HTTP API tests")]
#[command(version)]
pub struct Cli {
    /// Test file, glob pattern or directory (expands to `*.silk.md`)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Target root URL
    #[arg(long, alias = "silk.url", env = "SILK_URL")]
    pub url: Option<String>,

    /// Accept invalid TLS certificates
    #[arg(long, env = "SILK_INSECURE")]
    pub insecure: bool,

    /// Per-request timeout in seconds
    #[arg(long, env = "SILK_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Invalid command-line configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No target URL was given.
    #[error("--url is required (or set SILK_URL)")]
    MissingUrl,

    /// The target URL is malformed or not http(s).
    #[error("invalid --url {url}: {reason}")]
    InvalidUrl {
        /// URL as given.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A zero timeout was given.
    #[error("--timeout must be at least 1 second")]
    ZeroTimeout,
}

/// Validated settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Path argument to expand into files.
    pub path: PathBuf,
    /// Target root URL.
    pub url: String,
    /// Accept invalid certificates.
    pub insecure: bool,
    /// Transport timeout.
    pub timeout: Option<Duration>,
    /// Report format.
    pub format: Format,
}

impl TryFrom<Cli> for Settings {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let url = cli.url.ok_or(ConfigError::MissingUrl)?;
        let parsed = Url::parse(&url).map_err(|e| ConfigError::InvalidUrl {
            url: url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url,
                reason: "scheme must be http or https".to_string(),
            });
        }

        let timeout = match cli.timeout {
            Some(0) => return Err(ConfigError::ZeroTimeout),
            Some(secs) => Some(Duration::from_secs(secs)),
            None => None,
        };

        Ok(Self {
            path: cli.path,
            url,
            insecure: cli.insecure,
            timeout,
            format: cli.format,
        })
    }
}
