//! Configuration handling for the fetcher and the CLI.

use crate::types::{RegfetchError, Result};
use clap::Parser;
use std::time::Duration;
use url::Url;

/// Public npm registry.
pub const DEFAULT_REGISTRY: &str = "https://registry.npmjs.org";

/// Default request deadline in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub fn default_user_agent() -> String {
    format!("regfetch/{}", env!("CARGO_PKG_VERSION"))
}

/// Fetch package metadata documents from an npm-compatible registry.
#[derive(Parser, Debug, Clone)]
#[command(name = "regfetch")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Package name(s) to look up
    #[arg(required = true)]
    pub packages: Vec<String>,

    /// Registry base URL
    #[arg(long, env = "REGFETCH_REGISTRY", default_value = DEFAULT_REGISTRY)]
    pub registry: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Custom User-Agent string
    #[arg(long, env = "REGFETCH_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Print each document on a single line
    #[arg(long)]
    pub compact: bool,

    /// Also print the raw response body before the parsed document
    #[arg(long)]
    pub raw: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Get fetcher configuration from CLI arguments.
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            registry_url: self.registry.clone(),
            timeout: Duration::from_secs(self.timeout),
            user_agent: self.user_agent.clone().unwrap_or_else(default_user_agent),
        }
    }
}

/// Settings handed to [`crate::PackageMetadataFetcher::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    pub registry_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            registry_url: DEFAULT_REGISTRY.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: default_user_agent(),
        }
    }
}

impl FetchConfig {
    pub fn with_registry(mut self, registry_url: impl Into<String>) -> Self {
        self.registry_url = registry_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validate the settings and return the registry URL without a trailing slash.
    pub fn validate(&self) -> Result<String> {
        let trimmed = self.registry_url.trim_end_matches('/');
        let parsed = Url::parse(trimmed).map_err(|e| {
            RegfetchError::ConfigError(format!("invalid registry URL {:?}: {}", self.registry_url, e))
        })?;

        match parsed.scheme() {
            "http" | "https" => {}
            other => {
                return Err(RegfetchError::ConfigError(format!(
                    "registry URL must be http or https, got {:?}",
                    other
                )))
            }
        }

        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(RegfetchError::ConfigError(format!(
                "registry URL {:?} must not carry a query or fragment",
                self.registry_url
            )));
        }

        if self.timeout.is_zero() {
            return Err(RegfetchError::ConfigError(
                "timeout must be greater than zero".to_string(),
            ));
        }

        Ok(trimmed.to_string())
    }
}
