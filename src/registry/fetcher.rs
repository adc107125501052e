//! Packument fetcher backed by reqwest.

use crate::config::FetchConfig;
use crate::types::{FetchRequest, FetchedPackument, Packument, RegfetchError, Result};
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, trace};

/// Fetches package metadata documents from a single registry.
///
/// Holds no mutable state; clones share the underlying connection pool, so
/// concurrent lookups need no coordination.
#[derive(Debug, Clone)]
pub struct PackageMetadataFetcher {
    client: Client,
    registry_url: String,
}

impl PackageMetadataFetcher {
    /// Create a new fetcher.
    pub fn new(config: FetchConfig) -> Result<Self> {
        let registry_url = config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| RegfetchError::ConfigError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            registry_url,
        })
    }

    /// Registry base URL, without trailing slash.
    pub fn registry_url(&self) -> &str {
        &self.registry_url
    }

    /// Fetch the packument for `package_name`.
    pub async fn fetch(&self, package_name: &str) -> Result<Packument> {
        Ok(self.fetch_with_body(package_name).await?.packument)
    }

    /// Fetch the packument and keep the raw response text alongside it.
    pub async fn fetch_with_body(&self, package_name: &str) -> Result<FetchedPackument> {
        let request = FetchRequest::new(&self.registry_url, package_name)?;
        self.execute(&request).await
    }

    /// Fetch using a prepared request, which may target another registry.
    pub async fn fetch_request(&self, request: &FetchRequest) -> Result<Packument> {
        Ok(self.execute(request).await?.packument)
    }

    async fn execute(&self, request: &FetchRequest) -> Result<FetchedPackument> {
        let url = request.url();
        trace!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| RegfetchError::TransportError {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| RegfetchError::TransportError {
                url: url.clone(),
                source,
            })?;
        trace!("{} -> {} ({} bytes)", url, status, body.len());

        if !status.is_success() {
            debug!("Registry returned {} for {}", status, request.package_name());
            return Err(RegfetchError::RegistryError {
                status: status.as_u16(),
                body,
            });
        }

        let value = match serde_json::from_str::<Value>(&body) {
            Ok(value) => value,
            Err(source) => {
                debug!("Undecodable body for {}: {}", request.package_name(), source);
                return Err(RegfetchError::DecodeError { body, source });
            }
        };

        debug!("Fetched packument: {}", request.package_name());
        Ok(FetchedPackument {
            url,
            status: status.as_u16(),
            raw_body: body,
            packument: Packument::new(value),
        })
    }
}

/// One-shot fetch against `registry_base_url` with default timeout and user agent.
pub async fn fetch(registry_base_url: &str, package_name: &str) -> Result<Packument> {
    let fetcher = PackageMetadataFetcher::new(FetchConfig::default().with_registry(registry_base_url))?;
    fetcher.fetch(package_name).await
}
