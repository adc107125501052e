//! Core types and errors for registry metadata fetching.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while fetching package metadata.
#[derive(Error, Debug)]
pub enum RegfetchError {
    /// The request never produced a complete response (connect, DNS, timeout, body read).
    #[error("request to {url} failed: {source}")]
    TransportError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The registry answered with a non-success status.
    #[error("registry returned HTTP {status}")]
    RegistryError { status: u16, body: String },

    /// The response body was not valid JSON.
    #[error("invalid JSON in registry response: {source}")]
    DecodeError {
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl RegfetchError {
    /// True when the transport gave up because the configured deadline elapsed.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::TransportError { source, .. } if source.is_timeout())
    }

    /// HTTP status carried by a registry error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RegistryError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response text, if one was received.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::RegistryError { body, .. } | Self::DecodeError { body, .. } => Some(body),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RegfetchError>;

/// A package metadata document, passed through exactly as the registry sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Packument(Value);

impl Packument {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The `name` field, if present.
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// The `dist-tags.latest` field, if present.
    pub fn latest_version(&self) -> Option<&str> {
        self.0
            .get("dist-tags")
            .and_then(|tags| tags.get("latest"))
            .and_then(Value::as_str)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

}

impl From<Value> for Packument {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// A single metadata lookup: which registry, which package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    registry_base_url: String,
    package_name: String,
}

impl FetchRequest {
    /// Build a request, rejecting inputs that cannot form `{registry}/{package}`.
    ///
    /// The package name is used as one path segment verbatim, so anything
    /// that would need escaping must already be percent-encoded.
    pub fn new(registry_base_url: &str, package_name: &str) -> Result<Self> {
        let base = registry_base_url.trim_end_matches('/');
        if base.is_empty() {
            return Err(RegfetchError::InvalidRequest(
                "registry base URL is empty".to_string(),
            ));
        }
        validate_package_name(package_name)?;

        Ok(Self {
            registry_base_url: base.to_string(),
            package_name: package_name.to_string(),
        })
    }

    pub fn registry_base_url(&self) -> &str {
        &self.registry_base_url
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// The exact URL that will be requested.
    pub fn url(&self) -> String {
        format!("{}/{}", self.registry_base_url, self.package_name)
    }
}

fn validate_package_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(RegfetchError::InvalidRequest(
            "package name is empty".to_string(),
        ));
    }

    if let Some(bad) = name
        .chars()
        .find(|&c| matches!(c, '/' | '\\' | '?' | '#') || c.is_whitespace() || c.is_control())
    {
        return Err(RegfetchError::InvalidRequest(format!(
            "package name {:?} contains {:?}; percent-encode it first",
            name, bad
        )));
    }

    // URL parsers collapse dot segments, encoded or not
    let decoded = name.to_ascii_lowercase().replace("%2e", ".");
    if decoded == "." || decoded == ".." {
        return Err(RegfetchError::InvalidRequest(format!(
            "package name {:?} is a dot segment",
            name
        )));
    }

    Ok(())
}

/// A successful fetch together with what was on the wire.
#[derive(Debug, Clone)]
pub struct FetchedPackument {
    pub url: String,
    pub status: u16,
    pub raw_body: String,
    pub packument: Packument,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_url() {
        let req = FetchRequest::new("https://registry.npmjs.org", "underscore").unwrap();
        assert_eq!(req.url(), "https://registry.npmjs.org/underscore");
    }

    #[test]
    fn test_request_strips_trailing_slash() {
        let req = FetchRequest::new("http://localhost:4873/", "left-pad").unwrap();
        assert_eq!(req.registry_base_url(), "http://localhost:4873");
        assert_eq!(req.url(), "http://localhost:4873/left-pad");
    }

    #[test]
    fn test_request_rejects_empty_inputs() {
        assert!(matches!(
            FetchRequest::new("", "lodash"),
            Err(RegfetchError::InvalidRequest(_))
        ));
        assert!(matches!(
            FetchRequest::new("https://registry.npmjs.org", ""),
            Err(RegfetchError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_request_rejects_unencoded_segments() {
        for name in ["@types/node", "a b", "pkg?x=1", "pkg#frag", "tab\tname"] {
            assert!(
                FetchRequest::new("https://registry.npmjs.org", name).is_err(),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn test_request_rejects_dot_segments() {
        for name in [".", "..", "%2e%2e", "%2E%2e", ".%2e", "%2e", "a\\..", "pkg\\name"] {
            assert!(
                matches!(
                    FetchRequest::new("https://registry.npmjs.org/npm", name),
                    Err(RegfetchError::InvalidRequest(_))
                ),
                "{name} should be rejected"
            );
        }
        assert!(FetchRequest::new("https://registry.npmjs.org", "...").is_ok());
        assert!(FetchRequest::new("https://registry.npmjs.org", ".bin").is_ok());
    }

    #[test]
    fn test_request_accepts_encoded_name() {
        let req = FetchRequest::new("https://registry.npmjs.org", "@types%2fnode").unwrap();
        assert_eq!(req.url(), "https://registry.npmjs.org/@types%2fnode");
    }

    #[test]
    fn test_packument_accessors() {
        let doc = Packument::new(json!({
            "name": "underscore",
            "dist-tags": { "latest": "1.13.6" }
        }));
        assert_eq!(doc.name(), Some("underscore"));
        assert_eq!(doc.latest_version(), Some("1.13.6"));

        let odd = Packument::new(json!([1, 2, 3]));
        assert_eq!(odd.name(), None);
        assert_eq!(odd.latest_version(), None);
    }

    #[test]
    fn test_packument_serializes_transparently() {
        let value = json!({ "name": "x", "versions": {} });
        let doc = Packument::from(value.clone());
        assert_eq!(serde_json::to_value(&doc).unwrap(), value);
    }

    #[test]
    fn test_error_accessors() {
        let err = RegfetchError::RegistryError {
            status: 404,
            body: "{\"error\":\"Not found\"}".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.body(), Some("{\"error\":\"Not found\"}"));
        assert!(!err.is_timeout());
        assert_eq!(err.to_string(), "registry returned HTTP 404");
    }
}
