//! regfetch - fetch package metadata documents from an npm-compatible registry.
//!
//! One GET against `{registry}/{package}`, the response body parsed as JSON
//! and returned as an opaque [`Packument`]. No retries, no caching.
//!
//! # Example
//!
//! ```no_run
//! use regfetch::{FetchConfig, PackageMetadataFetcher};
//!
//! #[tokio::main]
//! async fn main() {
//!     let fetcher = PackageMetadataFetcher::new(FetchConfig::default()).unwrap();
//!     let packument = fetcher.fetch("underscore").await.unwrap();
//!     println!("latest: {:?}", packument.latest_version());
//! }
//! ```

pub mod config;
pub mod output;
pub mod registry;
pub mod types;

pub use config::{Config, FetchConfig};
pub use output::ConsoleOutput;
pub use registry::{fetch, PackageMetadataFetcher};
pub use types::{FetchRequest, FetchedPackument, Packument, RegfetchError, Result};
