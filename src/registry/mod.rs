//! npm registry metadata fetching.
//!
//! One GET per lookup against `{registry}/{package}`, with the JSON body
//! handed back untouched.

pub mod fetcher;

pub use fetcher::{fetch, PackageMetadataFetcher};
