//! regfetch - fetch package metadata from an npm-compatible registry.
//!
//! CLI entry point.

use clap::Parser;
use futures::future::join_all;
use regfetch::{Config, ConsoleOutput, PackageMetadataFetcher};
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    // stdout carries only JSON, so logs go to stderr
    let filter = if config.verbose {
        EnvFilter::new("regfetch=debug,info")
    } else {
        EnvFilter::new("regfetch=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => code,
    }
}

async fn run(config: &Config) -> Result<(), ExitCode> {
    let fetcher = match PackageMetadataFetcher::new(config.fetch_config()) {
        Ok(f) => f,
        Err(e) => {
            error!("Failed to create fetcher: {}", e);
            return Err(ExitCode::FAILURE);
        }
    };
    debug!("Using registry {}", fetcher.registry_url());

    let output = ConsoleOutput::new(config.compact, config.raw);

    // Fetch everything concurrently, report in argument order
    let results = join_all(
        config
            .packages
            .iter()
            .map(|name| fetcher.fetch_with_body(name)),
    )
    .await;

    let mut failures = 0usize;
    for (name, result) in config.packages.iter().zip(results) {
        match result {
            Ok(fetched) => output.print_fetched(&fetched),
            Err(e) => {
                output.print_error(name, &e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        debug!("{} of {} lookups failed", failures, config.packages.len());
        return Err(ExitCode::FAILURE);
    }

    Ok(())
}
