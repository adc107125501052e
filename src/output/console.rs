//! Stdout/stderr output for fetch results.

use crate::types::{FetchedPackument, Packument, RegfetchError};
use colored::Colorize;

/// Console output handler.
///
/// Documents go to stdout so the output can be piped into other JSON
/// tooling; errors go to stderr.
pub struct ConsoleOutput {
    compact: bool,
    raw: bool,
}

impl ConsoleOutput {
    /// Create a new console output handler.
    pub fn new(compact: bool, raw: bool) -> Self {
        Self { compact, raw }
    }

    /// Serialize a packument in the configured style.
    pub fn render(&self, packument: &Packument) -> String {
        let rendered = if self.compact {
            serde_json::to_string(packument)
        } else {
            serde_json::to_string_pretty(packument)
        };
        // Serializing a Value cannot fail.
        rendered.unwrap_or_default()
    }

    /// Render a fetched document, preceded by the raw body in raw mode.
    pub fn render_fetched(&self, fetched: &FetchedPackument) -> String {
        let parsed = self.render(&fetched.packument);
        if self.raw {
            format!("{}\n{}", fetched.raw_body, parsed)
        } else {
            parsed
        }
    }

    pub fn print_fetched(&self, fetched: &FetchedPackument) {
        println!("{}", self.render_fetched(fetched));
    }

    /// Print a failed lookup.
    pub fn print_error(&self, package: &str, error: &RegfetchError) {
        eprintln!("{}", format_error(package, error));
    }
}

/// One-line error description, plus the response text when the registry sent one.
fn format_error(package: &str, error: &RegfetchError) -> String {
    let mut line = format!("{} {}: {}", "error:".red().bold(), package.bright_white(), error);

    if let RegfetchError::TransportError { source, .. } = error {
        if error.is_timeout() {
            line.push_str(&format!(" {}", "(timed out)".yellow()));
        } else if let Some(cause) = std::error::Error::source(source) {
            line.push_str(&format!(" ({})", cause).dimmed().to_string());
        }
    }

    if let Some(body) = error.body().filter(|b| !b.trim().is_empty()) {
        line.push_str(&format!("\n    {}", body.trim().dimmed()));
    }

    line
}

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self::new(false, false)
    }
}
