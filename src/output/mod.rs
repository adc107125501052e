//! Console rendering for fetched documents and failures.

pub mod console;

pub use console::ConsoleOutput;
