//! Shared utilities for the stratifier tools.

pub mod args;
pub mod formatter;

pub use args::{get_example_files, Args, EXAMPLE_DIR};
pub use formatter::AllResultsFormatter;
