//! Formatting of a source tree
//!
//! [`FormatRunner`] loads the options, builds the engine, walks the source
//! root and hands every matched file to [`FileFormatter`]. Per-file failures
//! are collected in the [`FormatReport`] and never abort the run.

mod executor;
mod orchestrator;
mod reporting;
mod writer;

use std::path::PathBuf;

pub use executor::{FileFormatter, FileOutcome};
pub use orchestrator::{
    DEFAULT_CONFIG_PATH, DEFAULT_EXTENSION, DEFAULT_SOURCE_ROOT, FormatRunner, FormatSettings,
};
pub use reporting::FormatReporter;
pub use writer::replace_file;

use crate::error::FileError;

/// A file that could not be formatted
#[derive(Debug)]
pub struct FileFailure {
    /// File path
    pub path: PathBuf,
    /// Step that failed
    pub error: FileError,
}

/// Formatting result with statistics
#[derive(Debug, Default)]
pub struct FormatReport {
    /// Files rewritten
    pub formatted: usize,
    /// Files already formatted
    pub unchanged: usize,
    /// Files that failed
    pub failures: Vec<FileFailure>,
    /// The run stopped early on an interrupt request
    pub interrupted: bool,
}

impl FormatReport {
    /// Files the walker handed to the formatter
    #[must_use]
    pub fn total_files(&self) -> usize {
        self.formatted + self.unchanged + self.failures.len()
    }

    /// Whether every file was formatted (no failures, not interrupted)
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && !self.interrupted
    }

    fn record(&mut self, path: PathBuf, result: Result<FileOutcome, FileError>) {
        match result {
            Ok(FileOutcome::Formatted) => self.formatted += 1,
            Ok(FileOutcome::Unchanged) => self.unchanged += 1,
            Err(error) => self.failures.push(FileFailure { path, error }),
        }
    }
}
