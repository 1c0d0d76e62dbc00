//! Error taxonomy
//!
//! Orchestration code works with [`Result`] (`anyhow`). Failures a caller is
//! expected to match on are typed:
//! - [`ConfigError`]: the options file exists but cannot be used
//! - [`EngineError`]: the formatting engine cannot be constructed
//! - [`FileError`]: one file could not be formatted; never fatal to a run

use std::io;

use crate::config::PropertiesError;
use crate::engine::EditError;

/// Result type alias using `anyhow::Error`
pub type Result<T> = anyhow::Result<T>;

/// Failure to load formatter options from a located resource
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The resource was found but could not be read
    #[error("failed to read configuration {origin}")]
    Unreadable {
        /// Where the resource was resolved from
        origin: String,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// The resource was read but is not valid properties syntax
    #[error("malformed configuration {origin}")]
    Malformed {
        /// Where the resource was resolved from
        origin: String,
        /// Parse failure
        #[source]
        source: PropertiesError,
    },
}

/// Failure to construct a formatting engine from its options
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The engine program could not be found
    #[error("formatter program '{program}' not found")]
    ProgramNotFound {
        /// Program name or path as given
        program: String,
        /// Lookup failure
        #[source]
        source: which::Error,
    },

    /// The options could not be handed over to the engine
    #[error("failed to prepare formatter options")]
    Options(#[source] io::Error),
}

/// Per-file formatting failure
///
/// Every variant leaves the file untouched except [`FileError::Write`], where
/// the original content is preserved unless the final rename went through.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    /// The file could not be opened or read
    #[error("failed to read file")]
    Read(#[source] io::Error),

    /// The file content is not valid in the configured encoding
    #[error("content is not valid {encoding}")]
    Decode {
        /// Encoding name
        encoding: &'static str,
    },

    /// The engine could not compute edits for this content
    #[error("formatter could not compute edits")]
    Format,

    /// The engine returned edits that do not fit the content
    #[error("formatter edits do not apply")]
    Apply(#[source] EditError),

    /// The formatted text contains characters the encoding cannot represent
    #[error("formatted content is not representable in {encoding}")]
    Encode {
        /// Encoding name
        encoding: &'static str,
    },

    /// The formatted content could not be written back
    #[error("failed to write file")]
    Write(#[source] io::Error),
}
