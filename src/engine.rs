//! Formatting engine capability
//!
//! The formatting rules themselves live outside this crate. An engine is
//! anything that can be configured from [`FormatterOptions`] and then asked
//! for the edits that format a whole source file.

mod edits;
mod process;

pub use edits::{EditError, ReplaceEdit, TextEdit};
pub use process::{CONFIG_PLACEHOLDER, ProcessEngine, ProcessEngineFactory};

use crate::config::FormatterOptions;
use crate::error::EngineError;

/// What part of the grammar the submitted text is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatMode {
    /// A complete source file
    CompilationUnit {
        /// Whether comments are formatted as well
        include_comments: bool,
    },
}

impl FormatMode {
    /// Whole-file formatting including comments
    pub const WHOLE_FILE: Self = Self::CompilationUnit {
        include_comments: true,
    };
}

/// A configured formatting engine
pub trait CodeFormatter {
    /// Compute the edits that format `source`
    ///
    /// Returns `None` when no edits can be computed, typically because the
    /// source does not parse.
    fn format(&self, source: &str, mode: FormatMode) -> Option<TextEdit>;
}

/// Builds a [`CodeFormatter`] from formatter options
pub trait FormatterFactory {
    /// Engine produced by this factory
    type Formatter: CodeFormatter;

    /// Construct the engine once for a whole run
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot be constructed from `options`.
    fn configure(&self, options: &FormatterOptions) -> Result<Self::Formatter, EngineError>;
}
