//! # fmtree
//!
//! Core library for recursively reformatting a source tree.
//!
//! This library loads a properties file of formatter options, hands them to a
//! pluggable formatting engine, walks a source root for files with a given
//! extension and rewrites every matched file with the edits the engine
//! computes.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Error types shared across the crate
pub mod error;

/// Character encodings for reading and writing source files
pub mod encoding;

/// Formatter options loading and resolution
pub mod config;

/// Source tree traversal
pub mod scanner;

/// Formatting engine capability and text edits
pub mod engine;

/// Per-file formatting and run orchestration
pub mod format;
