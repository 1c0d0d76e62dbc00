//! Run orchestration

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context;

use super::executor::FileFormatter;
use super::reporting::describe;
use super::FormatReport;
use crate::config::{ConfigLoader, FormatterOptions, LoadOutcome};
use crate::encoding::TextEncoding;
use crate::engine::FormatterFactory;
use crate::error::Result;
use crate::scanner::{ExtensionFilter, TreeWalker};

/// Default options file, relative to the project directory
pub const DEFAULT_CONFIG_PATH: &str = "src/main/resources/formatter/formatter.prefs";

/// Default source root, relative to the project directory
pub const DEFAULT_SOURCE_ROOT: &str = "src/main/java";

/// Default extension of files to format
pub const DEFAULT_EXTENSION: &str = "java";

/// Settings for one formatting run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSettings {
    /// Options file path or bundled resource name
    pub config: String,
    /// Directory to format recursively
    pub source_root: PathBuf,
    /// Extension of files to format
    pub extension: String,
    /// Encoding for reading and writing files
    pub encoding: TextEncoding,
}

impl Default for FormatSettings {
    fn default() -> Self {
        Self {
            config: DEFAULT_CONFIG_PATH.to_string(),
            source_root: PathBuf::from(DEFAULT_SOURCE_ROOT),
            extension: DEFAULT_EXTENSION.to_string(),
            encoding: TextEncoding::platform_default(),
        }
    }
}

/// Formats every matching file below a source root
pub struct FormatRunner {
    settings: FormatSettings,
    interrupted: Option<Arc<AtomicBool>>,
}

impl FormatRunner {
    /// Create a runner for the given settings
    #[must_use]
    pub const fn new(settings: FormatSettings) -> Self {
        Self {
            settings,
            interrupted: None,
        }
    }

    /// Stop before the next file once `flag` is set
    ///
    /// The file being formatted when the flag is raised is always finished.
    #[must_use]
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupted = Some(flag);
        self
    }

    fn is_interrupted(&self) -> bool {
        self.interrupted
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    /// Settings this runner was created with
    #[must_use]
    pub const fn settings(&self) -> &FormatSettings {
        &self.settings
    }

    /// Load the formatter options, using none if the config cannot be found
    ///
    /// # Errors
    ///
    /// Returns an error if the config exists but cannot be read or parsed.
    pub fn load_options(&self) -> Result<FormatterOptions> {
        let config = &self.settings.config;
        let outcome = ConfigLoader::load(config)
            .with_context(|| format!("Failed to load formatter options from {config}"))?;

        match &outcome {
            LoadOutcome::Loaded { options, source } => {
                tracing::info!("Loaded {} formatter option(s) from {source}", options.len());
            }
            LoadOutcome::NotFound { requested } => {
                tracing::warn!(
                    "Formatter configuration {requested} not found, using formatter defaults"
                );
            }
        }

        Ok(outcome.into_options())
    }

    /// Run the whole format pass
    ///
    /// # Errors
    ///
    /// Returns an error if the options cannot be loaded or the engine cannot
    /// be constructed. No file is touched in that case. Failures of single
    /// files are recorded in the report instead.
    pub fn run<F: FormatterFactory>(&self, factory: &F) -> Result<FormatReport> {
        let options = self.load_options()?;
        let engine = factory
            .configure(&options)
            .context("Failed to construct formatting engine")?;

        let walker = TreeWalker::new(ExtensionFilter::new(&self.settings.extension));
        let formatter = FileFormatter::new(&engine, self.settings.encoding);
        let root = &self.settings.source_root;

        if !root.is_dir() {
            tracing::warn!("Source root {} is not a directory", root.display());
        }

        let mut report = FormatReport::default();
        for path in walker.walk(root) {
            if self.is_interrupted() {
                tracing::warn!("Interrupted, remaining files were not formatted");
                report.interrupted = true;
                break;
            }
            tracing::debug!("Formatting file {}", path.display());

            let result = formatter.format_file(&path);
            if let Err(e) = &result {
                tracing::error!("Error formatting file {}: {}", path.display(), describe(e));
            }
            report.record(path, result);
        }

        Ok(report)
    }
}
