//! Formatter options loading
//!
//! This module handles:
//! - Resolving a config name to a file on disk or a bundled resource
//! - Properties-file parsing
//! - Distinguishing "not found" (engine defaults) from "unusable" (fatal)

mod discovery;
pub mod properties;
mod types;

pub use discovery::{ConfigDiscovery, DEFAULT_RESOURCE};
pub use properties::PropertiesError;
pub use types::{ConfigSource, FormatterOptions};

use crate::error::ConfigError;

/// Result of looking for a configuration resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Options were read and parsed
    Loaded {
        /// Parsed options
        options: FormatterOptions,
        /// Where they were read from
        source: ConfigSource,
    },
    /// Neither a file nor a bundled resource exists under the requested name
    NotFound {
        /// Name that was looked up
        requested: String,
    },
}

impl LoadOutcome {
    /// Options to configure the engine with; empty when nothing was found
    #[must_use]
    pub fn into_options(self) -> FormatterOptions {
        match self {
            Self::Loaded { options, .. } => options,
            Self::NotFound { .. } => FormatterOptions::new(),
        }
    }
}

/// Loads formatter options once per run
pub struct ConfigLoader;

impl ConfigLoader {
    /// Locate, read and parse the configuration named `name`
    ///
    /// # Errors
    ///
    /// Returns an error if the resource exists but cannot be read or parsed.
    /// A missing resource is not an error.
    pub fn load(name: &str) -> Result<LoadOutcome, ConfigError> {
        let Some(source) = ConfigDiscovery::locate(name) else {
            return Ok(LoadOutcome::NotFound {
                requested: name.to_string(),
            });
        };

        let bytes = ConfigDiscovery::read(&source).map_err(|e| ConfigError::Unreadable {
            origin: source.to_string(),
            source: e,
        })?;

        let text = Self::decode(&bytes);
        let entries = properties::parse(&text).map_err(|e| ConfigError::Malformed {
            origin: source.to_string(),
            source: e,
        })?;

        Ok(LoadOutcome::Loaded {
            options: FormatterOptions::from(entries),
            source,
        })
    }

    /// Decode as UTF-8, falling back to windows-1252 for legacy latin-1 files
    fn decode(bytes: &[u8]) -> String {
        let (content, _, had_errors) = encoding_rs::UTF_8.decode(bytes);
        if had_errors {
            let (content, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            content.into_owned()
        } else {
            content.into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_file() {
        let tmp = TempDir::new().unwrap();
        let config = tmp.path().join("formatter.prefs");
        fs::write(&config, "# exported\nA=1\nB=x\nA=2\n").unwrap();

        let outcome = ConfigLoader::load(config.to_str().unwrap()).unwrap();

        let LoadOutcome::Loaded { options, source } = outcome else {
            panic!("expected configuration to load");
        };
        assert_eq!(source, ConfigSource::File(config));
        assert_eq!(options.get("A"), Some("2"));
        assert_eq!(options.get("B"), Some("x"));
    }

    #[test]
    fn test_load_bundled_fallback() {
        let outcome = ConfigLoader::load("src/main/resources/formatter/formatter.prefs").unwrap();

        let LoadOutcome::Loaded { options, source } = outcome else {
            panic!("expected bundled configuration");
        };
        assert_eq!(source, ConfigSource::Bundled(DEFAULT_RESOURCE));
        assert_eq!(
            options.get("org.eclipse.jdt.core.formatter.tabulation.char"),
            Some("space")
        );
    }

    #[test]
    fn test_load_not_found() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nowhere.prefs");

        let outcome = ConfigLoader::load(missing.to_str().unwrap()).unwrap();

        assert!(matches!(outcome, LoadOutcome::NotFound { .. }));
        assert!(outcome.into_options().is_empty());
    }

    #[test]
    fn test_load_malformed() {
        let tmp = TempDir::new().unwrap();
        let config = tmp.path().join("broken.prefs");
        fs::write(&config, "ok=1\nbad=\\uZZZZ\n").unwrap();

        let err = ConfigLoader::load(config.to_str().unwrap()).unwrap_err();

        assert!(matches!(err, ConfigError::Malformed { .. }));
        assert!(err.to_string().contains("broken.prefs"));
    }

    #[test]
    fn test_load_latin1_file() {
        let tmp = TempDir::new().unwrap();
        let config = tmp.path().join("latin1.prefs");
        fs::write(&config, b"header=caf\xe9\n").unwrap();

        let options = ConfigLoader::load(config.to_str().unwrap())
            .unwrap()
            .into_options();

        assert_eq!(options.get("header"), Some("café"));
    }
}
