//! Formatter options and where they came from

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Option name to option value mapping handed verbatim to the formatting engine
///
/// Built once per run and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatterOptions {
    entries: BTreeMap<String, String>,
}

impl FormatterOptions {
    /// Empty option set; the engine applies its own defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up one option
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of options
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no option is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over options in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<BTreeMap<String, String>> for FormatterOptions {
    fn from(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormatterOptions {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Location a configuration resource was resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Regular file on disk
    File(PathBuf),
    /// Resource compiled into the binary
    Bundled(&'static str),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Bundled(name) => write!(f, "bundled:{name}"),
        }
    }
}
