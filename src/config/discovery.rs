//! Configuration resource resolution
//!
//! A name is looked up on disk first. If no regular file exists there, it is
//! matched against the resources compiled into the binary.

use std::fs;
use std::io;
use std::path::Path;

use super::types::ConfigSource;

/// Name of the bundled default formatter preferences
pub const DEFAULT_RESOURCE: &str = "formatter/formatter.prefs";

/// Resources compiled into the binary
const BUNDLED: &[(&str, &[u8])] = &[(
    DEFAULT_RESOURCE,
    include_bytes!("../../resources/formatter/formatter.prefs"),
)];

/// Config resource discovery
pub struct ConfigDiscovery;

impl ConfigDiscovery {
    /// Resolve a configuration name to a readable source
    ///
    /// An existing regular file at exactly `name` wins. Otherwise a bundled
    /// resource matches if its name equals `name` once normalized, or is a
    /// trailing path of it, so that `<project>/src/main/resources/formatter/formatter.prefs`
    /// falls back to the bundled `formatter/formatter.prefs`.
    #[must_use]
    pub fn locate(name: &str) -> Option<ConfigSource> {
        let path = Path::new(name);
        if path.is_file() {
            return Some(ConfigSource::File(path.to_path_buf()));
        }

        Self::find_bundled(name).map(ConfigSource::Bundled)
    }

    /// Read the full content of a located source
    ///
    /// # Errors
    ///
    /// Returns an error if a file source cannot be read.
    pub fn read(source: &ConfigSource) -> io::Result<Vec<u8>> {
        match source {
            ConfigSource::File(path) => fs::read(path),
            ConfigSource::Bundled(name) => Ok(BUNDLED
                .iter()
                .find(|(bundled, _)| bundled == name)
                .map(|(_, content)| content.to_vec())
                .unwrap_or_default()),
        }
    }

    fn find_bundled(name: &str) -> Option<&'static str> {
        let normalized = name.replace('\\', "/");
        let normalized = normalized
            .trim_start_matches("./")
            .trim_start_matches('/');

        BUNDLED
            .iter()
            .map(|(bundled, _)| *bundled)
            .find(|&bundled| {
                normalized == bundled
                    || normalized
                        .strip_suffix(bundled)
                        .is_some_and(|prefix| prefix.ends_with('/'))
            })
    }
}
