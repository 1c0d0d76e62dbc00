//! Recursive scanning of a source root
//!
//! Files are yielded lazily, depth-first, in file-name order. Symbolic links to
//! files and directories are followed. A root that does not exist or is not a
//! directory yields nothing.

mod filters;

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

pub use filters::ExtensionFilter;

/// Walks a directory tree for files matching an [`ExtensionFilter`]
#[derive(Debug, Clone)]
pub struct TreeWalker {
    filter: ExtensionFilter,
}

impl TreeWalker {
    /// Create a walker for the given filter
    #[must_use]
    pub const fn new(filter: ExtensionFilter) -> Self {
        Self { filter }
    }

    /// Filter applied to every file
    #[must_use]
    pub const fn filter(&self) -> &ExtensionFilter {
        &self.filter
    }

    /// Lazily enumerate matching regular files under `root`, at any depth
    ///
    /// Entries that cannot be read below the root are logged and skipped.
    pub fn walk<'a>(&'a self, root: &Path) -> impl Iterator<Item = PathBuf> + 'a {
        // Links are followed; walkdir reports a link cycle as an error entry
        let walker = root
            .is_dir()
            .then(|| WalkDir::new(root).follow_links(true).sort_by_file_name());

        walker
            .into_iter()
            .flatten()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {e}");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(DirEntry::into_path)
            .filter(move |path| self.filter.matches(path))
    }
}
