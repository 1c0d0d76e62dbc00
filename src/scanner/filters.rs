//! File filtering by extension

use std::path::Path;

/// Matches file names whose extension equals a target, ignoring ASCII case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFilter {
    extension: String,
}

impl ExtensionFilter {
    /// Create a filter for `extension`; a leading `.` is ignored
    #[must_use]
    pub fn new(extension: &str) -> Self {
        Self {
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    /// Target extension without the dot
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Check if a path's file name ends in `.<extension>`
    ///
    /// The extension is the text after the last `.` of the file name, so
    /// names without a dot never match while a bare `.java` does.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };

        name.to_string_lossy()
            .rsplit_once('.')
            .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case(&self.extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_extension_case_insensitive() {
        let filter = ExtensionFilter::new("java");

        assert!(filter.matches(&PathBuf::from("Main.java")));
        assert!(filter.matches(&PathBuf::from("a.JAVA")));
        assert!(filter.matches(&PathBuf::from("sub/dir/B.Java")));
    }

    #[test]
    fn test_other_extensions_rejected() {
        let filter = ExtensionFilter::new("java");

        assert!(!filter.matches(&PathBuf::from("a.txt")));
        assert!(!filter.matches(&PathBuf::from("Main.java.orig")));
        assert!(!filter.matches(&PathBuf::from("Main.javax")));
    }

    #[test]
    fn test_names_without_dot_rejected() {
        let filter = ExtensionFilter::new("java");

        assert!(!filter.matches(&PathBuf::from("java")));
        assert!(!filter.matches(&PathBuf::from("src/java")));
        assert!(!filter.matches(&PathBuf::from("Main.")));
    }

    #[test]
    fn test_dot_file_uses_text_after_dot() {
        let filter = ExtensionFilter::new("java");
        assert!(filter.matches(&PathBuf::from("pkg/.java")));
    }

    #[test]
    fn test_leading_dot_in_target() {
        let filter = ExtensionFilter::new(".kt");

        assert_eq!(filter.extension(), "kt");
        assert!(filter.matches(&PathBuf::from("App.KT")));
    }
}
