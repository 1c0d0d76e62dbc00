//! Per-file formatting
//!
//! One file goes `read -> decode -> format -> apply -> encode -> write`. Any
//! failing step leaves the file as it was.

use std::fs;
use std::path::Path;

use super::writer;
use crate::encoding::TextEncoding;
use crate::engine::{CodeFormatter, FormatMode};
use crate::error::FileError;

/// Successful result of formatting one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// The file was rewritten with formatted content
    Formatted,
    /// The file was already formatted and was not written
    Unchanged,
}

/// Formats single files in place with a configured engine
pub struct FileFormatter<'a, F: CodeFormatter> {
    engine: &'a F,
    encoding: TextEncoding,
}

impl<'a, F: CodeFormatter> FileFormatter<'a, F> {
    /// Create a formatter reading and writing files in `encoding`
    #[must_use]
    pub const fn new(engine: &'a F, encoding: TextEncoding) -> Self {
        Self { engine, encoding }
    }

    /// Format the file at `path` in place
    ///
    /// # Errors
    ///
    /// Returns the step that failed. The file is left untouched.
    pub fn format_file(&self, path: &Path) -> Result<FileOutcome, FileError> {
        let bytes = fs::read(path).map_err(FileError::Read)?;
        let contents = self
            .encoding
            .decode(&bytes)
            .ok_or(FileError::Decode {
                encoding: self.encoding.name(),
            })?;

        let edit = self
            .engine
            .format(&contents, FormatMode::WHOLE_FILE)
            .ok_or(FileError::Format)?;
        if edit.is_empty() {
            return Ok(FileOutcome::Unchanged);
        }

        let formatted = edit.apply(&contents).map_err(FileError::Apply)?;
        if formatted == contents {
            return Ok(FileOutcome::Unchanged);
        }

        let encoded = self.encoding.encode(&formatted).ok_or(FileError::Encode {
            encoding: self.encoding.name(),
        })?;
        writer::replace_file(path, &encoded).map_err(FileError::Write)?;

        Ok(FileOutcome::Formatted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ReplaceEdit, TextEdit};
    use tempfile::TempDir;

    /// Uppercases sources, refuses any containing `BROKEN`
    struct UppercaseEngine;

    impl CodeFormatter for UppercaseEngine {
        fn format(&self, source: &str, mode: FormatMode) -> Option<TextEdit> {
            assert_eq!(mode, FormatMode::WHOLE_FILE);
            if source.contains("BROKEN") {
                return None;
            }
            Some(TextEdit::between(source, &source.to_uppercase()))
        }
    }

    /// Returns the same canned edits for every source
    struct CannedEngine(TextEdit);

    impl CodeFormatter for CannedEngine {
        fn format(&self, _source: &str, _mode: FormatMode) -> Option<TextEdit> {
            Some(self.0.clone())
        }
    }

    fn write(dir: &TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_file_is_rewritten() {
        let tmp = TempDir::new().unwrap();
        let file = write(&tmp, "Foo.java", b"class foo {}\n");

        let formatter = FileFormatter::new(&UppercaseEngine, TextEncoding::default());

        assert_eq!(formatter.format_file(&file).unwrap(), FileOutcome::Formatted);
        assert_eq!(fs::read_to_string(&file).unwrap(), "CLASS FOO {}\n");
    }

    #[test]
    fn test_already_formatted_is_byte_identical() {
        let tmp = TempDir::new().unwrap();
        let file = write(&tmp, "Foo.java", b"CLASS FOO {}\n");

        let formatter = FileFormatter::new(&UppercaseEngine, TextEncoding::default());

        assert_eq!(formatter.format_file(&file).unwrap(), FileOutcome::Unchanged);
        assert_eq!(fs::read(&file).unwrap(), b"CLASS FOO {}\n");
    }

    #[test]
    fn test_engine_failure_leaves_file() {
        let tmp = TempDir::new().unwrap();
        let file = write(&tmp, "Bad.java", b"class BROKEN {");

        let formatter = FileFormatter::new(&UppercaseEngine, TextEncoding::default());

        assert!(matches!(formatter.format_file(&file), Err(FileError::Format)));
        assert_eq!(fs::read(&file).unwrap(), b"class BROKEN {");
    }

    #[test]
    fn test_invalid_edit_leaves_file() {
        let tmp = TempDir::new().unwrap();
        let file = write(&tmp, "Short.java", b"abc");

        let engine = CannedEngine(TextEdit::new().with(ReplaceEdit::new(2, 10, "x")));
        let formatter = FileFormatter::new(&engine, TextEncoding::default());

        assert!(matches!(formatter.format_file(&file), Err(FileError::Apply(_))));
        assert_eq!(fs::read(&file).unwrap(), b"abc");
    }

    #[test]
    fn test_missing_file() {
        let tmp = TempDir::new().unwrap();
        let formatter = FileFormatter::new(&UppercaseEngine, TextEncoding::default());

        let result = formatter.format_file(&tmp.path().join("Missing.java"));
        assert!(matches!(result, Err(FileError::Read(_))));
    }

    #[test]
    fn test_undecodable_file_is_left_alone() {
        let tmp = TempDir::new().unwrap();
        let file = write(&tmp, "Latin.java", b"// caf\xe9\n");

        let formatter = FileFormatter::new(&UppercaseEngine, TextEncoding::default());

        assert!(matches!(
            formatter.format_file(&file),
            Err(FileError::Decode { encoding: "UTF-8" })
        ));
        assert_eq!(fs::read(&file).unwrap(), b"// caf\xe9\n");
    }

    #[test]
    fn test_named_encoding_round_trips_non_ascii() {
        let tmp = TempDir::new().unwrap();
        let content = b"// na\xefve caf\xe9\nclass A {}\n";
        let file = write(&tmp, "A.java", content);

        let engine = CannedEngine(TextEdit::new());
        let encoding = TextEncoding::for_label("iso-8859-1").unwrap();
        let formatter = FileFormatter::new(&engine, encoding);

        assert_eq!(formatter.format_file(&file).unwrap(), FileOutcome::Unchanged);
        assert_eq!(fs::read(&file).unwrap(), content);
    }

    #[test]
    fn test_named_encoding_used_for_write() {
        let tmp = TempDir::new().unwrap();
        let file = write(&tmp, "A.java", b"// caf\xe9\nclass a {}\n");

        let encoding = TextEncoding::for_label("iso-8859-1").unwrap();
        let formatter = FileFormatter::new(&UppercaseEngine, encoding);

        assert_eq!(formatter.format_file(&file).unwrap(), FileOutcome::Formatted);
        assert_eq!(fs::read(&file).unwrap(), b"// CAF\xc9\nCLASS A {}\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_unwritable_directory_is_write_error() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let file = write(&tmp, "A.java", b"class a {}\n");
        fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o555)).unwrap();
        if fs::write(tmp.path().join(".writable"), "").is_ok() {
            // Permissions are not enforced for this user (root)
            fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let formatter = FileFormatter::new(&UppercaseEngine, TextEncoding::default());
        let result = formatter.format_file(&file);
        fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o755)).unwrap();

        assert!(matches!(result, Err(FileError::Write(_))));
        assert_eq!(fs::read(&file).unwrap(), b"class a {}\n");
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_unencodable_result_is_not_written() {
        let tmp = TempDir::new().unwrap();
        let file = write(&tmp, "A.java", b"class A {}");

        let engine = CannedEngine(TextEdit::new().with(ReplaceEdit::new(0, 0, "// \u{2603}\n")));
        let encoding = TextEncoding::for_label("latin1").unwrap();
        let formatter = FileFormatter::new(&engine, encoding);

        assert!(matches!(
            formatter.format_file(&file),
            Err(FileError::Encode { .. })
        ));
        assert_eq!(fs::read(&file).unwrap(), b"class A {}");
    }
}
