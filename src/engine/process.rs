//! Engine backed by an external formatter program
//!
//! The program receives the source on stdin and prints the formatted source
//! on stdout. A non-zero exit status means the source could not be formatted.

use std::fs::File;
use std::io::{self, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::NamedTempFile;

use super::{CodeFormatter, FormatMode, FormatterFactory, TextEdit};
use crate::config::{FormatterOptions, properties};
use crate::error::EngineError;

/// Argument placeholder replaced by the path of a properties file holding the options
pub const CONFIG_PLACEHOLDER: &str = "{config}";

/// Configures a [`ProcessEngine`] for a program and its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEngineFactory {
    program: String,
    args: Vec<String>,
}

impl ProcessEngineFactory {
    /// Create a factory; `program` is looked up on `PATH` unless it is a path
    #[must_use]
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Whether any argument carries [`CONFIG_PLACEHOLDER`]
    #[must_use]
    pub fn passes_options(&self) -> bool {
        self.args.iter().any(|a| a.contains(CONFIG_PLACEHOLDER))
    }
}

impl FormatterFactory for ProcessEngineFactory {
    type Formatter = ProcessEngine;

    fn configure(&self, options: &FormatterOptions) -> Result<ProcessEngine, EngineError> {
        let program =
            which::which(&self.program).map_err(|source| EngineError::ProgramNotFound {
                program: self.program.clone(),
                source,
            })?;

        let options_file = if self.passes_options() {
            Some(write_options(options).map_err(EngineError::Options)?)
        } else {
            if !options.is_empty() {
                tracing::warn!(
                    "{} formatter option(s) not passed to {}: no argument contains {CONFIG_PLACEHOLDER}",
                    options.len(),
                    self.program
                );
            }
            None
        };

        let args = match &options_file {
            Some(file) => {
                let path = file.path().to_string_lossy();
                self.args
                    .iter()
                    .map(|a| a.replace(CONFIG_PLACEHOLDER, &path))
                    .collect()
            }
            None => self.args.clone(),
        };

        tracing::debug!(
            "Configured formatter {} with {} option(s)",
            program.display(),
            options.len()
        );

        Ok(ProcessEngine {
            program,
            args,
            _options_file: options_file,
        })
    }
}

fn write_options(options: &FormatterOptions) -> io::Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix("fmtree-")
        .suffix(".prefs")
        .tempfile()?;
    file.write_all(properties::to_string(options.iter()).as_bytes())?;
    file.flush()?;
    Ok(file)
}

/// Runs an external formatter program once per file
#[derive(Debug)]
pub struct ProcessEngine {
    program: PathBuf,
    args: Vec<String>,
    // Deleted when the engine is dropped
    _options_file: Option<NamedTempFile>,
}

impl ProcessEngine {
    /// Resolved program path
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments with placeholders substituted
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    fn run(&self, source: &str, include_comments: bool) -> io::Result<Output> {
        let mut input: File = tempfile::tempfile()?;
        input.write_all(source.as_bytes())?;
        input.seek(SeekFrom::Start(0))?;

        Command::new(&self.program)
            .args(&self.args)
            .env("FMTREE_FORMAT_KIND", "compilation-unit")
            .env("FMTREE_INCLUDE_COMMENTS", include_comments.to_string())
            .stdin(Stdio::from(input))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
    }
}

impl CodeFormatter for ProcessEngine {
    fn format(&self, source: &str, mode: FormatMode) -> Option<TextEdit> {
        let FormatMode::CompilationUnit { include_comments } = mode;

        let output = match self.run(source, include_comments) {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!("Failed to run formatter {}: {e}", self.program.display());
                return None;
            }
        };

        if !output.status.success() {
            tracing::debug!(
                "Formatter exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return None;
        }

        match String::from_utf8(output.stdout) {
            Ok(formatted) => Some(TextEdit::between(source, &formatted)),
            Err(_) => {
                tracing::debug!("Formatter output is not valid UTF-8");
                None
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn engine(program: &str, args: &[&str]) -> ProcessEngine {
        ProcessEngineFactory::new(program, args.iter().map(ToString::to_string).collect())
            .configure(&FormatterOptions::new())
            .unwrap()
    }

    #[test]
    fn test_missing_program() {
        let factory = ProcessEngineFactory::new("fmtree-no-such-formatter", vec![]);
        let err = factory.configure(&FormatterOptions::new()).unwrap_err();

        assert!(matches!(err, EngineError::ProgramNotFound { .. }));
        assert!(err.to_string().contains("fmtree-no-such-formatter"));
    }

    #[test]
    fn test_formatted_output_becomes_edits() {
        let engine = engine("tr", &["a-z", "A-Z"]);
        let source = "class a {\n}\n";

        let edit = engine.format(source, FormatMode::WHOLE_FILE).unwrap();

        assert_eq!(edit.apply(source).unwrap(), "CLASS A {\n}\n");
    }

    #[test]
    fn test_identical_output_is_empty_edit() {
        let engine = engine("cat", &[]);
        let edit = engine.format("class A {}\n", FormatMode::WHOLE_FILE).unwrap();
        assert!(edit.is_empty());
    }

    #[test]
    fn test_failing_program_yields_no_edits() {
        let engine = engine("sh", &["-c", "echo 'syntax error' >&2; exit 3"]);
        assert!(engine.format("class {", FormatMode::WHOLE_FILE).is_none());
    }

    #[test]
    fn test_mode_is_exported_to_program() {
        let engine = engine(
            "sh",
            &["-c", "printf '%s %s' \"$FMTREE_FORMAT_KIND\" \"$FMTREE_INCLUDE_COMMENTS\""],
        );

        let edit = engine
            .format(
                "",
                FormatMode::CompilationUnit {
                    include_comments: false,
                },
            )
            .unwrap();

        assert_eq!(edit.apply("").unwrap(), "compilation-unit false");
    }

    #[test]
    fn test_passes_options_only_with_placeholder() {
        let plain = ProcessEngineFactory::new("cat", vec!["-u".to_string()]);
        assert!(!plain.passes_options());

        let embedded = ProcessEngineFactory::new("fmt", vec![format!("--prefs={CONFIG_PLACEHOLDER}")]);
        assert!(embedded.passes_options());
    }

    #[test]
    fn test_config_placeholder_receives_options() {
        let options: FormatterOptions = [("org.eclipse.jdt.core.formatter.lineSplit", "120")]
            .into_iter()
            .collect();
        let engine = ProcessEngineFactory::new("cat", vec![CONFIG_PLACEHOLDER.to_string()])
            .configure(&options)
            .unwrap();

        assert!(!engine.args()[0].contains(CONFIG_PLACEHOLDER));

        let edit = engine.format("ignored\n", FormatMode::WHOLE_FILE).unwrap();
        assert_eq!(
            edit.apply("ignored\n").unwrap(),
            "org.eclipse.jdt.core.formatter.lineSplit=120\n"
        );
    }
}
