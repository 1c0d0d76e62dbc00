//! Format run reporting and statistics

use std::error::Error;
use std::fmt::Write;

use super::FormatReport;

/// Format run reporter
pub struct FormatReporter;

impl FormatReporter {
    /// Generate a summary report
    #[must_use]
    pub fn generate_summary(report: &FormatReport) -> String {
        let mut output = String::new();

        output.push_str("\n=== Format Summary ===\n");
        let _ = writeln!(output, "Formatted: {}", report.formatted);
        let _ = writeln!(output, "Unchanged: {}", report.unchanged);
        let _ = writeln!(output, "Failed:    {}", report.failures.len());

        if !report.failures.is_empty() {
            let _ = writeln!(output, "\nErrors ({}):", report.failures.len());
            for failure in &report.failures {
                let _ = writeln!(
                    output,
                    "  - {}: {}",
                    failure.path.display(),
                    describe(&failure.error)
                );
            }
        }

        let _ = writeln!(output, "\nTotal files: {}", report.total_files());

        if report.interrupted {
            output.push_str("Status: ✗ Interrupted, remaining files not formatted\n");
        } else if report.is_success() {
            output.push_str("Status: ✓ Success\n");
        } else {
            output.push_str("Status: ✗ Completed with errors\n");
        }

        output
    }
}

/// Render an error with its chain of causes, `outer: inner: root`
pub(crate) fn describe(error: &dyn Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let _ = write!(message, ": {cause}");
        source = cause.source();
    }
    message
}
