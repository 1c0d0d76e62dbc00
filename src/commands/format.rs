use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use anyhow::Context;
use fmtree::encoding::TextEncoding;
use fmtree::engine::ProcessEngineFactory;
use fmtree::format::{FormatReporter, FormatRunner, FormatSettings};

/// Options collected from the `format` subcommand
pub struct FormatOptions {
    pub config: String,
    pub source_root: PathBuf,
    pub extension: String,
    pub encoding: Option<String>,
    pub strict: bool,
    pub engine: String,
    pub engine_args: Vec<String>,
}

pub struct Format;

impl Format {
    pub fn execute(options: FormatOptions, interrupted: Arc<AtomicBool>) -> anyhow::Result<()> {
        let encoding = TextEncoding::from_option(options.encoding.as_deref())
            .context("Invalid --encoding")?;

        let settings = FormatSettings {
            config: options.config,
            source_root: options.source_root,
            extension: options.extension,
            encoding,
        };
        let factory = ProcessEngineFactory::new(options.engine, options.engine_args);

        let report = FormatRunner::new(settings)
            .with_interrupt(interrupted)
            .run(&factory)?;

        tracing::info!(
            "Formatted {} of {} file(s)",
            report.formatted,
            report.total_files()
        );
        println!("{}", FormatReporter::generate_summary(&report));

        if report.interrupted {
            std::process::exit(130);
        }

        if options.strict && !report.is_success() {
            anyhow::bail!("{} file(s) failed to format", report.failures.len());
        }

        Ok(())
    }
}
