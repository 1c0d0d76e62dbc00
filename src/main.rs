mod cli;
mod commands;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() -> anyhow::Result<()> {
    // First Ctrl+C finishes the current file and stops; a second one exits at once
    let interrupted = Arc::new(AtomicBool::new(false));
    let interrupted_clone = Arc::clone(&interrupted);
    ctrlc::set_handler(move || {
        if interrupted_clone.swap(true, Ordering::SeqCst) {
            eprintln!("\n\nInterrupted by user (Ctrl+C)");
            std::process::exit(130); // Standard exit code for SIGINT
        }
        eprintln!("\n\nInterrupt received, stopping after the current file (Ctrl+C again to abort)");
    })
    .context("Failed to set Ctrl+C handler")?;

    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to initialize logging")?;

    match cli.command {
        Commands::Format {
            config,
            source_root,
            extension,
            encoding,
            strict,
            engine,
            engine_args,
        } => {
            let options = commands::FormatOptions {
                config: config.config,
                source_root,
                extension,
                encoding,
                strict,
                engine,
                engine_args,
            };
            commands::Format::execute(options, interrupted)
                .context("Failed to execute format command")?;
        }
        Commands::Config { config } => {
            commands::Config::execute(&config.config)
                .context("Failed to execute config command")?;
        }
    }

    Ok(())
}
