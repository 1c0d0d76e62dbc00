use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use fmtree::format::{DEFAULT_CONFIG_PATH, DEFAULT_EXTENSION, DEFAULT_SOURCE_ROOT};

/// Source Tree Formatter
///
/// Recursively reformat source files in place with an external code formatting engine
#[derive(Parser, Debug)]
#[command(name = "fmtree")]
#[command(long_about = None, version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only report errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Format every matching file below the source root in place
    Format {
        #[command(flatten)]
        config: ConfigArgs,

        /// Directory to format recursively
        #[arg(long, env = "FMTREE_SOURCE_ROOT", value_name = "DIR", default_value = DEFAULT_SOURCE_ROOT)]
        source_root: PathBuf,

        /// Extension of files to format (case-insensitive)
        #[arg(long, value_name = "EXT", default_value = DEFAULT_EXTENSION)]
        extension: String,

        /// Character encoding of source files (default: UTF-8)
        #[arg(long, env = "FMTREE_ENCODING", value_name = "LABEL")]
        encoding: Option<String>,

        /// Exit with an error if any file failed to format
        #[arg(long)]
        strict: bool,

        /// Formatter program; reads source on stdin, prints formatted source on stdout
        #[arg(long, value_name = "PROGRAM")]
        engine: String,

        /// Arguments for the formatter program; `{config}` expands to an options file
        #[arg(last = true, value_name = "ARGS")]
        engine_args: Vec<String>,
    },

    /// Show the resolved formatter options
    Config {
        #[command(flatten)]
        config: ConfigArgs,
    },
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Formatter options file (properties syntax) or bundled resource name
    #[arg(long, env = "FMTREE_CONFIG", value_name = "PATH", default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,
}
