pub mod config;
pub mod format;

pub use config::Config;
pub use format::{Format, FormatOptions};
