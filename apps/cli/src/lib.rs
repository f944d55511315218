//! `ragcfg` operator commands.
//!
//! Documents go to stdout, diagnostics go to stderr through `tracing`.

pub mod args;
mod commands;

pub use commands::run;

use anyhow::Result;
use ragcfg::domain::LogSettings;
use ragcfg_logger::{LevelFilter, Logger};

/// Installs the global logger from the `[log]` settings.
///
/// # Errors
/// Fails for an unknown level or filter, an unusable log directory, or when a
/// logger is already installed.
pub fn init_logger(settings: &LogSettings, verbose: bool) -> Result<Logger> {
    let mut builder = Logger::builder().name("ragcfg").console(true).level_str(&settings.level)?;
    if verbose {
        builder = builder.level(LevelFilter::DEBUG);
    }
    if let Some(filter) = &settings.filter {
        builder = builder.env_filter(filter.clone());
    }

    let logger = match &settings.directory {
        Some(directory) => builder.directory(directory).json(settings.json).init()?,
        None => builder.init()?,
    };
    Ok(logger)
}
