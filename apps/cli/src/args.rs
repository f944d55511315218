//! # CLI Argument Definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Inspect and replace the active pipeline configuration.
#[derive(Debug, Parser)]
#[command(name = "ragcfg")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Inspect and replace the active RAG pipeline configuration")]
pub struct Cli {
    /// Settings file (defaults to an optional `ragcfg.toml` in the working directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Log at debug level regardless of the configured level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the active configuration, or the default when none is usable
    Show,
    /// Print the built-in default configuration
    Default,
    /// Store a JSON document as the active configuration
    Save {
        /// JSON file to store
        file: PathBuf,
        /// Store the mapping as-is, without checking it against the configuration schema
        #[arg(long)]
        raw: bool,
    },
    /// Replace the active configuration with the built-in default
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from(["ragcfg", "save", "cfg.json", "--raw", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Save { raw: true, .. }));

        let cli = Cli::try_parse_from(["ragcfg", "--settings", "local.toml", "show"]).unwrap();
        assert_eq!(cli.settings, Some(PathBuf::from("local.toml")));
    }
}
