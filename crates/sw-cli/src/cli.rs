//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::style::ColorMode;

/// When did I sleep?
///
/// Reads a log of sleep sessions and prints totals, a time-of-day histogram
/// and one bar per day showing when sleep happened.
#[derive(Debug, Parser)]
#[command(name = "sleptwhen", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the sleep log (overrides the configured `data_file`).
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// When to colour the output.
    #[arg(long, value_enum, global = true)]
    pub color: Option<ColorMode>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the full report (default).
    Report {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print only the observed period and sleep totals.
    Summary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_options_after_subcommand() {
        let cli = Cli::parse_from([
            "sleptwhen",
            "report",
            "--json",
            "--file",
            "night.data",
            "--color",
            "never",
        ]);
        assert_eq!(cli.file, Some(PathBuf::from("night.data")));
        assert_eq!(cli.color, Some(ColorMode::Never));
        assert!(matches!(cli.command, Some(Commands::Report { json: true })));
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::parse_from(["sleptwhen"]);
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
