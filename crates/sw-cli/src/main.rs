use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sw_cli::commands::{report, summary};
use sw_cli::{Cli, Commands, Config};

/// Load config and apply command-line overrides.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config =
        Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(file) = &cli.file {
        config.data_file.clone_from(file);
    }
    if let Some(color) = cli.color {
        config.color = color;
    }
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support; warnings stay visible by default
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = load_config(&cli)?;
    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        Some(Commands::Report { json }) => report::run(&mut stdout, &config, *json)?,
        Some(Commands::Summary) => summary::run(&mut stdout, &config)?,
        None => report::run(&mut stdout, &config, false)?,
    }

    Ok(())
}
