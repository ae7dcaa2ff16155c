//! Relscout - release version discovery and mirroring
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use relscout::cli::commands;
use relscout::cli::{Cli, Commands};
use relscout::config::{Config, ConfigManager};
use relscout::error::RelscoutResult;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> RelscoutResult<()> {
    let cli = Cli::parse();

    // Completions need neither config nor logging
    if let Commands::Completions { shell } = cli.command {
        commands::completions(shell);
        return Ok(());
    }

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let mut config = config_manager.load().await?;

    init_logging(cli.verbose, &config);
    debug!("Using config {}", config_manager.path().display());

    apply_overrides(&mut config, &cli);

    match cli.command {
        Commands::Completions { .. } => unreachable!("Completions handled above"),
        Commands::Detect(args) => commands::detect(args, &config).await,
        Commands::Bruteforce(args) => commands::bruteforce(args, &config).await,
        Commands::Cache(args) => commands::cache(args, &config).await,
        Commands::Download(args) => commands::download(args, &config).await,
        Commands::Platforms => commands::platforms(&config).await,
        Commands::Rename(args) => commands::rename(args, &config).await,
        Commands::Release(args) => commands::release(args, &config).await,
        Commands::Config(args) => commands::config(args, &config, &config_manager).await,
    }
}

/// 0 = warn, 1 = info, 2+ = debug; `general.verbose` raises the floor to info
fn init_logging(verbose: u8, config: &Config) {
    let level = match verbose {
        0 if config.general.verbose => 1,
        n => n,
    };
    let filter = match level {
        0 => EnvFilter::new("relscout=warn"),
        1 => EnvFilter::new("relscout=info"),
        _ => EnvFilter::new("relscout=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr);

    if config.general.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Global flags win over the config file
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(ref dir) = cli.cache_dir {
        config.cache.dir = Some(dir.clone());
    }
    if let Some(ref host) = cli.host {
        config.source.host = host.clone();
    }
}
