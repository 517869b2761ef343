use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use simplelog::LevelFilter;

mod args;
mod extract;
mod regions;

/// Extracts transactions from Caisse d'Epargne PDF bank statements.
#[derive(Parser)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Logging level.
    #[arg(long, default_value = "Warn")]
    log_level: LevelFilter,
}

#[derive(Subcommand)]
enum Command {
    Extract(extract::Command),
    Regions(regions::Command),
}

pub fn run() -> Result<()> {
    let args = Args::parse();

    simplelog::SimpleLogger::init(args.log_level, simplelog::Config::default())
        .context("configuring logging")?;

    let xdg_dirs = xdg::BaseDirectories::with_prefix("bank-archive");

    use Command::*;
    match &args.command {
        Extract(cmd) => extract::run(cmd, &xdg_dirs),
        Regions(cmd) => regions::run(cmd, &xdg_dirs),
    }
}
