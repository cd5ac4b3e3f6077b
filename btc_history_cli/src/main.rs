mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "btc-history")]
#[command(about = "Download daily Bitcoin price history to CSV")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    // Used when no subcommand is given.
    #[command(flatten)]
    download: commands::download::DownloadArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the daily series from Yahoo Finance (default)
    Download(commands::download::DownloadArgs),
    /// Convert a raw Yahoo OHLCV export into the output format
    Convert(commands::convert::ConvertArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("btc_history=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Download(args)) => commands::download::run(args).await?,
        Some(Commands::Convert(args)) => commands::convert::run(args).await?,
        None => commands::download::run(&cli.download).await?,
    }

    Ok(())
}
