//! Convert a raw Yahoo OHLCV export (Date,Open,High,Low,Close,Adj Close,Volume)
//! into the output format without touching the network.

use std::path::PathBuf;

use anyhow::{Context, Result};
use btc_history_lib::{download_history, RawCsvSource};
use clap::Args;

use super::CommonArgs;
use crate::output;

/// Convert CLI arguments.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Raw OHLCV CSV file to read
    #[arg(long)]
    pub input: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn run(args: &ConvertArgs) -> Result<()> {
    let config = args.common.base_config()?.validate()?;
    tracing::debug!(?config, "Resolved configuration");
    let source = RawCsvSource::new(&args.input);

    output::print_start(&format!("Converting {}...", source.path().display()));

    let summary = download_history(&source, &config)
        .await
        .with_context(|| format!("failed to convert {}", source.path().display()))?;
    output::print_summary(&summary, "converted");
    Ok(())
}
