//! Default command: download the full daily series from Yahoo Finance.

use anyhow::{anyhow, Result};
use btc_history_lib::{download_history, validation, HistoryConfig, YahooClient};
use clap::Args;

use super::CommonArgs;
use crate::output;

/// Download CLI arguments.
#[derive(Args, Debug, Default)]
pub struct DownloadArgs {
    /// Yahoo Finance symbol (default BTC-USD)
    #[arg(long, env = "BTC_HISTORY_SYMBOL")]
    pub symbol: Option<String>,

    /// Yahoo range keyword, e.g. max, 10y, ytd (default max)
    #[arg(long)]
    pub range: Option<String>,

    /// First day to download (YYYY-MM-DD); takes precedence over --range
    #[arg(long)]
    pub start_date: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl DownloadArgs {
    pub fn resolve_config(&self) -> Result<HistoryConfig> {
        let mut config = self.common.base_config()?;
        if let Some(symbol) = &self.symbol {
            config.symbol = symbol.clone();
        }
        if let Some(range) = &self.range {
            config.range = range.clone();
        }
        if let Some(start) = &self.start_date {
            config.start_date = Some(validation::validate_date(start)?);
        }
        Ok(config.validate()?)
    }
}

/// Run the download.
pub async fn run(args: &DownloadArgs) -> Result<()> {
    let config = args.resolve_config()?;
    tracing::debug!(?config, "Resolved configuration");
    let yahoo = YahooClient::new().map_err(|e| anyhow!("Failed to create Yahoo client: {}", e))?;

    output::print_start(&format!(
        "Downloading {} data from Yahoo Finance...",
        config.symbol
    ));

    let spinner = output::spinner("Waiting for Yahoo Finance");
    let result = download_history(&yahoo, &config).await;
    spinner.finish_and_clear();

    let summary = result?;
    output::print_summary(&summary, "downloaded");
    Ok(())
}
