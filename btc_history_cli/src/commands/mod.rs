//! CLI subcommand implementations.

pub mod convert;
pub mod download;

use std::path::PathBuf;

use anyhow::{Context, Result};
use btc_history_lib::HistoryConfig;
use clap::Args;

/// Flags shared by every command that writes the output CSV.
#[derive(Args, Debug, Default)]
pub struct CommonArgs {
    /// TOML file with configuration defaults
    #[arg(long, env = "BTC_HISTORY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output CSV path (overwritten)
    #[arg(long, env = "BTC_HISTORY_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Divisor for the approximate EUR price (default 1.1)
    #[arg(long)]
    pub eur_divisor: Option<f64>,

    /// Multiplier for the approximate market cap (default 19500000)
    #[arg(long)]
    pub market_cap_multiplier: Option<f64>,

    /// Round numeric columns to this many decimals (default: full precision)
    #[arg(long)]
    pub decimals: Option<u32>,
}

impl CommonArgs {
    /// Start from the config file (or defaults) and apply flag overrides.
    pub fn base_config(&self) -> Result<HistoryConfig> {
        let mut config = match &self.config {
            Some(path) => HistoryConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => HistoryConfig::default(),
        };
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if let Some(divisor) = self.eur_divisor {
            config.eur_divisor = divisor;
        }
        if let Some(multiplier) = self.market_cap_multiplier {
            config.market_cap_multiplier = multiplier;
        }
        if let Some(decimals) = self.decimals {
            config.decimals = Some(decimals);
        }
        Ok(config)
    }
}
