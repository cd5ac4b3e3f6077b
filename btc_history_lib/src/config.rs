//! Download configuration.
//!
//! The EUR and market cap columns are deliberate approximations: a fixed
//! divisor stands in for the EUR/USD rate and a fixed multiplier stands in
//! for the circulating supply. Both are kept as plain configuration values
//! rather than being looked up from a live source.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::HistoryError;
use crate::validation;

/// Instrument requested when none is configured.
pub const DEFAULT_SYMBOL: &str = "BTC-USD";
/// Yahoo range keyword covering all available history.
pub const DEFAULT_RANGE: &str = "max";
/// Bar interval. Output rows are daily, so this is not configurable.
pub const DAILY_INTERVAL: &str = "1d";
/// Static USD to EUR approximation: `price_eur = price_usd / 1.1`.
pub const DEFAULT_EUR_DIVISOR: f64 = 1.1;
/// Static circulating supply approximation: `market_cap = price_usd * 19_500_000`.
pub const DEFAULT_MARKET_CAP_MULTIPLIER: f64 = 19_500_000.0;
/// Output file, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "btc-price-history.csv";

/// Everything a download run needs to know.
///
/// Loaded from TOML with every field optional; missing fields fall back to
/// the defaults above, which reproduce the fixed behaviour of a plain
/// `btc-history` run.
///
/// ```toml
/// symbol = "BTC-USD"
/// start_date = "2014-09-17"
/// eur_divisor = 1.1
/// market_cap_multiplier = 19500000.0
/// output_path = "btc-price-history.csv"
/// decimals = 2
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistoryConfig {
    /// Yahoo Finance symbol of the instrument.
    pub symbol: String,
    /// Yahoo range keyword, used when `start_date` is not set.
    pub range: String,
    /// First day to request. When set, the request covers `[start_date, now]`
    /// instead of `range`.
    pub start_date: Option<NaiveDate>,
    /// Divisor turning the USD close into the approximate EUR price.
    pub eur_divisor: f64,
    /// Multiplier turning the USD close into the approximate market cap.
    pub market_cap_multiplier: f64,
    /// Destination CSV file, overwritten on every run.
    pub output_path: PathBuf,
    /// Round numeric columns to this many decimals. `None` keeps full precision.
    pub decimals: Option<u32>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_SYMBOL.to_string(),
            range: DEFAULT_RANGE.to_string(),
            start_date: None,
            eur_divisor: DEFAULT_EUR_DIVISOR,
            market_cap_multiplier: DEFAULT_MARKET_CAP_MULTIPLIER,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            decimals: None,
        }
    }
}

impl HistoryConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, HistoryError> {
        toml::from_str(content)
            .map_err(|e| HistoryError::InvalidInput(format!("config parse failed: {}", e)))
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self, HistoryError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Check every field and normalize the symbol and range in place.
    pub fn validate(mut self) -> Result<Self, HistoryError> {
        self.symbol = validation::validate_symbol(&self.symbol)?;
        self.range = validation::validate_range(&self.range)?;
        if let Some(date) = self.start_date {
            validation::validate_start_date(date)?;
        }
        validation::validate_eur_divisor(self.eur_divisor)?;
        validation::validate_market_cap_multiplier(self.market_cap_multiplier)?;
        if let Some(decimals) = self.decimals {
            validation::validate_decimals(decimals)?;
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(HistoryError::InvalidInput(
                "output path is empty".to_string(),
            ));
        }
        Ok(self)
    }
}
