//! The seam between the pipeline and where quotes come from.

use crate::config::HistoryConfig;
use crate::error::HistoryError;
use crate::raw_csv::RawCsvSource;
use crate::types::DailyQuote;
use crate::yahoo::YahooClient;

/// Anything that can produce a daily OHLCV series for a configuration.
///
/// An `Ok` with an empty vector is a legitimate answer and is passed through
/// to the pipeline, which writes a header-only file.
#[allow(async_fn_in_trait)]
pub trait HistorySource {
    /// Short label used in log lines.
    fn name(&self) -> &str;

    async fn fetch_daily(&self, config: &HistoryConfig) -> Result<Vec<DailyQuote>, HistoryError>;
}

impl HistorySource for YahooClient {
    fn name(&self) -> &str {
        "yahoo"
    }

    async fn fetch_daily(&self, config: &HistoryConfig) -> Result<Vec<DailyQuote>, HistoryError> {
        Ok(self.fetch_daily_history(config).await?)
    }
}

impl HistorySource for RawCsvSource {
    fn name(&self) -> &str {
        "raw-csv"
    }

    async fn fetch_daily(&self, _config: &HistoryConfig) -> Result<Vec<DailyQuote>, HistoryError> {
        Ok(self.read_quotes()?)
    }
}
