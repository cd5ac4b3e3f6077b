//! Yahoo Finance client wrapper for fetching daily price history.
//!
//! Provides YahooClient, which requests the daily OHLCV series for one symbol
//! as an explicit start..now window (or a shorter range keyword) and converts
//! the upstream quotes into [`DailyQuote`] values.

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;
use time::OffsetDateTime;
use yahoo_finance_api::YResponse;

use crate::config::{HistoryConfig, DAILY_INTERVAL};
use crate::types::DailyQuote;

/// Start of the window requested for `range = "max"`. Yahoo may answer a
/// `range=max` query with monthly or quarterly bars, so full history is
/// requested as an explicit period instead.
pub const EARLIEST_HISTORY_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1900, 1, 1) {
    Some(date) => date,
    None => panic!("invalid earliest history date"),
};

/// Errors from Yahoo Finance operations.
#[derive(Error, Debug)]
pub enum YahooError {
    #[error("Rate limited by Yahoo Finance (HTTP 429)")]
    RateLimited,
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid timestamp in response: {0}")]
    InvalidTimestamp(String),
    #[error("Expected daily bars but Yahoo returned granularity '{0}'")]
    UnexpectedGranularity(String),
    #[error(transparent)]
    Upstream(#[from] yahoo_finance_api::YahooError),
}

/// Convert chrono::NaiveDate to time::OffsetDateTime at UTC midnight.
pub fn date_to_offset_datetime(date: NaiveDate) -> Result<OffsetDateTime, YahooError> {
    let datetime = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| YahooError::InvalidDate(date.to_string()))?;

    let timestamp = datetime.and_utc().timestamp();

    OffsetDateTime::from_unix_timestamp(timestamp)
        .map_err(|_| YahooError::InvalidDate(date.to_string()))
}

/// Convert a unix timestamp in seconds to a UTC datetime.
pub fn unix_to_datetime(timestamp: i64) -> Result<DateTime<Utc>, YahooError> {
    DateTime::from_timestamp(timestamp, 0)
        .ok_or_else(|| YahooError::InvalidTimestamp(timestamp.to_string()))
}

fn classify(err: yahoo_finance_api::YahooError) -> YahooError {
    match err {
        yahoo_finance_api::YahooError::TooManyRequests(_) => YahooError::RateLimited,
        other => YahooError::Upstream(other),
    }
}

/// First day of the explicit window to request, or `None` to send the
/// configured range keyword as-is.
pub fn history_start(config: &HistoryConfig) -> Option<NaiveDate> {
    match config.start_date {
        Some(start) => Some(start),
        None if config.range == "max" => Some(EARLIEST_HISTORY_DATE),
        None => None,
    }
}

/// Convert a chart reply into daily quotes.
///
/// Rejects replies whose bars are not daily. Bars without a close are
/// skipped by the connector; a reply with no bars at all is an upstream
/// `NoQuotes` error.
pub fn daily_quotes(response: &YResponse) -> Result<Vec<DailyQuote>, YahooError> {
    let granularity = response.metadata().map_err(classify)?.data_granularity;
    if granularity != DAILY_INTERVAL {
        return Err(YahooError::UnexpectedGranularity(granularity));
    }

    response
        .quotes()
        .map_err(classify)?
        .into_iter()
        .map(|quote| {
            Ok(DailyQuote {
                timestamp: unix_to_datetime(quote.timestamp)?,
                open: quote.open,
                high: quote.high,
                low: quote.low,
                close: quote.close,
                volume: quote.volume as f64,
            })
        })
        .collect()
}

/// Yahoo Finance client for daily history downloads.
pub struct YahooClient {
    connector: yahoo_finance_api::YahooConnector,
}

impl YahooClient {
    /// Create a new YahooClient with default configuration.
    pub fn new() -> Result<Self, YahooError> {
        Ok(Self {
            connector: yahoo_finance_api::YahooConnector::new()?,
        })
    }

    /// Fetch the daily series described by `config`.
    ///
    /// Returns the quotes in upstream order. An unknown symbol or a symbol
    /// without data surfaces as `YahooError::Upstream`.
    pub async fn fetch_daily_history(
        &self,
        config: &HistoryConfig,
    ) -> Result<Vec<DailyQuote>, YahooError> {
        let response = match history_start(config) {
            Some(start) => {
                let start = date_to_offset_datetime(start)?;
                let end = OffsetDateTime::now_utc();
                tracing::debug!(
                    "Requesting {} daily history from {} to {}",
                    config.symbol,
                    start.date(),
                    end.date()
                );
                self.connector
                    .get_quote_history(&config.symbol, start, end)
                    .await
            }
            None => {
                tracing::debug!(
                    "Requesting {} history, range={} interval={}",
                    config.symbol,
                    config.range,
                    DAILY_INTERVAL
                );
                self.connector
                    .get_quote_range(&config.symbol, DAILY_INTERVAL, &config.range)
                    .await
            }
        }
        .map_err(classify)?;

        let quotes = daily_quotes(&response)?;
        tracing::info!("Fetched {} quotes for {}", quotes.len(), config.symbol);
        Ok(quotes)
    }
}
