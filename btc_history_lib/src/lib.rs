//! Library layer for btc-history: daily price downloads from Yahoo Finance.
//!
//! Fetches a daily OHLCV series, derives the USD/EUR/volume/market-cap output
//! columns from configurable approximations, and writes them as CSV.

pub mod config;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod raw_csv;
pub mod source;
pub mod transform;
pub mod types;
pub mod validation;
pub mod yahoo;

pub use config::HistoryConfig;
pub use error::HistoryError;
pub use pipeline::download_history;
pub use raw_csv::{RawCsvError, RawCsvSource};
pub use source::HistorySource;
pub use types::{DailyPriceRecord, DailyQuote, DownloadSummary};
pub use yahoo::{YahooClient, YahooError};
