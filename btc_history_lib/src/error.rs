//! Error types for the library layer.

use std::fmt;

use crate::raw_csv::RawCsvError;
use crate::yahoo::YahooError;

/// Errors produced while downloading, transforming, or writing a price history.
#[derive(Debug)]
pub enum HistoryError {
    /// The Yahoo Finance request failed (network, rate limit, unknown symbol).
    Yahoo(YahooError),
    /// A raw OHLCV export could not be read.
    RawCsv(RawCsvError),
    /// Serializing the output rows failed.
    Csv(csv::Error),
    /// Creating or flushing the output file failed.
    Io(std::io::Error),
    /// A configuration value failed validation.
    InvalidInput(String),
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yahoo(e) => write!(f, "Upstream error: {}", e),
            Self::RawCsv(e) => write!(f, "Raw CSV error: {}", e),
            Self::Csv(e) => write!(f, "CSV write error: {}", e),
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for HistoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Yahoo(e) => Some(e),
            Self::RawCsv(e) => Some(e),
            Self::Csv(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::InvalidInput(_) => None,
        }
    }
}

impl From<YahooError> for HistoryError {
    fn from(e: YahooError) -> Self {
        Self::Yahoo(e)
    }
}

impl From<RawCsvError> for HistoryError {
    fn from(e: RawCsvError) -> Self {
        Self::RawCsv(e)
    }
}

impl From<csv::Error> for HistoryError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e)
    }
}

impl From<std::io::Error> for HistoryError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
