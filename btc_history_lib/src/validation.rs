use chrono::{NaiveDate, Utc};

use crate::error::HistoryError;

pub const MAX_SYMBOL_LENGTH: usize = 20;
pub const MAX_DECIMALS: u32 = 10;

/// Range keywords accepted by the Yahoo chart endpoint.
pub const VALID_RANGES: &[&str] = &[
    "1d", "5d", "1mo", "3mo", "6mo", "1y", "2y", "5y", "10y", "ytd", "max",
];

/// Validate an instrument symbol: trimmed, uppercased, and limited to the
/// characters Yahoo uses in tickers (`BTC-USD`, `^GSPC`, `EURUSD=X`, `BRK.B`).
pub fn validate_symbol(input: &str) -> Result<String, HistoryError> {
    let upper = input.trim().to_uppercase();
    if upper.is_empty() {
        return Err(HistoryError::InvalidInput("symbol is empty".to_string()));
    }
    if upper.len() > MAX_SYMBOL_LENGTH {
        return Err(HistoryError::InvalidInput(format!(
            "symbol exceeds maximum length of {} bytes",
            MAX_SYMBOL_LENGTH
        )));
    }
    if let Some(bad) = upper
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '^' | '=')))
    {
        return Err(HistoryError::InvalidInput(format!(
            "symbol '{}' contains invalid character '{}'",
            input.trim(),
            bad
        )));
    }
    Ok(upper)
}

/// Validate a history range keyword, case-insensitive.
pub fn validate_range(input: &str) -> Result<String, HistoryError> {
    let lower = input.trim().to_lowercase();
    if VALID_RANGES.contains(&lower.as_str()) {
        Ok(lower)
    } else {
        Err(HistoryError::InvalidInput(format!(
            "unknown range '{}'. Valid values: {}",
            input,
            VALID_RANGES.join(", ")
        )))
    }
}

/// Validate an absolute date in YYYY-MM-DD format.
pub fn validate_date(input: &str) -> Result<NaiveDate, HistoryError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
        HistoryError::InvalidInput(format!(
            "invalid date '{}'. Expected format: YYYY-MM-DD (e.g., 2014-09-17)",
            trimmed
        ))
    })
}

/// Validate a history start date: must not be in the future.
pub fn validate_start_date(date: NaiveDate) -> Result<NaiveDate, HistoryError> {
    let today = Utc::now().date_naive();
    if date > today {
        return Err(HistoryError::InvalidInput(format!(
            "start date {} is in the future",
            date
        )));
    }
    Ok(date)
}

/// Validate the EUR divisor: finite and strictly positive.
pub fn validate_eur_divisor(value: f64) -> Result<f64, HistoryError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(HistoryError::InvalidInput(format!(
            "eur_divisor must be a positive number, got {}",
            value
        )));
    }
    Ok(value)
}

/// Validate the market cap multiplier: finite and non-negative.
pub fn validate_market_cap_multiplier(value: f64) -> Result<f64, HistoryError> {
    if !value.is_finite() || value < 0.0 {
        return Err(HistoryError::InvalidInput(format!(
            "market_cap_multiplier must be a non-negative number, got {}",
            value
        )));
    }
    Ok(value)
}

/// Validate a rounding precision (0..=10 decimal places).
pub fn validate_decimals(decimals: u32) -> Result<u32, HistoryError> {
    if decimals > MAX_DECIMALS {
        return Err(HistoryError::InvalidInput(format!(
            "decimals must be between 0 and {}, got {}",
            MAX_DECIMALS, decimals
        )));
    }
    Ok(decimals)
}
