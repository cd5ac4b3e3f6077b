//! Offline history source reading a raw Yahoo Finance OHLCV export.
//!
//! Expects the `Date,Open,High,Low,Close,Adj Close,Volume` layout of the
//! Yahoo download page. Columns are located by header name, so extra or
//! reordered columns are fine. Yahoo writes `null` for missing values.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;

use crate::types::DailyQuote;

/// Errors from reading a raw OHLCV export.
#[derive(Error, Debug)]
pub enum RawCsvError {
    #[error("Failed to read CSV: {0}")]
    Read(#[from] csv::Error),
    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("Invalid date '{value}' on line {line}")]
    InvalidDate { line: u64, value: String },
}

/// Reads daily quotes from a raw OHLCV CSV file.
pub struct RawCsvSource {
    path: PathBuf,
}

struct Columns {
    date: usize,
    open: Option<usize>,
    high: Option<usize>,
    low: Option<usize>,
    close: usize,
    volume: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, RawCsvError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        Ok(Self {
            date: find("Date").ok_or(RawCsvError::MissingColumn("Date"))?,
            open: find("Open"),
            high: find("High"),
            low: find("Low"),
            close: find("Close").ok_or(RawCsvError::MissingColumn("Close"))?,
            volume: find("Volume"),
        })
    }
}

/// Parse a numeric cell. Empty cells, `null`, and non-numbers yield `None`.
fn parse_number(cell: Option<&str>) -> Option<f64> {
    let cell = cell?.trim();
    if cell.is_empty() || cell.eq_ignore_ascii_case("null") {
        return None;
    }
    cell.parse::<f64>().ok().filter(|v| !v.is_nan())
}

impl RawCsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all usable rows from the file.
    pub fn read_quotes(&self) -> Result<Vec<DailyQuote>, RawCsvError> {
        let reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)?;
        read_quotes_from(reader)
    }
}

/// Parse quotes from any CSV reader.
///
/// Rows without a usable close (missing, not a number, or not strictly
/// positive) are skipped. A missing volume counts as zero.
pub fn read_quotes_from<R: std::io::Read>(
    mut reader: csv::Reader<R>,
) -> Result<Vec<DailyQuote>, RawCsvError> {
    let columns = Columns::from_headers(reader.headers()?)?;
    let mut quotes = Vec::new();
    let mut skipped = 0usize;

    for result in reader.records() {
        let record = result?;
        let date_cell = record.get(columns.date).unwrap_or("").trim();
        if date_cell.is_empty() {
            continue;
        }
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let close = match parse_number(record.get(columns.close)) {
            Some(close) if close > 0.0 => close,
            _ => {
                skipped += 1;
                continue;
            }
        };

        let date = NaiveDate::parse_from_str(date_cell, "%Y-%m-%d").map_err(|_| {
            RawCsvError::InvalidDate {
                line,
                value: date_cell.to_string(),
            }
        })?;
        let timestamp = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| RawCsvError::InvalidDate {
                line,
                value: date_cell.to_string(),
            })?
            .and_utc();

        let cell = |idx: Option<usize>| parse_number(idx.and_then(|i| record.get(i)));
        quotes.push(DailyQuote {
            timestamp,
            open: cell(columns.open).unwrap_or(close),
            high: cell(columns.high).unwrap_or(close),
            low: cell(columns.low).unwrap_or(close),
            close,
            volume: cell(columns.volume).unwrap_or(0.0),
        });
    }

    if skipped > 0 {
        tracing::warn!("Skipped {} rows without a usable close price", skipped);
    }
    tracing::info!("Read {} quotes from raw CSV", quotes.len());
    Ok(quotes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(data: &str) -> csv::Reader<&[u8]> {
        csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(data.as_bytes())
    }

    const HEADER: &str = "Date,Open,High,Low,Close,Adj Close,Volume\n";

    #[test]
    fn parses_yahoo_export() {
        let data = format!(
            "{}2024-01-01,99,101,98,100,100,10\n2024-01-02,199,201,198,200,200,20\n",
            HEADER
        );
        let quotes = read_quotes_from(reader(&data)).unwrap();

        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].date(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(quotes[0].open, 99.0);
        assert_eq!(quotes[0].close, 100.0);
        assert_eq!(quotes[0].volume, 10.0);
        assert_eq!(quotes[1].close, 200.0);
        assert_eq!(quotes[1].timestamp.to_rfc3339(), "2024-01-02T00:00:00+00:00");
    }

    #[test]
    fn skips_null_zero_and_garbage_closes() {
        let data = format!(
            "{}2024-01-01,null,null,null,null,null,null\n\
             2024-01-02,1,1,1,0,0,5\n\
             2024-01-03,1,1,1,abc,1,5\n\
             2024-01-04,1,1,1,-5,1,5\n\
             2024-01-05,1,1,1,300,300,30\n",
            HEADER
        );
        let quotes = read_quotes_from(reader(&data)).unwrap();

        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].close, 300.0);
    }

    #[test]
    fn missing_volume_is_zero() {
        let data = "Date,Close\n2024-01-01,100\n";
        let quotes = read_quotes_from(reader(data)).unwrap();

        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].volume, 0.0);
        assert_eq!(quotes[0].open, 100.0);
    }

    #[test]
    fn blank_lines_and_empty_dates_ignored() {
        let data = format!("{}2024-01-01,1,1,1,100,100,10\n,,,,,,\n", HEADER);
        let quotes = read_quotes_from(reader(&data)).unwrap();
        assert_eq!(quotes.len(), 1);
    }

    #[test]
    fn missing_close_column_is_error() {
        let result = read_quotes_from(reader("Date,Open\n2024-01-01,1\n"));
        assert!(matches!(result, Err(RawCsvError::MissingColumn("Close"))));
    }

    #[test]
    fn invalid_date_is_error() {
        let data = format!("{}01/02/2024,1,1,1,100,100,10\n", HEADER);
        let result = read_quotes_from(reader(&data));
        match result {
            Err(RawCsvError::InvalidDate { value, .. }) => assert_eq!(value, "01/02/2024"),
            other => panic!("expected InvalidDate, got {:?}", other),
        }
    }

    #[test]
    fn header_only_yields_no_quotes() {
        let quotes = read_quotes_from(reader(HEADER)).unwrap();
        assert!(quotes.is_empty());
    }

    #[test]
    fn read_quotes_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bitcoin_raw.csv");
        std::fs::write(&path, format!("{}2024-01-01,1,1,1,100,100,10\n", HEADER)).unwrap();

        let source = RawCsvSource::new(&path);
        assert_eq!(source.path(), path.as_path());
        assert_eq!(source.read_quotes().unwrap().len(), 1);
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = RawCsvSource::new(dir.path().join("nope.csv"));
        assert!(matches!(source.read_quotes(), Err(RawCsvError::Read(_))));
    }
}
