//! Upstream quote and output record types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// One daily OHLCV bar as returned by a history source.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyQuote {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl DailyQuote {
    /// UTC calendar day of the bar.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    /// A bar is usable when its close and volume are finite and non-negative.
    pub fn is_valid(&self) -> bool {
        self.close.is_finite() && self.close >= 0.0 && self.volume.is_finite() && self.volume >= 0.0
    }
}

/// One output row. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPriceRecord {
    pub timestamp: DateTime<Utc>,
    pub date: NaiveDate,
    pub price_usd: f64,
    pub price_eur: f64,
    pub volume_24h: f64,
    pub market_cap: f64,
}

/// Result of one download run.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadSummary {
    pub rows: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub output_path: std::path::PathBuf,
}

impl DownloadSummary {
    /// Covered `(min, max)` dates, or `None` when no rows were written.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.first_date.zip(self.last_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn quote(close: f64, volume: f64) -> DailyQuote {
        DailyQuote {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume,
        }
    }

    #[test]
    fn quote_date_is_utc_day() {
        let mut q = quote(100.0, 10.0);
        q.timestamp = Utc.with_ymd_and_hms(2024, 1, 1, 23, 59, 59).unwrap();
        assert_eq!(q.date(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn quote_validity() {
        assert!(quote(100.0, 10.0).is_valid());
        assert!(quote(0.0, 0.0).is_valid());
        assert!(!quote(-1.0, 10.0).is_valid());
        assert!(!quote(f64::NAN, 10.0).is_valid());
        assert!(!quote(100.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn summary_date_range_requires_both_ends() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut summary = DownloadSummary {
            rows: 1,
            first_date: Some(d),
            last_date: Some(d),
            output_path: "out.csv".into(),
        };
        assert_eq!(summary.date_range(), Some((d, d)));

        summary.first_date = None;
        assert_eq!(summary.date_range(), None);
    }
}
