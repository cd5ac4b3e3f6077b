//! Derives output records from upstream quotes.
//!
//! Each record depends only on its own day's close and volume. Ordering and
//! de-duplication are the only operations that look across quotes.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::config::HistoryConfig;
use crate::types::{DailyPriceRecord, DailyQuote};
use crate::validation::MAX_DECIMALS;

/// Round half away from zero to `decimals` places.
///
/// Precision is capped at [`MAX_DECIMALS`]; larger values round to that many
/// places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals.min(MAX_DECIMALS) as i32);
    (value * factor).round() / factor
}

/// Build the output row for one quote.
///
/// `price_eur` and `market_cap` are computed from the unrounded close, then
/// every numeric column is rounded independently when `config.decimals` is set.
pub fn derive_record(quote: &DailyQuote, config: &HistoryConfig) -> DailyPriceRecord {
    let round = |v: f64| match config.decimals {
        Some(d) => round_to(v, d),
        None => v,
    };
    DailyPriceRecord {
        timestamp: quote.timestamp,
        date: quote.date(),
        price_usd: round(quote.close),
        price_eur: round(quote.close / config.eur_divisor),
        volume_24h: round(quote.volume),
        market_cap: round(quote.close * config.market_cap_multiplier),
    }
}

/// Turn a raw quote series into ascending, one-per-day output records.
///
/// Invalid quotes are dropped. When several quotes fall on the same UTC day
/// the one with the latest timestamp wins, which keeps the live quote Yahoo
/// appends for the current session.
pub fn build_records(quotes: Vec<DailyQuote>, config: &HistoryConfig) -> Vec<DailyPriceRecord> {
    let total = quotes.len();
    let mut by_day: BTreeMap<NaiveDate, DailyQuote> = BTreeMap::new();
    let mut invalid = 0usize;

    for quote in quotes {
        if !quote.is_valid() {
            invalid += 1;
            continue;
        }
        match by_day.get(&quote.date()) {
            Some(existing) if existing.timestamp > quote.timestamp => {}
            _ => {
                by_day.insert(quote.date(), quote);
            }
        }
    }

    if invalid > 0 {
        tracing::warn!("Dropped {} quotes with invalid close or volume", invalid);
    }
    let duplicates = total - invalid - by_day.len();
    if duplicates > 0 {
        tracing::warn!("Collapsed {} duplicate quotes sharing a date", duplicates);
    }

    by_day
        .values()
        .map(|quote| derive_record(quote, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn quote(y: i32, m: u32, d: u32, h: u32, close: f64, volume: f64) -> DailyQuote {
        DailyQuote {
            timestamp: Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume,
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn derive_uses_configured_constants() {
        let record = derive_record(&quote(2024, 1, 1, 0, 100.0, 10.0), &HistoryConfig::default());

        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(record.price_usd, 100.0);
        assert!(approx(record.price_eur, 100.0 / 1.1));
        assert_eq!(record.volume_24h, 10.0);
        assert!(approx(record.market_cap, 1_950_000_000.0));
    }

    #[test]
    fn derive_honours_overrides() {
        let config = HistoryConfig {
            eur_divisor: 2.0,
            market_cap_multiplier: 21_000_000.0,
            ..HistoryConfig::default()
        };
        let record = derive_record(&quote(2024, 1, 1, 0, 100.0, 10.0), &config);

        assert_eq!(record.price_eur, 50.0);
        assert_eq!(record.market_cap, 2_100_000_000.0);
    }

    #[test]
    fn derive_rounds_each_column() {
        let config = HistoryConfig {
            decimals: Some(2),
            ..HistoryConfig::default()
        };
        let record = derive_record(&quote(2024, 1, 1, 0, 100.123, 10.556), &config);

        assert_eq!(record.price_usd, 100.12);
        assert_eq!(record.price_eur, 91.02);
        assert_eq!(record.volume_24h, 10.56);
        assert!(approx(record.market_cap, 1_952_398_500.0));
    }

    #[test]
    fn round_to_half_away_from_zero() {
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-2.5, 0), -3.0);
        assert_eq!(round_to(90.909090, 2), 90.91);
        assert_eq!(round_to(1.0, 0), 1.0);
    }

    #[test]
    fn round_to_caps_precision() {
        let value = 63_000.123_456_789;
        assert_eq!(round_to(value, u32::MAX), round_to(value, MAX_DECIMALS));
        assert!(round_to(value, u32::MAX).is_finite());
        assert!((round_to(value, 64) - value).abs() < 1e-6);
    }

    #[test]
    fn build_sorts_ascending() {
        let quotes = vec![
            quote(2024, 1, 3, 0, 300.0, 30.0),
            quote(2024, 1, 1, 0, 100.0, 10.0),
            quote(2024, 1, 2, 0, 200.0, 20.0),
        ];
        let records = build_records(quotes, &HistoryConfig::default());

        let dates: Vec<String> = records.iter().map(|r| r.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
    }

    #[test]
    fn build_keeps_latest_quote_per_day() {
        let quotes = vec![
            quote(2024, 1, 1, 0, 100.0, 10.0),
            quote(2024, 1, 2, 0, 200.0, 20.0),
            quote(2024, 1, 2, 15, 210.0, 25.0),
        ];
        let records = build_records(quotes, &HistoryConfig::default());

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].price_usd, 210.0);
        assert_eq!(records[1].volume_24h, 25.0);
    }

    #[test]
    fn build_keeps_latest_even_when_it_arrives_first() {
        let quotes = vec![
            quote(2024, 1, 2, 15, 210.0, 25.0),
            quote(2024, 1, 2, 0, 200.0, 20.0),
        ];
        let records = build_records(quotes, &HistoryConfig::default());

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].price_usd, 210.0);
    }

    #[test]
    fn build_drops_invalid_quotes() {
        let quotes = vec![
            quote(2024, 1, 1, 0, f64::NAN, 10.0),
            quote(2024, 1, 2, 0, 200.0, -1.0),
            quote(2024, 1, 3, 0, 300.0, 30.0),
        ];
        let records = build_records(quotes, &HistoryConfig::default());

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].price_usd, 300.0);
    }

    #[test]
    fn build_empty_is_empty() {
        assert!(build_records(Vec::new(), &HistoryConfig::default()).is_empty());
    }
}
