//! Fetch → transform → write.

use crate::config::HistoryConfig;
use crate::error::HistoryError;
use crate::export;
use crate::source::HistorySource;
use crate::transform;
use crate::types::DownloadSummary;

/// Run one download: pull the daily series from `source`, derive the output
/// records, and overwrite `config.output_path` with them.
///
/// An empty series is not an error: a header-only file is written and the
/// returned summary has no date range.
pub async fn download_history<S: HistorySource>(
    source: &S,
    config: &HistoryConfig,
) -> Result<DownloadSummary, HistoryError> {
    tracing::info!("Fetching {} history from {}", config.symbol, source.name());
    let quotes = source.fetch_daily(config).await?;

    let records = transform::build_records(quotes, config);
    export::write_records_to_path(&records, &config.output_path)?;

    let summary = DownloadSummary {
        rows: records.len(),
        first_date: records.first().map(|r| r.date),
        last_date: records.last().map(|r| r.date),
        output_path: config.output_path.clone(),
    };

    match summary.date_range() {
        Some((from, to)) => tracing::info!(
            "Wrote {} rows ({} to {}) to {}",
            summary.rows,
            from,
            to,
            summary.output_path.display()
        ),
        None => tracing::warn!(
            "{} returned no usable quotes for {}; wrote header only to {}",
            source.name(),
            config.symbol,
            summary.output_path.display()
        ),
    }

    Ok(summary)
}
