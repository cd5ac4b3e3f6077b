//! CSV serialization of output records.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::HistoryError;
use crate::types::DailyPriceRecord;

/// Output columns, in order. Written even when there are no rows.
pub const CSV_HEADER: [&str; 6] = [
    "timestamp",
    "date",
    "price_usd",
    "price_eur",
    "volume_24h",
    "market_cap",
];

/// Write the header and one row per record to `writer`.
pub fn write_records<W: Write>(records: &[DailyPriceRecord], writer: W) -> Result<(), HistoryError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Create or truncate `path` and write the records to it.
pub fn write_records_to_path(records: &[DailyPriceRecord], path: &Path) -> Result<(), HistoryError> {
    let file = File::create(path)?;
    write_records(records, file)?;
    tracing::debug!("Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}
