//! Human-readable console lines. Not meant to be parsed.

use std::time::Duration;

use btc_history_lib::DownloadSummary;
use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};

pub fn print_start(message: &str) {
    println!("📊 {}", message);
}

pub fn print_summary(summary: &DownloadSummary, verb: &str) {
    println!("{}", completion_line(summary.rows, verb));
    println!("{}", range_line(summary.date_range()));
}

fn completion_line(rows: usize, verb: &str) -> String {
    format!("✅ {} days {}!", rows, verb)
}

fn range_line(range: Option<(NaiveDate, NaiveDate)>) -> String {
    match range {
        Some((from, to)) => format!("📅 From {} to {}", from, to),
        None => "📅 No dates covered".to_string(),
    }
}

/// Stderr spinner shown while waiting on the network. Hidden when stderr is
/// not a terminal.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
