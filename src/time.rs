//! Date parsing for the download/access cutoffs.

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate, TimeZone};
use std::time::{SystemTime, UNIX_EPOCH};

/// Parse a cutoff date in MM-DD-YYYY form to epoch milliseconds at local
/// midnight. A malformed date is a fatal configuration error.
pub fn parse_cutoff(date_str: &str) -> Result<i64> {
    let date = NaiveDate::parse_from_str(date_str.trim(), "%m-%d-%Y").with_context(|| {
        format!(
            "Invalid date format. Expected MM-DD-YYYY, got: {}",
            date_str
        )
    })?;

    // NaiveDate doesn't have year limits, so add validation
    let year = date.year();
    if !(1970..=2100).contains(&year) {
        anyhow::bail!("Year must be between 1970 and 2100, got: {}", year);
    }

    // Interpret the date in the user's local timezone, not UTC
    let naive_datetime = date
        .and_hms_opt(0, 0, 0)
        .context("Failed to create midnight time")?;
    let local_datetime = Local
        .from_local_datetime(&naive_datetime)
        .single()
        .context("Ambiguous or invalid local time")?;

    Ok(local_datetime.timestamp_millis())
}

/// Milliseconds since the epoch; pre-epoch timestamps clamp to zero.
pub fn epoch_millis(time: SystemTime) -> i64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
