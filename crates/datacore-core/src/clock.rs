//! Footer clock: UTC time and stardate.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};

/// Year a stardate of zero corresponds to.
const STARDATE_EPOCH_YEAR: i32 = 1946;

/// Stardate for `now`: `(year - 1946) * 1000` plus the elapsed fraction of
/// the year scaled to 1000, rounded down to one decimal.
pub fn stardate(now: DateTime<Utc>) -> f64 {
    let year = now.year();
    let days_in_year = if is_leap(year) { 366.0 } else { 365.0 };
    let seconds_into_day = f64::from(now.num_seconds_from_midnight());
    let day_fraction = (f64::from(now.ordinal0()) + seconds_into_day / 86_400.0) / days_in_year;
    let raw = f64::from(year - STARDATE_EPOCH_YEAR) * 1000.0 + day_fraction * 1000.0;
    (raw * 10.0).floor() / 10.0
}

pub fn format_stardate(now: DateTime<Utc>) -> String {
    format!("{:.1}", stardate(now))
}

/// `HH:MM:SS` in UTC.
pub fn format_utc(now: DateTime<Utc>) -> String {
    now.format("%H:%M:%S").to_string()
}

fn is_leap(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}
