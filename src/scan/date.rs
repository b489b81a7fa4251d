//! Date bound handling for the publish-date window.
//!
//! Validation is structural only: four digits, hyphen, two digits, hyphen,
//! two digits. `2023-02-30` passes; the store compares the bound as text.

use chrono::{Days, NaiveDate};

/// Days looked back when no lower bound is given.
pub const DEFAULT_LOOKBACK_DAYS: u64 = 30;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn is_valid_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Default `(date_after, date_before)` relative to `today`.
pub fn default_window(today: NaiveDate) -> (String, String) {
    let after = today
        .checked_sub_days(Days::new(DEFAULT_LOOKBACK_DAYS))
        .unwrap_or(NaiveDate::MIN);

    (
        after.format(DATE_FORMAT).to_string(),
        today.format(DATE_FORMAT).to_string(),
    )
}
