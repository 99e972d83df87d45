//! Date normalization between the `DD/MM/YYYY` display format and ISO
//! `YYYY-MM-DD`.
//!
//! Only `NaiveDate` is used here. There is no timezone anywhere in the
//! conversion, so the calendar day read is the calendar day written.

use chrono::NaiveDate;

const DISPLAY_FORMAT: &str = "%d/%m/%Y";
const CANONICAL_FORMAT: &str = "%Y-%m-%d";

/// Strictly parse `DD/MM/YYYY` (two-digit day and month, four-digit year).
///
/// Returns `None` on pattern mismatch or an impossible date such as `31/02/2024`.
pub fn parse_display_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if !matches_display_pattern(s) {
        return None;
    }
    NaiveDate::parse_from_str(s, DISPLAY_FORMAT).ok()
}

/// `DD/MM/YYYY` -> `YYYY-MM-DD`, or `None` if the input does not parse.
pub fn to_canonical_date(s: &str) -> Option<String> {
    parse_display_date(s).map(|d| d.format(CANONICAL_FORMAT).to_string())
}

/// Parse an ISO `YYYY-MM-DD` date.
pub fn parse_canonical_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), CANONICAL_FORMAT).ok()
}

/// Render a date as `DD/MM/YYYY`.
pub fn format_display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

fn matches_display_pattern(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b[2] == b'/'
        && b[5] == b'/'
        && b.iter()
            .enumerate()
            .all(|(i, c)| i == 2 || i == 5 || c.is_ascii_digit())
}
