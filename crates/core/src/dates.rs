//! Calendar-date helpers shared by reports, attendance and dashboards.

use chrono::{Duration, Utc};

use crate::types::Date;

/// Wire format for calendar dates in query strings and JSON bodies.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Window used by the dashboard's "recent observations" counter.
pub const RECENT_OBSERVATION_DAYS: i64 = 7;

/// Parse a `YYYY-MM-DD` date.
pub fn parse_iso_date(raw: &str) -> Result<Date, String> {
    Date::parse_from_str(raw.trim(), ISO_DATE_FORMAT)
        .map_err(|_| format!("Invalid date '{raw}'. Expected format YYYY-MM-DD"))
}

/// Number of calendar days in `[start, end]`, counting both ends.
///
/// Returns zero or a negative number when `end < start`; callers that need
/// a well-formed range should construct a [`crate::report::ReportWindow`].
pub fn days_inclusive(start: Date, end: Date) -> i64 {
    (end - start).num_days() + 1
}

/// The first day of a trailing window of `days` days ending on `today`.
pub fn recent_cutoff(today: Date, days: i64) -> Date {
    today - Duration::days(days)
}

/// Today's date in UTC.
pub fn today() -> Date {
    Utc::now().date_naive()
}
