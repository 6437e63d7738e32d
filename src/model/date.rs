use chrono::NaiveDate;

/// Signed number of whole days from `a` to `b`.
///
/// `NaiveDate` has no time-of-day or timezone, so this is a pure calendar-day
/// difference and cannot be skewed by DST transitions.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days()
}

/// A new date advanced by `n` days (`n` may be negative or zero).
pub fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    date + chrono::Duration::days(n)
}

/// Parse an ISO-8601 calendar-day string (`YYYY-MM-DD`).
pub fn parse_day(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}
