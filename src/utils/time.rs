//! Calendar utilities for period bucketing
//!
//! Month arithmetic shared by the period aggregator and the request store.
//! All helpers work on `NaiveDate` and saturate nothing: values outside
//! chrono's representable range are reported as `None`.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};

/// Date format used on the CLI and in CSV input (`YYYY-MM-DD`)
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Datetime format stored in SQLite (`YYYY-MM-DD HH:MM:SS`)
pub const ISO_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// First day of the month containing `date`
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use overseer_reports::utils::time::first_of_month;
/// let d = NaiveDate::from_ymd_opt(2024, 4, 10).unwrap();
/// assert_eq!(first_of_month(d), NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
/// ```
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    // Day 1 exists in every month
    date.with_day(1).unwrap_or(date)
}

/// First day of the month after the one containing `date`
///
/// A date that is already the 1st still advances a full month.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use overseer_reports::utils::time::first_of_next_month;
/// let d = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// assert_eq!(first_of_next_month(d), NaiveDate::from_ymd_opt(2024, 4, 1));
/// ```
pub fn first_of_next_month(date: NaiveDate) -> Option<NaiveDate> {
    first_of_month(date).checked_add_months(Months::new(1))
}

/// Add `months` calendar months to `date`
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// Total elapsed calendar months from `start` to `end` (`years * 12 + months`)
///
/// Only the year and month fields take part; the day of month is ignored.
/// Returns 0 when `end` falls in an earlier month than `start`.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use overseer_reports::utils::time::months_between;
/// let a = NaiveDate::from_ymd_opt(2023, 11, 1).unwrap();
/// let b = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
/// assert_eq!(months_between(a, b), 15);
/// ```
pub fn months_between(start: NaiveDate, end: NaiveDate) -> u32 {
    let start_index = i64::from(start.year()) * 12 + i64::from(start.month0());
    let end_index = i64::from(end.year()) * 12 + i64::from(end.month0());
    u32::try_from(end_index - start_index).unwrap_or(0)
}

/// First day of the given year/month, if the month is valid
pub fn month_start(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Format a date as `YYYY-MM`
pub fn month_label(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Parse a `YYYY-MM-DD` date string
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE_FORMAT).ok()
}

/// Parse `YYYY-MM-DD HH:MM:SS`, or a bare `YYYY-MM-DD` as midnight
pub fn parse_iso_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, ISO_DATETIME_FORMAT)
        .ok()
        .or_else(|| parse_iso_date(value).and_then(|d| d.and_hms_opt(0, 0, 0)))
}
