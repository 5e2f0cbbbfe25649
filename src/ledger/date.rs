//! Calendar-day helpers shared by the ledger and its aggregations.
//!
//! Dates enter the system as `day/month/year` text at the boundary and are
//! normalized into [`NaiveDate`] immediately; everything downstream compares
//! and shifts the typed value instead of reparsing text.

use chrono::{Datelike, Duration, NaiveDate};

use crate::errors::{Result, TrackerError};

/// Boundary format accepted and emitted by the front end.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Parses `day/month/year` text into a calendar date.
pub fn parse_day_month_year(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| TrackerError::InvalidDate(raw.trim().to_string()))
}

/// Formats a date back into the `day/month/year` boundary representation.
pub fn format_day_month_year(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Whether two dates fall in the same calendar month of the same year.
pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Whether two dates fall in the same calendar year.
pub fn same_year(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year()
}

/// Whether `date` does not lie after `reference`.
pub fn on_or_before(date: NaiveDate, reference: NaiveDate) -> bool {
    date <= reference
}

/// Shifts a date by whole months, clamping to the target month's last day.
pub fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    let mut day = date.day();
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    day = day.min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap()
}

/// Number of days in the given month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    (first_next - Duration::days(1)).day()
}

/// Inclusive first and last day of the month containing `date`.
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date);
    let last = NaiveDate::from_ymd_opt(
        date.year(),
        date.month(),
        days_in_month(date.year(), date.month()),
    )
    .unwrap_or(date);
    (first, last)
}

/// Inclusive first and last day of the year containing `date`.
pub fn year_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date);
    let last = NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(date);
    (first, last)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_padded_and_unpadded_dates() {
        assert_eq!(parse_day_month_year("05/03/2024").unwrap(), day(2024, 3, 5));
        assert_eq!(parse_day_month_year("5/3/2024").unwrap(), day(2024, 3, 5));
        assert_eq!(
            parse_day_month_year(" 29/02/2024 ").unwrap(),
            day(2024, 2, 29)
        );
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(parse_day_month_year("2024-03-05").is_err());
        assert!(parse_day_month_year("31/02/2024").is_err());
        assert!(parse_day_month_year("not a date").is_err());
        assert!(parse_day_month_year("").is_err());
    }

    #[test]
    fn formats_back_to_boundary_text() {
        assert_eq!(format_day_month_year(day(2024, 3, 5)), "05/03/2024");
    }

    #[test]
    fn month_and_year_membership() {
        assert!(same_month(day(2024, 2, 1), day(2024, 2, 29)));
        assert!(!same_month(day(2024, 2, 1), day(2025, 2, 1)));
        assert!(!same_month(day(2024, 2, 1), day(2024, 3, 1)));
        assert!(same_year(day(2024, 1, 1), day(2024, 12, 31)));
        assert!(!same_year(day(2024, 12, 31), day(2025, 1, 1)));
    }

    #[test]
    fn on_or_before_is_inclusive() {
        assert!(on_or_before(day(2024, 3, 5), day(2024, 3, 5)));
        assert!(on_or_before(day(2024, 3, 4), day(2024, 3, 5)));
        assert!(!on_or_before(day(2024, 3, 6), day(2024, 3, 5)));
    }

    #[test]
    fn shift_month_clamps_to_short_months() {
        assert_eq!(shift_month(day(2024, 1, 31), 1), day(2024, 2, 29));
        assert_eq!(shift_month(day(2023, 1, 31), 1), day(2023, 2, 28));
        assert_eq!(shift_month(day(2024, 10, 31), 1), day(2024, 11, 30));
    }

    #[test]
    fn shift_month_crosses_year_boundaries() {
        assert_eq!(shift_month(day(2024, 11, 15), 3), day(2025, 2, 15));
        assert_eq!(shift_month(day(2024, 1, 15), -2), day(2023, 11, 15));
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 4), 30);
    }

    #[test]
    fn period_bounds_are_inclusive() {
        assert_eq!(
            month_bounds(day(2024, 2, 10)),
            (day(2024, 2, 1), day(2024, 2, 29))
        );
        assert_eq!(
            year_bounds(day(2024, 6, 10)),
            (day(2024, 1, 1), day(2024, 12, 31))
        );
    }
}
