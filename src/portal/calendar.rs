//! Month-start arithmetic for the daily fetch strategy.
//!
//! The export API's daily endpoint only returns complete data when queried
//! for whole calendar months, so the client always asks for every month
//! start covering the requested range and filters the answer down.

use chrono::{Datelike, NaiveDate};

/// Returns the first day of `date`'s month.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).expect("day 1 exists in every month")
}

/// Returns the first day of the month after `date`'s month, wrapping
/// December into January of the next year.
pub fn first_of_next_month(date: NaiveDate) -> NaiveDate {
    let next_month = date.month() % 12 + 1;
    let next_year = if next_month == 1 {
        date.year() + 1
    } else {
        date.year()
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1).expect("day 1 exists in every month")
}

/// Enumerates every month start needed to cover `[since, until]`: each first
/// of month `m` with `first_of_month(since) <= m <= until`, one calendar
/// month apart. Empty when `until` precedes `since`'s month.
pub fn month_starts(since: NaiveDate, until: NaiveDate) -> Vec<NaiveDate> {
    let mut starts = Vec::new();
    let mut cursor = first_of_month(since);
    while cursor <= until {
        starts.push(cursor);
        cursor = first_of_next_month(cursor);
    }
    starts
}
