//! Business-day counting.
//!
//! A span of `n` whole days starting on date `d` covers the calendar dates
//! `d, d+1, ..., d+n-1`. Business days are the Monday–Friday dates among
//! them, minus any holiday that lands on one of those weekdays. The count is
//! closed-form (full weeks plus a remainder lookup), so it costs the same for
//! a one-day span as for a fifty-year one.

use std::collections::BTreeSet;
use std::ops::Bound;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::Serialize;

/// Weekdays among the first `r` days of a walk, indexed by
/// `[start.num_days_from_monday()][r]` for `r` in `0..7`.
const WEEKDAY_REMAINDER: [[u64; 7]; 7] = [
    [0, 1, 2, 3, 4, 5, 5], // Monday
    [0, 1, 2, 3, 4, 4, 4], // Tuesday
    [0, 1, 2, 3, 3, 3, 4], // Wednesday
    [0, 1, 2, 2, 2, 3, 4], // Thursday
    [0, 1, 1, 1, 2, 3, 4], // Friday
    [0, 0, 0, 1, 2, 3, 4], // Saturday
    [0, 0, 1, 2, 3, 4, 5], // Sunday
];

/// Business and non-business days within a span.
///
/// `business_days + weekend_days` always equals the span length in days.
/// Holidays that fall on weekdays are counted as `weekend_days`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DayCounts {
    pub business_days: u64,
    pub weekend_days: u64,
}

/// Whether `weekday` is Monday through Friday.
pub fn is_weekday(weekday: Weekday) -> bool {
    weekday.num_days_from_monday() < 5
}

/// Count Monday–Friday dates among the `span_days` dates starting at `start`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use span_engine::business::weekdays_in_span;
///
/// // Monday Jan 1 2024, one full week.
/// let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// assert_eq!(weekdays_in_span(monday, 7), 5);
/// ```
pub fn weekdays_in_span(start: NaiveDate, span_days: u64) -> u64 {
    let full_weeks = span_days / 7;
    let remainder = (span_days % 7) as usize;
    let offset = start.weekday().num_days_from_monday() as usize;
    full_weeks * 5 + WEEKDAY_REMAINDER[offset][remainder]
}

/// Count business and non-business days in the span, excluding holidays.
///
/// Only holidays that fall on a weekday inside the span reduce the business
/// count; weekend holidays and holidays outside the span are ignored.
pub fn count_days(
    start: NaiveDate,
    span_days: u64,
    holidays: &BTreeSet<NaiveDate>,
) -> DayCounts {
    let weekdays = weekdays_in_span(start, span_days);

    let upper = match start.checked_add_days(Days::new(span_days)) {
        Some(end) => Bound::Excluded(end),
        None => Bound::Unbounded,
    };
    let observed = holidays
        .range((Bound::Included(start), upper))
        .filter(|date| is_weekday(date.weekday()))
        .count() as u64;

    let business_days = weekdays.saturating_sub(observed);
    DayCounts {
        business_days,
        weekend_days: span_days.saturating_sub(business_days),
    }
}
