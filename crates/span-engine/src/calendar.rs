//! Calendar-aware decomposition of a span into years, months, days, hours,
//! minutes and seconds.
//!
//! A "month" has the length of the actual calendar month it passes through.
//! Month addition follows chrono's [`Months`] semantics: landing on a day that
//! does not exist (Jan 31 + 1 month) clamps to the last day of that month.
//! The clock is treated as fixed-offset, so every day is exactly 24 hours.

use chrono::{Datelike, Months, NaiveDateTime};
use serde::Serialize;

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// A span expressed largest-unit-first.
///
/// Adding `years`, then `months`, then `days`, then the clock components to
/// the earlier instant reproduces the later instant (to the second).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CalendarBreakdown {
    pub years: u32,
    pub months: u32,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl CalendarBreakdown {
    /// Whether every component is zero.
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// Decompose the span between two instants.
///
/// Argument order does not matter: the earlier instant is always the anchor.
/// Sub-second remainders are dropped.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use span_engine::calendar::decompose;
///
/// let from = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let to = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap().and_hms_opt(10, 30, 0).unwrap();
/// let parts = decompose(from, to);
/// assert_eq!((parts.years, parts.months, parts.days), (1, 2, 14));
/// assert_eq!((parts.hours, parts.minutes), (10, 30));
/// ```
pub fn decompose(a: NaiveDateTime, b: NaiveDateTime) -> CalendarBreakdown {
    let (anchor, target) = if a <= b { (a, b) } else { (b, a) };

    // Years first, then months from the year-shifted anchor, so that month-end
    // clamping happens in the same order as the additions are replayed.
    let years = whole_months_between(anchor, target) / 12;
    let after_years = add_months(anchor, years * 12).unwrap_or(anchor);

    let months = whole_months_between(after_years, target);
    let after_months = add_months(after_years, months).unwrap_or(after_years);

    let rest_ms = (target - after_months).num_milliseconds();
    let days = rest_ms / MS_PER_DAY;
    let rest_ms = rest_ms % MS_PER_DAY;
    let hours = rest_ms / MS_PER_HOUR;
    let rest_ms = rest_ms % MS_PER_HOUR;
    let minutes = rest_ms / MS_PER_MINUTE;
    let seconds = (rest_ms % MS_PER_MINUTE) / MS_PER_SECOND;

    CalendarBreakdown {
        years,
        months,
        days: days as u32,
        hours: hours as u32,
        minutes: minutes as u32,
        seconds: seconds as u32,
    }
}

/// Largest `n` such that `anchor + n months <= target`. Requires `anchor <= target`.
fn whole_months_between(anchor: NaiveDateTime, target: NaiveDateTime) -> u32 {
    let estimate = (target.year() - anchor.year()) * 12 + target.month() as i32
        - anchor.month() as i32;
    if estimate <= 0 {
        return 0;
    }
    let estimate = estimate as u32;

    // The estimate lands in the target's calendar month, so it overshoots by
    // at most one month (when the anchor's day/time is later in the month).
    match add_months(anchor, estimate) {
        Some(shifted) if shifted <= target => estimate,
        _ => estimate - 1,
    }
}

fn add_months(dt: NaiveDateTime, months: u32) -> Option<NaiveDateTime> {
    dt.checked_add_months(Months::new(months))
}
