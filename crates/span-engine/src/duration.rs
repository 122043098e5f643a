//! The duration engine.
//!
//! [`compute`] takes two instants plus the weekend/holiday options and
//! returns a complete [`CalculationResult`]. It reads no clock, keeps no
//! state and has no error path: every pair of valid instants produces a
//! result, including equal instants and reversed order.
//!
//! # Conventions
//!
//! - Instants are local wall-clock [`NaiveDateTime`]s on a fixed-offset clock.
//! - `diff_milliseconds` keeps the sign of `end - start`; every other field
//!   describes the absolute span.
//! - The `total_*` fields are flat conversions, independent of the calendar
//!   breakdown.
//! - Business days cover `floor(|span| / 1 day)` consecutive dates starting at
//!   the earlier instant's date.

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::business::{self, DayCounts};
use crate::calendar::{self, CalendarBreakdown};

const MS_PER_MINUTE: u64 = 60_000;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: u64 = 24 * MS_PER_HOUR;

/// Average resting heart rate, beats per minute.
pub const HEARTBEATS_PER_MINUTE: u64 = 80;
/// Average resting respiration rate, breaths per minute.
pub const BREATHS_PER_MINUTE: u64 = 16;

/// Everything derived from one pair of instants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResult {
    /// `end - start` in milliseconds (negative if end is before start).
    pub diff_milliseconds: i64,
    pub years: u32,
    /// 0-11.
    pub months: u32,
    pub days: u32,
    /// 0-23.
    pub hours: u32,
    /// 0-59.
    pub minutes: u32,
    /// 0-59.
    pub seconds: u32,
    /// Whole span in days, 2 decimal places.
    pub total_days: f64,
    /// Whole span in hours, 2 decimal places.
    pub total_hours: f64,
    /// Whole span in minutes, rounded to the nearest minute.
    pub total_minutes: f64,
    /// Whole span in seconds, rounded to the nearest second.
    pub total_seconds: f64,
    /// Monday–Friday dates in the span that are not holidays.
    pub business_days: u64,
    /// Whole days in the span that are not business days.
    pub weekend_days: u64,
    /// Days that earnings and other per-day totals are based on: `total_days`,
    /// or `total_days - weekend_days` when weekends are excluded.
    pub counted_days: f64,
    /// `counted_days` in hours, 2 decimal places.
    pub counted_hours: f64,
    /// Whether weekends were excluded from `counted_days`.
    pub exclude_weekends: bool,
    /// Human-readable representation (e.g., "1 years, 2 months, 14 days").
    pub formatted_duration: String,
    pub heartbeats: u64,
    pub breaths: u64,
}

impl CalculationResult {
    /// The calendar components of the span.
    pub fn breakdown(&self) -> CalendarBreakdown {
        CalendarBreakdown {
            years: self.years,
            months: self.months,
            days: self.days,
            hours: self.hours,
            minutes: self.minutes,
            seconds: self.seconds,
        }
    }

    /// The business/non-business split of the span.
    pub fn day_counts(&self) -> DayCounts {
        DayCounts {
            business_days: self.business_days,
            weekend_days: self.weekend_days,
        }
    }
}

/// Compute the duration between two instants.
///
/// # Arguments
///
/// * `start` / `end`: local wall-clock instants, in either order
/// * `exclude_weekends`: base `counted_days` on business days only
/// * `holidays`: dates treated as non-business days when they fall on a weekday
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
/// use chrono::NaiveDate;
/// use span_engine::compute;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let result = compute(start, end, false, &BTreeSet::new());
/// assert_eq!(result.formatted_duration, "7 days");
/// assert_eq!(result.business_days, 5);
/// assert_eq!(result.weekend_days, 2);
/// ```
pub fn compute(
    start: NaiveDateTime,
    end: NaiveDateTime,
    exclude_weekends: bool,
    holidays: &BTreeSet<NaiveDate>,
) -> CalculationResult {
    let diff_milliseconds = (end - start).num_milliseconds();
    let abs_ms = diff_milliseconds.unsigned_abs();

    let breakdown = calendar::decompose(start, end);

    let raw_days = abs_ms as f64 / MS_PER_DAY as f64;
    let total_days = round_to(raw_days, 2);
    let total_hours = round_to(abs_ms as f64 / MS_PER_HOUR as f64, 2);
    let total_minutes = round_to(abs_ms as f64 / MS_PER_MINUTE as f64, 0);
    let total_seconds = round_to(abs_ms as f64 / 1_000.0, 0);

    let span_days = abs_ms / MS_PER_DAY;
    let first_day = start.min(end).date();
    let counts = business::count_days(first_day, span_days, holidays);

    let (counted_days, counted_hours) = if exclude_weekends {
        let working = (raw_days - counts.weekend_days as f64).max(0.0);
        (round_to(working, 2), round_to(working * 24.0, 2))
    } else {
        (total_days, total_hours)
    };

    CalculationResult {
        diff_milliseconds,
        years: breakdown.years,
        months: breakdown.months,
        days: breakdown.days,
        hours: breakdown.hours,
        minutes: breakdown.minutes,
        seconds: breakdown.seconds,
        total_days,
        total_hours,
        total_minutes,
        total_seconds,
        business_days: counts.business_days,
        weekend_days: counts.weekend_days,
        counted_days,
        counted_hours,
        exclude_weekends,
        formatted_duration: format_duration(&breakdown),
        heartbeats: per_minute(abs_ms, HEARTBEATS_PER_MINUTE),
        breaths: per_minute(abs_ms, BREATHS_PER_MINUTE),
    }
}

/// Format the non-zero calendar components, largest first.
///
/// Seconds are not shown. Labels are always plural ("1 years"). A span with
/// no non-zero component reads `"0 minutes"`.
pub fn format_duration(parts: &CalendarBreakdown) -> String {
    let labelled = [
        (parts.years, "years"),
        (parts.months, "months"),
        (parts.days, "days"),
        (parts.hours, "hours"),
        (parts.minutes, "minutes"),
    ];

    let text = labelled
        .iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, label)| format!("{value} {label}"))
        .collect::<Vec<_>>()
        .join(", ");

    if text.is_empty() {
        "0 minutes".to_string()
    } else {
        text
    }
}

/// Round half away from zero to `places` decimal places.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// `floor(minutes * rate)` from the unrounded span, in exact integer arithmetic.
fn per_minute(abs_ms: u64, rate: u64) -> u64 {
    (abs_ms as u128 * rate as u128 / MS_PER_MINUTE as u128) as u64
}
