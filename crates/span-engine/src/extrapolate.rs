//! Figures derived from a finished [`CalculationResult`]: earnings at an
//! hourly rate, the span in larger units, and a shareable text summary.

use serde::Serialize;

use crate::duration::{round_to, CalculationResult};

/// Paid hours per business day.
pub const WORK_HOURS_PER_DAY: u64 = 8;

const DAYS_PER_YEAR: f64 = 365.25;
const LIFETIME_YEARS: f64 = 80.0;

/// What a span is worth at an hourly rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Earnings {
    pub hourly_rate: f64,
    /// `business_days * 8`.
    pub work_hours: u64,
    /// Pay for `work_hours`, rounded to cents.
    pub work_earnings: f64,
    /// Pay for every counted hour around the clock, rounded to cents.
    pub continuous_earnings: f64,
}

impl Earnings {
    /// Estimate earnings for `result` at `hourly_rate`.
    ///
    /// Continuous earnings follow `counted_hours`, so they drop weekends and
    /// holidays when the result was computed with weekends excluded.
    pub fn estimate(result: &CalculationResult, hourly_rate: f64) -> Self {
        let work_hours = result.business_days * WORK_HOURS_PER_DAY;
        Self {
            hourly_rate,
            work_hours,
            work_earnings: round_to(work_hours as f64 * hourly_rate, 2),
            continuous_earnings: round_to(result.counted_hours * hourly_rate, 2),
        }
    }
}

/// The span measured against weeks, a year and a lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Perspective {
    /// 1 decimal place.
    pub weeks: f64,
    /// 2 decimal places.
    pub fortnights: f64,
    /// Share of a 365.25-day year, in percent, 2 decimal places.
    pub percent_of_year: f64,
    /// Share of an 80-year lifetime, in percent, 5 decimal places.
    pub percent_of_lifetime: f64,
}

impl Perspective {
    pub fn of(result: &CalculationResult) -> Self {
        let days = result.total_days;
        Self {
            weeks: round_to(days / 7.0, 1),
            fortnights: round_to(days / 14.0, 2),
            percent_of_year: round_to(days / DAYS_PER_YEAR * 100.0, 2),
            percent_of_lifetime: round_to(days / (LIFETIME_YEARS * DAYS_PER_YEAR) * 100.0, 5),
        }
    }
}

/// Plain-text summary for copying or sharing.
pub fn share_text(result: &CalculationResult) -> String {
    format!(
        "Duration Calculation:\n{}\nTotal Days: {}\nBusiness Days: {}",
        result.formatted_duration, result.total_days, result.business_days
    )
}
