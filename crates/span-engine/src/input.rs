//! Turning form-style input into engine arguments.
//!
//! Callers collect a date, an optional 12-hour clock time with AM/PM, a
//! weekend flag, an hourly rate and a list of `YYYY-MM-DD` holidays. This
//! module validates those pieces and resolves them into the absolute
//! instants [`crate::duration::compute`] expects. Nothing here reads the
//! system clock: "now" is always passed in.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::duration::{self, CalculationResult};
use crate::error::SpanError;

/// Hourly rate used when the caller does not supply one.
pub const DEFAULT_HOURLY_RATE: f64 = 25.0;

/// Days between the default start and end instants.
pub const DEFAULT_SPAN_DAYS: u64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Meridiem {
    Am,
    Pm,
}

/// A wall-clock time as entered on a 12-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClockTime {
    /// 1-12.
    pub hour: u32,
    /// 0-59.
    pub minute: u32,
    pub meridiem: Meridiem,
}

impl ClockTime {
    pub fn new(hour: u32, minute: u32, meridiem: Meridiem) -> Result<Self, SpanError> {
        if !(1..=12).contains(&hour) {
            return Err(SpanError::InvalidTime(format!(
                "hour must be 1-12 on a 12-hour clock, got {hour}"
            )));
        }
        if minute > 59 {
            return Err(SpanError::InvalidTime(format!(
                "minute must be 0-59, got {minute}"
            )));
        }
        Ok(Self {
            hour,
            minute,
            meridiem,
        })
    }

    /// The 24-hour equivalent: 12 AM is 00, 12 PM is 12.
    pub fn hour24(&self) -> u32 {
        match (self.hour, self.meridiem) {
            (12, Meridiem::Am) => 0,
            (12, Meridiem::Pm) => 12,
            (h, Meridiem::Am) => h,
            (h, Meridiem::Pm) => h + 12,
        }
    }

    pub fn to_naive_time(&self) -> NaiveTime {
        // Both components are range-checked on construction.
        NaiveTime::from_hms_opt(self.hour24(), self.minute, 0).unwrap_or(NaiveTime::MIN)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.meridiem {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        };
        write!(f, "{:02}:{:02} {suffix}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = SpanError;

    /// Parse `"9:05 PM"`, `"09:05pm"`, `"9pm"` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact = s.trim().to_lowercase().replace(' ', "");
        let invalid = || SpanError::InvalidTime(format!("'{}'", s.trim()));

        let (clock, meridiem) = if let Some(rest) = compact.strip_suffix("am") {
            (rest, Meridiem::Am)
        } else if let Some(rest) = compact.strip_suffix("pm") {
            (rest, Meridiem::Pm)
        } else {
            return Err(SpanError::InvalidTime(format!(
                "'{}': expected an AM/PM suffix",
                s.trim()
            )));
        };

        let (hour, minute) = match clock.split_once(':') {
            Some((h, m)) => (h, m),
            None => (clock, "0"),
        };
        let hour: u32 = hour.parse().map_err(|_| invalid())?;
        let minute: u32 = minute.parse().map_err(|_| invalid())?;

        Self::new(hour, minute, meridiem)
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate, SpanError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| SpanError::InvalidDate(format!("'{}': {}", s.trim(), e)))
}

/// Parse a list of `YYYY-MM-DD` holidays. Duplicates collapse.
pub fn parse_holidays<I, S>(dates: I) -> Result<BTreeSet<NaiveDate>, SpanError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    dates.into_iter().map(|d| parse_date(d.as_ref())).collect()
}

/// Combine a date with an optional clock time.
///
/// When `include_time` is false, or no time is given, the instant is midnight.
pub fn resolve_instant(
    date: NaiveDate,
    time: Option<ClockTime>,
    include_time: bool,
) -> NaiveDateTime {
    match time {
        Some(clock) if include_time => date.and_time(clock.to_naive_time()),
        _ => date.and_time(NaiveTime::MIN),
    }
}

/// Check that an hourly rate is finite and non-negative.
pub fn validate_rate(rate: f64) -> Result<f64, SpanError> {
    if rate.is_finite() && rate >= 0.0 {
        Ok(rate)
    } else {
        Err(SpanError::InvalidRate(format!(
            "{rate}: must be a non-negative number"
        )))
    }
}

/// The full parameter set for one calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationRequest {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// When false, both instants are truncated to midnight.
    pub include_time: bool,
    pub exclude_weekends: bool,
    pub hourly_rate: f64,
    pub holidays: BTreeSet<NaiveDate>,
}

impl CalculationRequest {
    /// Defaults anchored at `now`: start is `now`, end is a week later.
    pub fn starting_at(now: NaiveDateTime) -> Self {
        let end = now
            .checked_add_days(Days::new(DEFAULT_SPAN_DAYS))
            .unwrap_or(now);
        Self {
            start: now,
            end,
            include_time: true,
            exclude_weekends: false,
            hourly_rate: DEFAULT_HOURLY_RATE,
            holidays: BTreeSet::new(),
        }
    }

    /// The instants actually handed to the engine.
    pub fn instants(&self) -> (NaiveDateTime, NaiveDateTime) {
        if self.include_time {
            (self.start, self.end)
        } else {
            (
                self.start.date().and_time(NaiveTime::MIN),
                self.end.date().and_time(NaiveTime::MIN),
            )
        }
    }

    /// Exchange start and end.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.start, &mut self.end);
    }

    pub fn compute(&self) -> CalculationResult {
        let (start, end) = self.instants();
        duration::compute(start, end, self.exclude_weekends, &self.holidays)
    }
}
