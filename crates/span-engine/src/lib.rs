//! # span-engine
//!
//! Deterministic duration computation between two instants.
//!
//! Given a start and end instant, the engine produces a calendar-aware
//! breakdown (years, months, days, hours, minutes, seconds), flat totals in
//! each unit, a business-day count that honours holidays, and a few derived
//! extrapolations. Every function is pure: no clock access, no I/O, no
//! shared state. Callers supply "now" when they need a default.
//!
//! ## Modules
//!
//! - [`duration`]: The engine: two instants + options → [`CalculationResult`]
//! - [`calendar`]: Largest-unit-first calendar decomposition
//! - [`business`]: Closed-form business-day counting with holidays
//! - [`extrapolate`]: Earnings, larger-unit perspective, shareable summary
//! - [`input`]: Form input normalization (12-hour clock, dates, holidays)
//! - [`error`]: Error types

pub mod business;
pub mod calendar;
pub mod duration;
pub mod error;
pub mod extrapolate;
pub mod input;

pub use business::{count_days, weekdays_in_span, DayCounts};
pub use calendar::{decompose, CalendarBreakdown};
pub use duration::{compute, format_duration, CalculationResult};
pub use error::SpanError;
pub use extrapolate::{share_text, Earnings, Perspective};
pub use input::{
    parse_date, parse_holidays, resolve_instant, validate_rate, CalculationRequest, ClockTime,
    Meridiem,
};
