//! Command-line arguments and their resolution into a calculation request.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Args, Parser};

use span_engine::input::{self, CalculationRequest, ClockTime, DEFAULT_HOURLY_RATE};

use crate::config::{InsightConfig, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECONDS};

#[derive(Debug, Parser)]
#[command(name = "span")]
#[command(about = "Compute the exact duration between two dates, with business days and earnings")]
#[command(version)]
pub struct Cli {
    /// Start date (YYYY-MM-DD). Defaults to now.
    #[arg(long, value_name = "DATE")]
    pub start_date: Option<String>,

    /// Start time on a 12-hour clock (e.g., "9:30 AM"). Defaults to midnight
    /// when a start date is given.
    #[arg(long, value_name = "TIME")]
    pub start_time: Option<String>,

    /// End date (YYYY-MM-DD). Defaults to a week after now.
    #[arg(long, value_name = "DATE")]
    pub end_date: Option<String>,

    /// End time on a 12-hour clock (e.g., "5:00 PM").
    #[arg(long, value_name = "TIME")]
    pub end_time: Option<String>,

    /// Ignore times of day and compare whole dates.
    #[arg(long)]
    pub date_only: bool,

    /// Exclude weekends and holidays from counted days and continuous earnings.
    #[arg(long)]
    pub exclude_weekends: bool,

    /// A holiday (YYYY-MM-DD); repeat for more.
    #[arg(long = "holiday", value_name = "DATE")]
    pub holidays: Vec<String>,

    /// Hourly rate for earnings estimates.
    #[arg(long, default_value_t = DEFAULT_HOURLY_RATE)]
    pub rate: f64,

    /// Swap start and end before computing.
    #[arg(long)]
    pub swap: bool,

    /// Print the result as JSON.
    #[arg(long, conflicts_with = "share")]
    pub json: bool,

    /// Print only the short shareable summary.
    #[arg(long)]
    pub share: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    #[command(flatten)]
    pub insight: InsightArgs,
}

#[derive(Debug, Args)]
pub struct InsightArgs {
    /// Ask the text-generation service for facts about this duration.
    #[arg(long)]
    pub insight: bool,

    /// API key for the insight service.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Insight model name.
    #[arg(long, env = "SPAN_INSIGHT_MODEL", default_value = DEFAULT_MODEL)]
    pub insight_model: String,

    /// Insight service base URL.
    #[arg(long, env = "SPAN_INSIGHT_URL", default_value = DEFAULT_BASE_URL)]
    pub insight_url: String,

    /// Insight request timeout in seconds.
    #[arg(long, env = "SPAN_INSIGHT_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub insight_timeout: u64,
}

impl From<&InsightArgs> for InsightConfig {
    fn from(args: &InsightArgs) -> Self {
        Self {
            api_key: args.api_key.clone(),
            base_url: args.insight_url.clone(),
            model: args.insight_model.clone(),
            timeout_seconds: args.insight_timeout,
        }
    }
}

impl Cli {
    /// Build the request, filling unspecified instants from `now`.
    pub fn to_request(&self, now: NaiveDateTime) -> Result<CalculationRequest> {
        let mut request = CalculationRequest::starting_at(now);

        if let Some(start) = instant_from(self.start_date.as_deref(), self.start_time.as_deref())
            .context("invalid start")?
        {
            request.start = start;
        }
        if let Some(end) = instant_from(self.end_date.as_deref(), self.end_time.as_deref())
            .context("invalid end")?
        {
            request.end = end;
        }

        request.include_time = !self.date_only;
        request.exclude_weekends = self.exclude_weekends;
        request.hourly_rate = input::validate_rate(self.rate)?;
        request.holidays = input::parse_holidays(&self.holidays).context("invalid holiday")?;

        if self.swap {
            request.swap();
        }
        Ok(request)
    }
}

/// `None` when no date was given; a time without a date is an error.
fn instant_from(date: Option<&str>, time: Option<&str>) -> Result<Option<NaiveDateTime>> {
    let date: NaiveDate = match (date, time) {
        (Some(date), _) => input::parse_date(date)?,
        (None, Some(_)) => anyhow::bail!("a time needs a date"),
        (None, None) => return Ok(None),
    };
    let clock = time.map(str::parse::<ClockTime>).transpose()?;
    Ok(Some(input::resolve_instant(date, clock, true)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("span").chain(args.iter().copied())).unwrap()
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 10)
            .unwrap()
            .and_hms_opt(14, 20, 0)
            .unwrap()
    }

    #[test]
    fn test_defaults_use_now_and_a_week_later() {
        let request = parse(&[]).to_request(now()).unwrap();
        assert_eq!(request.start, now());
        assert_eq!(request.compute().formatted_duration, "7 days");
        assert_eq!(request.hourly_rate, 25.0);
    }

    #[test]
    fn test_dates_and_times_resolve() {
        let request = parse(&[
            "--start-date",
            "2023-01-01",
            "--end-date",
            "2024-03-15",
            "--end-time",
            "10:30 AM",
        ])
        .to_request(now())
        .unwrap();
        assert_eq!(
            request.compute().formatted_duration,
            "1 years, 2 months, 14 days, 10 hours, 30 minutes"
        );
    }

    #[test]
    fn test_time_without_date_is_rejected() {
        let err = parse(&["--start-time", "9:00 AM"]).to_request(now()).unwrap_err();
        assert!(format!("{err:#}").contains("a time needs a date"));
    }

    #[test]
    fn test_bad_holiday_is_rejected() {
        let err = parse(&["--holiday", "next tuesday"]).to_request(now()).unwrap_err();
        assert!(format!("{err:#}").contains("invalid holiday"));
    }

    #[test]
    fn test_negative_rate_is_rejected() {
        let err = parse(&["--rate=-3"]).to_request(now()).unwrap_err();
        assert!(err.to_string().contains("Invalid hourly rate"));
    }

    #[test]
    fn test_swap_reverses_sign() {
        let request = parse(&["--swap"]).to_request(now()).unwrap();
        assert!(request.compute().diff_milliseconds < 0);
    }

    #[test]
    fn test_insight_config_from_args() {
        let cli = parse(&["--insight", "--api-key", "k", "--insight-timeout", "5"]);
        let config = InsightConfig::from(&cli.insight);
        assert_eq!(config.api_key(), Some("k"));
        assert_eq!(config.timeout_seconds, 5);
    }
}
