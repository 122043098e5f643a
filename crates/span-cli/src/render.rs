//! Text and JSON output.

use std::fmt::{self, Write as _};

use serde::Serialize;

use span_engine::{CalculationRequest, CalculationResult, Earnings, Perspective};

/// Everything printed for one calculation.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub request: &'a CalculationRequest,
    pub result: &'a CalculationResult,
    pub earnings: Earnings,
    pub perspective: Perspective,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insight: Option<String>,
}

impl<'a> Report<'a> {
    pub fn new(request: &'a CalculationRequest, result: &'a CalculationResult) -> Self {
        Self {
            request,
            result,
            earnings: Earnings::estimate(result, request.hourly_rate),
            perspective: Perspective::of(result),
            insight: None,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_text(&self) -> String {
        let r = self.result;
        let e = &self.earnings;
        let p = &self.perspective;
        let (start, end) = self.request.instants();
        let mut out = String::new();

        line(&mut out, format_args!("Total Duration: {}", r.formatted_duration));
        line(
            &mut out,
            format_args!(
                "From {} to {} ({} ms)",
                start.format("%Y-%m-%d %I:%M %p"),
                end.format("%Y-%m-%d %I:%M %p"),
                r.diff_milliseconds
            ),
        );

        line(&mut out, format_args!("\nBreakdown"));
        row(&mut out, "Years", r.years);
        row(&mut out, "Months", r.months);
        row(&mut out, "Days", r.days);
        row(&mut out, "Hours", r.hours);
        row(&mut out, "Minutes", r.minutes);
        row(&mut out, "Seconds", r.seconds);

        line(&mut out, format_args!("\nTotals"));
        row(&mut out, "Days", r.total_days);
        row(&mut out, "Hours", r.total_hours);
        row(&mut out, "Minutes", r.total_minutes);
        row(&mut out, "Seconds", r.total_seconds);

        line(&mut out, format_args!("\nWork"));
        row(&mut out, "Business days", r.business_days);
        row(&mut out, "Weekend/non-work days", r.weekend_days);
        if r.exclude_weekends {
            row(&mut out, "Counted days", r.counted_days);
        }
        row(
            &mut out,
            &format!("Work earnings (@ {}/hr)", dollars(e.hourly_rate)),
            dollars(e.work_earnings),
        );
        row(&mut out, "Continuous earnings", dollars(e.continuous_earnings));

        line(&mut out, format_args!("\nPerspective"));
        row(&mut out, "Weeks", format!("{:.1}", p.weeks));
        row(&mut out, "Fortnights", format!("{:.2}", p.fortnights));
        row(&mut out, "Of a year", format!("{:.2}%", p.percent_of_year));
        row(&mut out, "Of a lifetime", format!("{:.5}%", p.percent_of_lifetime));
        row(&mut out, "Heartbeats", r.heartbeats);
        row(&mut out, "Breaths", r.breaths);

        if let Some(insight) = &self.insight {
            line(&mut out, format_args!("\nInsight\n{insight}"));
        }
        out
    }
}

const LABEL_WIDTH: usize = 30;

// Writing to a String cannot fail.
fn line(out: &mut String, args: fmt::Arguments<'_>) {
    let _ = out.write_fmt(args);
    out.push('\n');
}

fn row(out: &mut String, label: &str, value: impl fmt::Display) {
    let _ = writeln!(out, "  {:<width$}{}", label, value, width = LABEL_WIDTH);
}

/// `$1234.50`. Grouping and currency locale are out of scope.
fn dollars(amount: f64) -> String {
    format!("${amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn week_request() -> CalculationRequest {
        let now = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        CalculationRequest::starting_at(now)
    }

    #[test]
    fn test_text_report_sections() {
        let request = week_request();
        let result = request.compute();
        let text = Report::new(&request, &result).to_text();
        assert!(text.starts_with("Total Duration: 7 days\n"));
        assert!(text.contains("From 2024-01-01 12:00 AM to 2024-01-08 12:00 AM (604800000 ms)"));
        assert!(text.contains(&format!("  {:<30}5\n", "Business days")));
        assert!(text.contains("Work earnings (@ $25.00/hr)   $1000.00"));
        assert!(text.contains("$4200.00"));
        assert!(text.contains(&format!("  {:<30}806400\n", "Heartbeats")));
        assert!(!text.contains("Counted days"));
        assert!(!text.contains("Insight"));
    }

    #[test]
    fn test_text_report_shows_counted_days_when_excluding() {
        let mut request = week_request();
        request.exclude_weekends = true;
        let result = request.compute();
        let text = Report::new(&request, &result).to_text();
        assert!(text.contains(&format!("  {:<30}5\n", "Counted days")));
    }

    #[test]
    fn test_text_report_includes_insight() {
        let request = week_request();
        let result = request.compute();
        let mut report = Report::new(&request, &result);
        report.insight = Some("- a fact".to_string());
        assert!(report.to_text().ends_with("\nInsight\n- a fact\n"));
    }

    #[test]
    fn test_json_report() {
        let request = week_request();
        let result = request.compute();
        let json: serde_json::Value =
            serde_json::from_str(&Report::new(&request, &result).to_json().unwrap()).unwrap();
        assert_eq!(json["result"]["formatted_duration"], "7 days");
        assert_eq!(json["earnings"]["work_hours"], 40);
        assert_eq!(json["perspective"]["weeks"], 1.0);
        assert!(json.get("insight").is_none());
    }

    #[test]
    fn test_dollars() {
        assert_eq!(dollars(1000.0), "$1000.00");
        assert_eq!(dollars(3.333), "$3.33");
    }
}
