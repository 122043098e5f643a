mod cli;
mod config;
mod insight;
mod render;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::config::InsightConfig;
use crate::insight::{insight_or_fallback, GeminiInsight, UNAVAILABLE_MESSAGE};
use crate::render::Report;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let now = Local::now().naive_local();
    let request = cli.to_request(now).context("could not build calculation")?;
    tracing::debug!(
        start = %request.start,
        end = %request.end,
        holidays = request.holidays.len(),
        exclude_weekends = request.exclude_weekends,
        "computing span"
    );

    let result = request.compute();

    if cli.share {
        println!("{}", span_engine::share_text(&result));
        return Ok(());
    }

    let mut report = Report::new(&request, &result);

    if cli.insight.insight {
        let config = InsightConfig::from(&cli.insight);
        tracing::info!(model = %config.model, "requesting insight");
        let text = match GeminiInsight::new(config) {
            Ok(provider) => insight_or_fallback(&provider, &result.formatted_duration).await,
            Err(e) => {
                tracing::warn!(error = %e, "could not create insight client");
                UNAVAILABLE_MESSAGE.to_string()
            }
        };
        report.insight = Some(text);
    }

    if cli.json {
        println!("{}", report.to_json().context("could not serialize report")?);
    } else {
        print!("{}", report.to_text());
    }
    Ok(())
}
