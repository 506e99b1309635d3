/// PNG bar chart of the busiest issuers.
pub mod chart;

use crate::fs::write_json;
use crate::http::Spider;
use crate::stock::insider::{aggregate_by_issuer, weekly_baseline, IssuerAggregate};
use crate::stock::sec::filings::Windows;
use crate::{tui, Result};
use chart::save_chart;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

pub const SUMMARY_FILE: &str = "last24h_insider_summary.json";
pub const BASELINE_FILE: &str = "weekly_baseline.json";
pub const CHART_FILE: &str = "insider_activity_last24h.png";
pub const REPORT_FILE: &str = "final_report.json";

/// Where a report is written, and how much of EDGAR it reads.
#[derive(Clone, Debug)]
pub struct ReportOptions {
    pub output_dir: PathBuf,
    pub charts_dir: PathBuf,
    /// Most Form 4 documents parsed for the last 24 hours.
    pub max_filings: usize,
    /// Last day of both windows.
    pub today: NaiveDate,
    /// Draw progress bars and stage banners.
    pub tui: bool,
}

impl ReportOptions {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            output_dir: PathBuf::from("data"),
            charts_dir: PathBuf::from("charts"),
            max_filings: 300,
            today,
            tui: false,
        }
    }
}

// out
// ----------------------------------------------------------------------------

/// `final_report.json`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(rename = "generatedAtUTC")]
    pub generated_at_utc: String,

    #[serde(rename = "topIssuerToday")]
    pub top_issuer_today: Option<IssuerAggregate>,

    #[serde(rename = "avgFilingsPerDayPrior7d")]
    pub avg_filings_per_day_prior_7d: f64,

    pub artifacts: Artifacts,
}

/// Paths of everything a report wrote.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Artifacts {
    pub last24h_json: PathBuf,
    pub weekly_json: PathBuf,
    pub chart_png: PathBuf,
}

/// `weekly_baseline.json`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeeklyBaseline {
    pub avg_filings_per_day_prior_7d: f64,
}

// run
// ----------------------------------------------------------------------------

impl Spider {
    /// Collect, parse and aggregate the last 24 hours of Form 4 filings, compare them with the
    /// prior week, and write every artifact.
    ///
    /// Network and parse failures only thin out the data; the only errors returned are failures
    /// to write the outputs.
    pub async fn run_report(&self, options: &ReportOptions) -> Result<Report> {
        let time = std::time::Instant::now();
        create_dir(&options.output_dir).await?;
        create_dir(&options.charts_dir).await?;

        let windows = Windows::ending(options.today);
        debug!("report windows: {windows:?}");

        tui::banner("Form 4 filings", options.tui);
        let last24 = self
            .form4_filings(windows.last24.start, windows.last24.end, options.tui)
            .await;
        let week = self
            .form4_filings(windows.week.start, windows.week.end, options.tui)
            .await;

        tui::banner("Form 4 documents", options.tui);
        let transactions = self
            .transactions(&last24, options.max_filings, options.tui)
            .await;

        let summary = aggregate_by_issuer(&transactions);
        let baseline = weekly_baseline(&week);
        info!(
            "{} issuers traded in the last 24 hours; {baseline:.2} filings per day over the prior week",
            summary.len()
        );

        let artifacts = Artifacts {
            last24h_json: options.output_dir.join(SUMMARY_FILE),
            weekly_json: options.output_dir.join(BASELINE_FILE),
            chart_png: options.charts_dir.join(CHART_FILE),
        };
        write_json(&artifacts.last24h_json, &summary).await?;
        write_json(
            &artifacts.weekly_json,
            &WeeklyBaseline {
                avg_filings_per_day_prior_7d: baseline,
            },
        )
        .await?;
        save_chart(&summary, &artifacts.chart_png)?;

        let report = Report {
            generated_at_utc: Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            top_issuer_today: summary.into_iter().next(),
            avg_filings_per_day_prior_7d: baseline,
            artifacts,
        };
        write_json(options.output_dir.join(REPORT_FILE), &report).await?;

        info!("report written, {}", crate::time_elapsed(time));
        Ok(report)
    }
}

async fn create_dir(dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(dir).await.map_err(|err| {
        error!("failed to create {}, error({err})", dir.display());
        err
    })?;
    Ok(())
}
