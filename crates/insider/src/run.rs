use chrono::{NaiveDate, Utc};
use colored::Colorize;
use insider_spider::report::ReportOptions;
use insider_spider::stock::sec::form4::parse_form4;
use insider_spider::{Config, Spider};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

fn spider() -> anyhow::Result<Spider> {
    let spider = Spider::new(Config::from_env()).map_err(|err| {
        error!("failed to build http client, error({err})");
        err
    })?;
    Ok(spider)
}

/// Run the whole report and print a summary of it.
pub(crate) async fn report(
    output_dir: PathBuf,
    charts_dir: PathBuf,
    max_filings: usize,
    as_of: Option<NaiveDate>,
    tui: bool,
) -> anyhow::Result<()> {
    let today = as_of.unwrap_or_else(|| Utc::now().date_naive());
    let options = ReportOptions {
        output_dir,
        charts_dir,
        max_filings,
        today,
        tui,
    };
    debug!("report options: {options:?}");

    let report = spider()?.run_report(&options).await?;
    info!("report generated at {}", report.generated_at_utc);

    println!("{}", "=== Final Report Summary ===".bold());
    match &report.top_issuer_today {
        Some(top) => println!(
            "top issuer today:       {} ({} transactions, {} bought, {} sold)",
            top.issuer_symbol.green().bold(),
            top.n_transactions,
            top.buys,
            top.sells
        ),
        None => println!("top issuer today:       {}", "none".yellow()),
    }
    println!(
        "filings/day prior 7d:   {:.2}",
        report.avg_filings_per_day_prior_7d
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    println!(
        "\nartifacts saved under {} and {}",
        options.output_dir.display(),
        options.charts_dir.display()
    );

    Ok(())
}

/// Print every Form 4 filing listed between `from` and `to`.
pub(crate) async fn filings(from: NaiveDate, to: NaiveDate, tui: bool) -> anyhow::Result<()> {
    let filings = spider()?.form4_filings(from, to, tui).await;
    println!("{}", serde_json::to_string_pretty(&filings)?);
    Ok(())
}

/// Print a local Form 4 document.
pub(crate) async fn parse(path: &Path) -> anyhow::Result<()> {
    let xml = tokio::fs::read_to_string(path).await.map_err(|err| {
        error!("failed to read {}, error({err})", path.display());
        err
    })?;
    let form4 = parse_form4(&xml)?;
    println!("{}", serde_json::to_string_pretty(&form4)?);
    Ok(())
}
