use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sets the level of tracing.
    ///
    /// Without a trace level, progress bars are drawn instead of log lines.
    #[arg(short, long, global = true)]
    pub trace: Option<TraceLevel>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report insider activity from the last 24 hours of Form 4 filings against the prior week.
    Report {
        /// Directory for the JSON artifacts.
        #[arg(short, long, default_value = "data")]
        output_dir: PathBuf,

        /// Directory for the chart.
        #[arg(short, long, default_value = "charts")]
        charts_dir: PathBuf,

        /// Most Form 4 documents to parse.
        #[arg(short, long, default_value_t = 250)]
        max_filings: usize,

        /// Treat this day (YYYY-MM-DD) as today; defaults to the current UTC date.
        #[arg(short, long)]
        as_of: Option<NaiveDate>,
    },

    /// Print the Form 4 filings listed in the daily indexes of a date range, as JSON.
    Filings {
        /// First day (YYYY-MM-DD), inclusive.
        #[arg(long)]
        from: NaiveDate,

        /// Last day (YYYY-MM-DD), inclusive.
        #[arg(long)]
        to: NaiveDate,
    },

    /// Parse a local Form 4 XML document and print it as JSON.
    Parse {
        /// Path to the XML document.
        path: PathBuf,
    },
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
#[clap(rename_all = "UPPERCASE")]
pub enum TraceLevel {
    DEBUG,
    ERROR,
    INFO,
    TRACE,
    WARN,
}
