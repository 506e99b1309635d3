use super::index::FilingRecord;
use crate::http::Spider;
use crate::stock::common::pad_cik;
use crate::tui;
use chrono::{Days, NaiveDate};
use futures::{stream, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Form types counted as insider filings: the original Form 4 and its amendment.
pub const FORM_TYPES: [&str; 2] = ["4", "4/A"];

// scrape
// ----------------------------------------------------------------------------

impl Spider {
    /// Every Form 4 (or 4/A) listed in the daily indexes from `start` to `end`, inclusive.
    ///
    /// Days whose index cannot be fetched or parsed are skipped, so an unreachable server simply
    /// yields no filings.
    pub async fn form4_filings(&self, start: NaiveDate, end: NaiveDate, tui: bool) -> Vec<Filing> {
        let time = std::time::Instant::now();
        let days = days_inclusive(start, end);
        let pb = tui::progress_bar(days.len(), "daily indexes", tui);

        let mut filings = Vec::new();
        let mut stream = stream::iter(days);
        while let Some(day) = stream.next().await {
            match self.daily_index(day).await {
                Ok(records) => {
                    let before = filings.len();
                    filings.extend(
                        records
                            .into_iter()
                            .filter(is_form4)
                            .map(|record| Filing::new(record, day)),
                    );
                    debug!("{} form 4 filings listed on {day}", filings.len() - before);
                }
                Err(err) => warn!("skipping daily index for {day}, error({err})"),
            }
            pb.inc(1);
        }
        pb.finish_and_clear();

        info!(
            "collected {} form 4 filings from {start} to {end}, {}",
            filings.len(),
            crate::time_elapsed(time)
        );
        filings
    }
}

fn is_form4(record: &FilingRecord) -> bool {
    FORM_TYPES.contains(&record.form_type.as_str())
}

/// Every calendar day from `start` to `end`, inclusive; empty when `start > end`.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|day| *day <= end).collect()
}

// windows
// ----------------------------------------------------------------------------

/// An inclusive range of days.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// The two spans a report compares.
///
/// EDGAR publishes one index per day, so "the last 24 hours" is approximated by yesterday's and
/// today's indexes. The prior week runs from eight days ago up to yesterday and so shares
/// yesterday with `last24`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Windows {
    pub last24: DateRange,
    pub week: DateRange,
}

impl Windows {
    pub fn ending(today: NaiveDate) -> Self {
        let yesterday = today - Days::new(1);
        Self {
            last24: DateRange {
                start: yesterday,
                end: today,
            },
            week: DateRange {
                start: today - Days::new(8),
                end: yesterday,
            },
        }
    }
}

// de
// ----------------------------------------------------------------------------

/// A Form 4 index row, tagged with the day whose index listed it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filing {
    #[serde(flatten)]
    pub record: FilingRecord,
    pub date: NaiveDate,
}

impl Filing {
    pub fn new(mut record: FilingRecord, date: NaiveDate) -> Self {
        record.cik = pad_cik(&record.cik);
        Self { record, date }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn days_cross_month_boundaries() {
        let days = days_inclusive(date(2024, 12, 30), date(2025, 1, 2));
        assert_eq!(
            days,
            vec![
                date(2024, 12, 30),
                date(2024, 12, 31),
                date(2025, 1, 1),
                date(2025, 1, 2)
            ]
        );
        assert_eq!(days_inclusive(date(2025, 1, 2), date(2025, 1, 2)).len(), 1);
        assert!(days_inclusive(date(2025, 1, 3), date(2025, 1, 2)).is_empty());
    }

    #[test]
    fn windows_end_today() {
        let windows = Windows::ending(date(2025, 1, 3));
        assert_eq!(windows.last24.start, date(2025, 1, 2));
        assert_eq!(windows.last24.end, date(2025, 1, 3));
        assert_eq!(windows.week.start, date(2024, 12, 26));
        assert_eq!(windows.week.end, date(2025, 1, 2));
        assert_eq!(
            days_inclusive(windows.week.start, windows.week.end).len(),
            8
        );
    }

    #[test]
    fn filing_pads_cik_and_filters_forms() {
        let record = FilingRecord {
            cik: "320193".to_string(),
            company_name: "Apple Inc.".to_string(),
            form_type: "4/A".to_string(),
            date_filed: "20250102".to_string(),
            filename: "edgar/data/320193/0000320193-25-000001.txt".to_string(),
        };
        assert!(is_form4(&record));
        assert!(!is_form4(&FilingRecord {
            form_type: "144".to_string(),
            ..record.clone()
        }));

        let filing = Filing::new(record, date(2025, 1, 2));
        assert_eq!(filing.record.cik, "0000320193");
    }
}
