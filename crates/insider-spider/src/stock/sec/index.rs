use crate::http::Spider;
use crate::{Error, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

// url
// ----------------------------------------------------------------------------

/// Calendar quarter (1 ..= 4) that `date` falls in.
pub fn quarter_of(date: NaiveDate) -> u32 {
    (date.month() - 1) / 3 + 1
}

/// `{base}/Archives/edgar/daily-index/{YYYY}/QTR{q}/master.{YYYYMMDD}.idx`
pub fn daily_index_url(base: &str, date: NaiveDate) -> String {
    format!(
        "{base}/Archives/edgar/daily-index/{year}/QTR{quarter}/master.{ymd}.idx",
        year = date.year(),
        quarter = quarter_of(date),
        ymd = date.format("%Y%m%d"),
    )
}

// scrape
// ----------------------------------------------------------------------------

impl Spider {
    /// Fetch and parse the master index published for `date`.
    ///
    /// Weekends, holidays and days not yet published come back as HTTP 404, which surfaces here
    /// as [`Error::Http`].
    pub async fn daily_index(&self, date: NaiveDate) -> Result<Vec<FilingRecord>> {
        let url = daily_index_url(&self.config().base_url, date);

        debug!("fetching daily index for {date}");
        let text = self.get_text(&url, self.config().index_delay).await?;
        let records = parse_master_index(&text).map_err(|err| {
            error!("failed to parse daily index for {date}, error({err})");
            err
        })?;

        debug!("daily index for {date} has {} rows", records.len());
        Ok(records)
    }
}

// de
// ----------------------------------------------------------------------------

/// One row of a master index.
///
/// ```text
/// CIK|Company Name|Form Type|Date Filed|File Name
/// --------------------------------------------------------------------------------
/// 1000045|NICHOLAS FINANCIAL INC|4|20250102|edgar/data/1000045/0001000045-25-000001.txt
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingRecord {
    #[serde(rename = "CIK")]
    pub cik: String,

    #[serde(rename = "Company Name")]
    pub company_name: String,

    #[serde(rename = "Form Type")]
    pub form_type: String,

    #[serde(rename = "Date Filed")]
    pub date_filed: String,

    /// Archive path of the full submission text, relative to `/Archives/`.
    #[serde(rename = "Filename")]
    pub filename: String,
}

/// Parse the body of a master index.
///
/// Rows start after the last line beginning with `-----` (or at the top if there is none); every
/// later line containing a `|` is a row. A row without exactly five fields fails the whole file.
pub fn parse_master_index(text: &str) -> Result<Vec<FilingRecord>> {
    let lines: Vec<&str> = text.lines().collect();
    let start = lines
        .iter()
        .rposition(|line| line.starts_with("-----"))
        .map_or(0, |delimiter| delimiter + 1);

    lines[start..]
        .iter()
        .enumerate()
        .filter(|(_, line)| line.contains('|'))
        .map(|(i, line)| {
            let fields: Vec<&str> = line.split('|').collect();
            match fields.as_slice() {
                [cik, company_name, form_type, date_filed, filename] => Ok(FilingRecord {
                    cik: cik.to_string(),
                    company_name: company_name.to_string(),
                    form_type: form_type.to_string(),
                    date_filed: date_filed.to_string(),
                    filename: filename.to_string(),
                }),
                _ => Err(Error::MalformedIndexRow {
                    line: start + i + 1,
                    row: line.to_string(),
                }),
            }
        })
        .collect()
}
