use thiserror::Error;

/// Every failure the spider can run into.
///
/// Most of the pipeline treats these as "skip this item"; only output I/O is ever surfaced to the
/// caller of [`Spider::run_report`](crate::Spider::run_report).
#[derive(Debug, Error)]
pub enum Error {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("io failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to (de)serialize json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse xml: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("malformed index row at line {line}: {row:?}")]
    MalformedIndexRow { line: usize, row: String },

    #[error("unrecognised filing filename: {0}")]
    UnrecognisedFilename(String),

    #[error("invalid cik: {0:?}")]
    InvalidCik(String),

    #[error("failed to draw chart: {0}")]
    Chart(String),
}

pub type Result<T> = std::result::Result<T, Error>;
