pub(crate) mod common;

/// Insider trades aggregated per issuer, plus the daily filing baseline they are compared to.
pub mod insider;

/// US filings from the [SEC EDGAR] archives; daily indexes, filing directories and Form 4
/// ownership documents.
///
/// [SEC EDGAR]: https://www.sec.gov/search-filings/edgar-search-assistance/accessing-edgar-data
pub mod sec;
