use chrono::NaiveDate;

/// Left-pad a CIK with zeros to the 10 digits EDGAR uses in its own listings.
pub(crate) fn pad_cik(cik: &str) -> String {
    format!("{:0>10}", cik.trim())
}

/// Parse the leading `YYYY-MM-DD` of a date string; trailing offsets (`2025-01-02-05:00`) are
/// ignored.
pub(crate) fn parse_date(date: &str) -> Option<NaiveDate> {
    let date = date.trim();
    let date = date.get(..10).unwrap_or(date);
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Parse a number, treating anything unparseable (or NaN) as unknown.
pub(crate) fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| !value.is_nan())
}
