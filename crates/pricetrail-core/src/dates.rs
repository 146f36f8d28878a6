use chrono::NaiveDate;
use regex::Regex;

/// The human date shape used by order titles and item CSV rows, e.g.
/// "Jan 1, 2024".
pub const HUMAN_DATE_FORMAT: &str = "%b %d, %Y";

/// Pulls the first `Month Day, Year` span out of free text, typically an
/// order title like "Delivered Jan 1, 2024". Returns None when the text
/// carries no such span.
pub fn find_human_date(text: &str) -> Option<&str> {
    let re = Regex::new(r"([A-Za-z]+\s+\d{1,2},\s+\d{4})").expect("regex is valid");
    re.find(text).map(|found| found.as_str())
}

pub fn parse_human_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, HUMAN_DATE_FORMAT).ok()
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// ISO-8601 midnight timestamp, the shape the history artifact stores.
pub fn format_iso_timestamp(date: NaiveDate) -> String {
    date.format("%Y-%m-%dT00:00:00").to_string()
}
