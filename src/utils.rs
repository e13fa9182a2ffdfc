use chrono::{NaiveDate, NaiveTime};

/// Date format used for dated cache directories and reports
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time format used for report file names and reports
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Remove ASCII tabs and line breaks, which URL parsers ignore anywhere in a URL
pub fn strip_tabs_and_newlines(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
        .collect()
}

/// Whether a URL path denotes the site's homepage
pub fn is_homepage_path(path: &str) -> bool {
    path.is_empty() || path == "/"
}

/// Convert a URL path to the name of its cache directory.
///
/// Slashes become dashes and the leading character is dropped, so
/// `/docs/intro` maps to `docs-intro`. Homepage paths map to `homepage_marker`.
pub fn page_dir_name(path: &str, homepage_marker: &str) -> String {
    if is_homepage_path(path) {
        return homepage_marker.to_string();
    }

    path.replace('/', "-").chars().skip(1).collect()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

pub fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
}

pub fn parse_time(value: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(value, TIME_FORMAT)
}
