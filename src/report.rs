//! Flat-text reports, one per cached query.
//!
//! A report is line oriented:
//!
//! ```text
//! <source url>
//! <action tag>
//! <YYYY-MM-DD>
//! <HH:MM:SS>
//! <content...>
//! ```
//!
//! Link scrapes list one link per content line. Text scrapes carry the
//! extracted text as their content lines, or nothing at all when text
//! persistence is disabled; such reports load back with empty text.

use crate::error::{Error, Result};
use crate::results::{Action, Content, Query};
use crate::utils::{format_date, format_time, parse_date, parse_time};
use std::fs;
use std::path::Path;

/// Number of header lines preceding the content
pub const CONTENT_START: usize = 4;

/// Render a query as report text
pub fn render(query: &Query, persist_text: bool) -> String {
    let mut lines = vec![
        query.url.clone(),
        query.action().to_string(),
        format_date(query.date),
        format_time(query.time),
    ];

    match &query.content {
        Content::Links(links) => lines.extend(links.iter().cloned()),
        Content::Text(text) if persist_text => lines.extend(text.lines().map(str::to_string)),
        Content::Text(_) => {}
    }

    lines.iter().map(|line| format!("{}\n", line)).collect()
}

/// Rebuild a query from report text
pub fn parse(report: &str) -> std::result::Result<Query, String> {
    let lines: Vec<&str> = report.lines().collect();
    if lines.len() < CONTENT_START {
        return Err(format!(
            "expected at least {} lines, found {}",
            CONTENT_START,
            lines.len()
        ));
    }

    let url = lines[0];
    let action: Action = lines[1].parse()?;
    let date = parse_date(lines[2]).map_err(|e| format!("bad date {:?}: {}", lines[2], e))?;
    let time = parse_time(lines[3]).map_err(|e| format!("bad time {:?}: {}", lines[3], e))?;

    let body = &lines[CONTENT_START..];
    let content = match action {
        Action::LinkScrape => Content::Links(body.iter().map(|line| line.to_string()).collect()),
        Action::TextScrape => Content::Text(body.join("\n")),
    };

    Ok(Query::at(url, content, date, time))
}

/// Write a query's report to `path`, replacing any existing file
pub fn write(path: &Path, query: &Query, persist_text: bool) -> Result<()> {
    fs::write(path, render(query, persist_text))?;
    Ok(())
}

/// Read a report file back into a query
pub fn read(path: &Path) -> Result<Query> {
    let contents = fs::read_to_string(path)?;
    parse(&contents).map_err(|reason| Error::MalformedReport {
        path: path.to_path_buf(),
        reason,
    })
}
