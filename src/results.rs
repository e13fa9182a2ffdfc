use chrono::{Local, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of extraction a query records
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Outbound hyperlinks
    LinkScrape,
    /// Visible page text
    TextScrape,
}

impl Action {
    /// The tag written to reports and file names
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::LinkScrape => "Link Scrape",
            Action::TextScrape => "Text Scrape",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Link Scrape" => Ok(Action::LinkScrape),
            "Text Scrape" => Ok(Action::TextScrape),
            other => Err(format!("unknown action tag {:?}", other)),
        }
    }
}

/// Extracted content of a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Content {
    /// Links in document order (first occurrences only when deduplicated)
    Links(Vec<String>),
    /// Whitespace-joined visible text
    Text(String),
}

impl Content {
    pub fn action(&self) -> Action {
        match self {
            Content::Links(_) => Action::LinkScrape,
            Content::Text(_) => Action::TextScrape,
        }
    }
}

/// Identity of a query within a record store.
///
/// Two queries of the same action against the same URL captured within the
/// same second share an id; the later one replaces the earlier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QueryId {
    pub url: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub action: Action,
}

/// One extraction result captured from a page at a point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// URL of the page the content came from
    pub url: String,

    /// Extracted links or text
    pub content: Content,

    /// Capture date
    pub date: NaiveDate,

    /// Capture time of day, second resolution
    pub time: NaiveTime,
}

impl Query {
    /// Create a query stamped with the current local time
    pub fn new(url: impl Into<String>, content: Content) -> Self {
        let now = Local::now().naive_local();
        let time = now.time();
        let time = time.with_nanosecond(0).unwrap_or(time);
        Self::at(url, content, now.date(), time)
    }

    /// Create a query with an explicit capture timestamp
    pub fn at(url: impl Into<String>, content: Content, date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            url: url.into(),
            content,
            date,
            time,
        }
    }

    pub fn action(&self) -> Action {
        self.content.action()
    }

    pub fn id(&self) -> QueryId {
        QueryId {
            url: self.url.clone(),
            date: self.date,
            time: self.time,
            action: self.action(),
        }
    }

    /// Links captured by a link scrape, empty for text scrapes
    pub fn links(&self) -> &[String] {
        match &self.content {
            Content::Links(links) => links,
            Content::Text(_) => &[],
        }
    }

    /// Text captured by a text scrape, `None` for link scrapes
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            Content::Text(text) => Some(text),
            Content::Links(_) => None,
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.content {
            Content::Links(links) => write!(f, "{}", links.join("\n")),
            Content::Text(text) => f.write_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_tags() {
        assert_eq!(Action::LinkScrape.to_string(), "Link Scrape");
        assert_eq!("Text Scrape".parse::<Action>(), Ok(Action::TextScrape));
        assert!("Link scrape".parse::<Action>().is_err());
    }

    #[test]
    fn test_new_query_has_second_resolution() {
        let query = Query::new("https://example.com/", Content::Text(String::new()));
        assert_eq!(query.time.nanosecond(), 0);
        assert_eq!(query.action(), Action::TextScrape);
    }

    #[test]
    fn test_id_distinguishes_actions() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let time = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        let links = Query::at("https://a.com", Content::Links(vec![]), date, time);
        let text = Query::at("https://a.com", Content::Text("hi".into()), date, time);

        assert_ne!(links.id(), text.id());
        assert_eq!(links.id().url, text.id().url);
        assert_eq!(text.text(), Some("hi"));
        assert!(text.links().is_empty());
    }
}
