use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// How same-domain filtering decides a link belongs to the page's domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainMatch {
    /// Parse the link and compare its host with the page's host
    #[default]
    Host,
    /// Keep any link whose text contains the page's domain
    Substring,
}

/// Configuration for scraping and caching a page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Root directory of the record cache
    #[serde(default = "default_cache_root")]
    pub cache_root: PathBuf,

    /// Directory name used for a page with an empty path
    #[serde(default = "default_homepage_marker")]
    pub homepage_marker: String,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Rule for same-domain link filtering
    #[serde(default)]
    pub domain_match: DomainMatch,

    /// Whether text scrape reports carry the extracted text
    #[serde(default = "default_persist_text")]
    pub persist_text: bool,

    /// Regex patterns a link must match to be kept (if empty, all links are kept unless excluded)
    #[serde(default)]
    pub include_patterns: Vec<String>,

    /// Regex patterns that drop a link (these take precedence over include patterns)
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            cache_root: default_cache_root(),
            homepage_marker: default_homepage_marker(),
            user_agent: default_user_agent(),
            domain_match: DomainMatch::default(),
            persist_text: default_persist_text(),
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
        }
    }
}

impl ScrapeConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Replace the cache root
    pub fn with_cache_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.cache_root = root.into();
        self
    }
}

fn default_cache_root() -> PathBuf {
    PathBuf::from("caches")
}

fn default_homepage_marker() -> String {
    "* homepage".to_string()
}

fn default_user_agent() -> String {
    concat!("scrape-cache/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_persist_text() -> bool {
    true
}
