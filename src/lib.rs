// Re-export modules
pub mod cache;
pub mod config;
pub mod error;
pub mod fetchers;
pub mod filter;
pub mod parsers;
pub mod report;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use cache::RecordStore;
pub use config::{DomainMatch, ScrapeConfig};
pub use error::{Error, Result};
pub use results::{Action, Content, Query, QueryId};

use chrono::{DateTime, Local};
use fetchers::{Fetcher, HttpFetcher};
use filter::{LinkFilter, LinkFilterConfig};
use parsers::{Extraction, Parser};
use std::path::PathBuf;
use url::{ParseError, Url};

/// One target URL, its most recent markup and its record cache
pub struct Page {
    url: String,
    path: String,
    domain: String,
    host: String,
    is_homepage: bool,
    html: Option<String>,
    last_request: Option<DateTime<Local>>,
    config: ScrapeConfig,
    fetcher: Box<dyn Fetcher>,
    cache: RecordStore,
}

impl Page {
    /// Create a page handle with the default configuration
    pub fn new(url: &str) -> Result<Self> {
        Self::with_config(url, ScrapeConfig::default())
    }

    /// Create a page handle whose cache and fetcher follow `config`
    ///
    /// Tabs and line breaks are removed from `url`, as URL parsers do, so the
    /// stored URL always fits on one report line. URLs without a host are
    /// rejected since records are filed by domain.
    pub fn with_config(url: &str, config: ScrapeConfig) -> Result<Self> {
        let url = utils::strip_tabs_and_newlines(url);
        let parsed = Url::parse(&url).map_err(|source| Error::InvalidUrl {
            url: url.clone(),
            source,
        })?;

        let host = match parsed.host_str() {
            Some(host) if !host.is_empty() => host.to_string(),
            _ => {
                return Err(Error::InvalidUrl {
                    url,
                    source: ParseError::EmptyHost,
                });
            }
        };
        let domain = match parsed.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.clone(),
        };
        let path = parsed.path().to_string();

        let fetcher = HttpFetcher::new(&config)?;
        let cache = RecordStore::for_page(&config, &domain, &path);

        Ok(Self {
            url,
            is_homepage: utils::is_homepage_path(&path),
            path,
            domain,
            host,
            html: None,
            last_request: None,
            config,
            fetcher: Box::new(fetcher),
            cache,
        })
    }

    /// Replace the fetcher used to retrieve markup
    pub fn with_fetcher(mut self, fetcher: impl Fetcher + 'static) -> Self {
        self.fetcher = Box::new(fetcher);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Path component of the URL
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Host of the URL, with the port when one is given
    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn is_homepage(&self) -> bool {
        self.is_homepage
    }

    /// Markup from the last successful fetch
    pub fn html(&self) -> Option<&str> {
        self.html.as_deref()
    }

    /// When the last fetch was attempted
    pub fn last_request(&self) -> Option<DateTime<Local>> {
        self.last_request
    }

    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    pub fn cache(&self) -> &RecordStore {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut RecordStore {
        &mut self.cache
    }

    /// Fetch the page once.
    ///
    /// On success the markup is replaced and `true` is returned. Any failure
    /// is logged and reported as `false`, keeping the previous markup.
    pub async fn fetch(&mut self) -> bool {
        ::log::info!("Requesting {}", self.url);
        self.last_request = Some(Local::now());

        match self.fetcher.fetch(&self.url).await {
            Ok(html) => {
                ::log::info!("Successfully requested {}", self.url);
                self.html = Some(html);
                true
            }
            Err(e) => {
                ::log::warn!("Failed to request {}: {}", self.url, e);
                false
            }
        }
    }

    /// Extract the page's outbound links from the fetched markup.
    ///
    /// With `same_domain` set only links on this page's domain are kept;
    /// with `dedupe` set each link appears once.
    pub fn scrape_links(&self, same_domain: bool, dedupe: bool) -> Result<Query> {
        let html = self.fetched_html()?;
        let filter = self.link_filter(same_domain)?;
        let content = Parser::parse(
            html,
            Extraction::Links {
                filter: &filter,
                dedupe,
            },
        );
        Ok(Query::new(self.url.clone(), content))
    }

    /// Extract the page's visible text from the fetched markup
    pub fn scrape_text(&self) -> Result<Query> {
        let html = self.fetched_html()?;
        let content = Parser::parse(html, Extraction::Text);
        Ok(Query::new(self.url.clone(), content))
    }

    /// Persist a query in this page's cache and return the report path
    pub fn store(&mut self, query: &Query) -> Result<PathBuf> {
        self.cache.store(query)
    }

    fn fetched_html(&self) -> Result<&str> {
        self.html
            .as_deref()
            .ok_or_else(|| Error::NotFetched(self.url.clone()))
    }

    fn link_filter(&self, same_domain: bool) -> Result<LinkFilter> {
        let required_domain = same_domain.then(|| match self.config.domain_match {
            DomainMatch::Host => self.host.clone(),
            DomainMatch::Substring => self.domain.clone(),
        });

        let filter = LinkFilter::new(LinkFilterConfig {
            required_domain,
            domain_match: self.config.domain_match,
            include_patterns: self.config.include_patterns.clone(),
            exclude_patterns: self.config.exclude_patterns.clone(),
        })?;
        Ok(filter)
    }
}
