use crate::config::DomainMatch;
use crate::utils::strip_tabs_and_newlines;
use regex::Regex;
use url::Url;

/// Characters stripped from both ends of every href
const HREF_TRIM: &[char] = &['/', '"', '#'];

/// Configuration for filtering scraped links
#[derive(Debug, Clone, Default)]
pub struct LinkFilterConfig {
    /// Domain restriction (if None, links to any domain are kept)
    pub required_domain: Option<String>,

    /// How `required_domain` is compared with a link
    pub domain_match: DomainMatch,

    /// Regex patterns for links to keep (if empty, all links are kept unless excluded)
    pub include_patterns: Vec<String>,

    /// Regex patterns for links to drop (these take precedence over include patterns)
    pub exclude_patterns: Vec<String>,
}

/// Decides which hrefs found on a page end up in a link scrape
#[derive(Debug, Default)]
pub struct LinkFilter {
    config: LinkFilterConfig,
    include_regexes: Vec<Regex>,
    exclude_regexes: Vec<Regex>,
}

impl LinkFilter {
    /// Create a new link filter from configuration
    pub fn new(config: LinkFilterConfig) -> Result<Self, regex::Error> {
        let include_regexes = config
            .include_patterns
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<Result<Vec<_>, _>>()?;

        let exclude_regexes = config
            .exclude_patterns
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            config,
            include_regexes,
            exclude_regexes,
        })
    }

    /// Determine if an already-normalized link passes every rule
    pub fn should_keep(&self, link: &str) -> bool {
        // Only links with an explicit scheme separator count as outbound
        if !is_absolute(link) {
            return false;
        }

        if !self.is_in_domain_scope(link) {
            return false;
        }

        if self.exclude_regexes.iter().any(|regex| regex.is_match(link)) {
            return false;
        }

        if !self.include_regexes.is_empty()
            && !self.include_regexes.iter().any(|regex| regex.is_match(link))
        {
            return false;
        }

        true
    }

    /// Check if a link is within the required domain, if any
    fn is_in_domain_scope(&self, link: &str) -> bool {
        let Some(required) = &self.config.required_domain else {
            return true;
        };

        match self.config.domain_match {
            DomainMatch::Substring => link.contains(required.as_str()),
            DomainMatch::Host => match Url::parse(link) {
                Ok(url) => url
                    .host_str()
                    .is_some_and(|host| host.eq_ignore_ascii_case(required)),
                Err(_) => false,
            },
        }
    }
}

/// Drop tabs and line breaks from an href, then strip leading and
/// trailing slashes, quotes and hashes
pub fn normalize_href(href: &str) -> String {
    strip_tabs_and_newlines(href).trim_matches(HREF_TRIM).to_string()
}

/// Whether a link carries a `//` scheme separator
pub fn is_absolute(link: &str) -> bool {
    link.contains("//")
}
