use crate::filter::{LinkFilter, normalize_href};
use scraper::{Html, Selector};
use std::collections::HashSet;

/// Extracts the outbound links of an HTML document.
///
/// Every `<a href>` is normalized with [`normalize_href`] and kept
/// only if `filter` accepts it. With `dedupe` set, repeated links keep their
/// first position and later copies are dropped.
pub fn extract(html: &str, filter: &LinkFilter, dedupe: bool) -> Vec<String> {
    let doc = Html::parse_document(html);
    let link_selector = Selector::parse("a[href]").expect("anchor selector is valid");

    let mut seen = HashSet::new();
    let links = doc
        .select(&link_selector)
        .filter_map(|e| e.value().attr("href"))
        .map(normalize_href)
        .filter(|link| filter.should_keep(link))
        .filter(|link| !dedupe || seen.insert(link.clone()))
        .collect::<Vec<String>>();

    ::log::debug!("Link parser kept {} links", links.len());
    if !links.is_empty() {
        ::log::debug!(
            "First few links: {:?}",
            links.iter().take(5).collect::<Vec<_>>()
        );
    }

    links
}
