pub mod links;
pub mod text;


use crate::filter::LinkFilter;
use crate::results::{Action, Content};

/// What to pull out of a page, with the options that extraction needs
#[derive(Debug, Clone, Copy)]
pub enum Extraction<'a> {
    /// Outbound links kept by `filter`, each once when `dedupe` is set
    Links { filter: &'a LinkFilter, dedupe: bool },
    /// Visible text
    Text,
}

impl Extraction<'_> {
    pub fn action(&self) -> Action {
        match self {
            Extraction::Links { .. } => Action::LinkScrape,
            Extraction::Text => Action::TextScrape,
        }
    }
}

/// Runs the extractor an [`Extraction`] asks for over fetched markup
pub struct Parser;

impl Parser {
    pub fn parse(markup: &str, extraction: Extraction<'_>) -> Content {
        match extraction {
            Extraction::Links { filter, dedupe } => {
                Content::Links(links::extract(markup, filter, dedupe))
            }
            Extraction::Text => Content::Text(text::visible_text(markup)),
        }
    }
}
