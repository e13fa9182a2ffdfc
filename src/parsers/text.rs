use scraper::{Html, Node};

/// Elements whose text never counts as visible
const HIDDEN_PARENTS: &[&str] = &["style", "script", "head", "title", "meta"];

/// Extracts the visible text of an HTML document.
///
/// Text nodes are visited in document order. A node is skipped when its
/// parent is one of [`HIDDEN_PARENTS`] or the document itself. Survivors are
/// trimmed, empty ones dropped, and the rest joined with single spaces.
/// Comments are separate nodes in the tree and never contribute.
pub fn visible_text(html: &str) -> String {
    let doc = Html::parse_document(html);

    doc.tree
        .root()
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let parent = node.parent()?;
            if !is_visible_parent(parent.value()) {
                return None;
            }
            let trimmed = text.trim();
            (!trimmed.is_empty()).then_some(trimmed)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_visible_parent(parent: &Node) -> bool {
    match parent {
        Node::Element(element) => !HIDDEN_PARENTS.contains(&element.name()),
        Node::Document | Node::Fragment => false,
        _ => true,
    }
}
