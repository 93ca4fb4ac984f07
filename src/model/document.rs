//! Document-level types.

use super::Element;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A parsed MSVG or SVG document.
///
/// Exists for the duration of one render: the parser owns it and hands out
/// [`PageNode`](super::PageNode)s that borrow from its tree.
#[derive(Debug, Clone)]
pub struct Document {
    /// Markup after preamble stripping
    source: String,

    /// Root element of the parsed tree
    root: Element,
}

impl Document {
    /// Create a document from its (preamble-stripped) source and parsed root.
    pub fn new(source: impl Into<String>, root: Element) -> Self {
        Self {
            source: source.into(),
            root,
        }
    }

    /// The markup the tree was built from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Root element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Whether this is a bare `<svg>` document or a container of pages.
    pub fn kind(&self) -> DocumentKind {
        let has_pages = self.root.descendants().any(|el| el.is("Page"));
        if !has_pages && self.root.is("svg") {
            DocumentKind::SinglePage
        } else {
            DocumentKind::MultiPage
        }
    }

    /// Number of `Page` elements in the tree, resolvable or not.
    pub fn declared_page_count(&self) -> usize {
        self.root.descendants().filter(|el| el.is("Page")).count()
    }

    /// Serialize the whole tree back to markup.
    pub fn to_markup(&self) -> String {
        self.root.to_markup()
    }
}

/// Classification of a document by its structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// A plain `<svg>` root, shown as one implicit page
    SinglePage,

    /// A container with `<Page>` elements
    MultiPage,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::SinglePage => write!(f, "single-page SVG"),
            DocumentKind::MultiPage => write!(f, "multi-page MSVG"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_single_svg() {
        let doc = Document::new("<svg/>", Element::new("svg"));
        assert_eq!(doc.kind(), DocumentKind::SinglePage);
        assert_eq!(doc.declared_page_count(), 0);
    }

    #[test]
    fn test_kind_container() {
        let root = Element::new("MSVG").with_child(
            Element::new("pageSet").with_child(Element::new("Page").with_child(Element::new("svg"))),
        );
        let doc = Document::new("", root);
        assert_eq!(doc.kind(), DocumentKind::MultiPage);
        assert_eq!(doc.declared_page_count(), 1);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(DocumentKind::SinglePage.to_string(), "single-page SVG");
        assert_eq!(DocumentKind::MultiPage.to_string(), "multi-page MSVG");
    }
}
