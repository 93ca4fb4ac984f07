//! MSVG document parser: markup text to ordered page nodes.

use std::fs;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::{Document, DocumentKind, Element, PageNode};

use super::preamble::strip_preamble;
use super::tree::parse_tree;

/// Marker that, together with an `image` element, identifies embedded raster data.
const RASTER_DATA_MARKER: &str = "data:image";

/// MSVG document parser.
pub struct MsvgParser {
    doc: Document,
}

impl MsvgParser {
    /// Parse markup text into a document tree.
    ///
    /// Preamble directives are stripped first; any structural malformation in
    /// the rest fails with [`Error::Parse`].
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Result<Self> {
        let stripped = strip_preamble(text);
        let root = parse_tree(&stripped)?;
        Ok(Self {
            doc: Document::new(stripped.into_owned(), root),
        })
    }

    /// Parse UTF-8 bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(data).map_err(|e| Error::Encoding(e.to_string()))?;
        Self::from_str(text)
    }

    /// Read and parse a file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Parse from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// The parsed document.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Single-page or multi-page classification.
    pub fn kind(&self) -> DocumentKind {
        self.doc.kind()
    }

    /// Whether the document embeds raster image data.
    ///
    /// Coarse pattern check: some descendant is an `image` element and the
    /// serialized tree contains a `data:image` URI anywhere.
    pub fn has_raster_content(&self) -> bool {
        let root = self.doc.root();
        root.descendants().any(|el| el.is("image"))
            && root.to_markup().contains(RASTER_DATA_MARKER)
    }

    /// Extract the ordered page nodes.
    ///
    /// Raster content is checked before anything else. Pages whose graphics
    /// root cannot be resolved are skipped; if nothing remains the document
    /// has no renderable content.
    pub fn page_nodes(&self) -> Result<Vec<PageNode<'_>>> {
        if self.has_raster_content() {
            log::debug!("document embeds raster image data");
            return Err(Error::UnsupportedRasterContent);
        }

        let root = self.doc.root();
        let mut pages = Vec::new();
        let mut seen_pages = 0;
        collect_pages(root, &[], &mut seen_pages, &mut pages);

        if seen_pages == 0 && root.is("svg") {
            log::debug!("no Page elements; treating root <{}> as a single page", root.name);
            pages.push(PageNode::new(root, Vec::new()));
        }

        if pages.is_empty() {
            return Err(Error::NoRenderableContent);
        }

        log::debug!("extracted {} page(s)", pages.len());
        Ok(pages)
    }
}

/// Walk descendants of `el` in document order, resolving each `Page` to its
/// graphics root. `scope` holds the namespace declarations visible at `el`'s
/// parent. `seen_pages` counts every `Page` visited, resolved or not.
fn collect_pages<'a>(
    el: &'a Element,
    scope: &[(&'a str, &'a str)],
    seen_pages: &mut usize,
    pages: &mut Vec<PageNode<'a>>,
) {
    let inner = extend_scope(scope, el);

    for child in el.child_elements() {
        if child.is("Page") {
            let position = *seen_pages;
            *seen_pages += 1;
            match resolve_graphics_root(child) {
                Some(svg) => {
                    let page_scope = if std::ptr::eq(svg, child) {
                        inner.clone()
                    } else {
                        extend_scope(&inner, child)
                    };
                    pages.push(PageNode::new(svg, page_scope).with_source_position(position));
                }
                None => log::debug!("skipping <{}> without an svg element", child.name),
            }
        }
        collect_pages(child, &inner, seen_pages, pages);
    }
}

/// Namespace scope inside `el`: the outer scope with `el`'s own declarations
/// replacing any of the same name.
fn extend_scope<'a>(scope: &[(&'a str, &'a str)], el: &'a Element) -> Vec<(&'a str, &'a str)> {
    let mut inner = scope.to_vec();
    for (key, value) in el.namespace_declarations() {
        inner.retain(|(k, _)| *k != key);
        inner.push((key, value));
    }
    inner
}

/// A page's graphics root: the page itself if it is an `svg`, else its first
/// direct `svg` child.
fn resolve_graphics_root(page: &Element) -> Option<&Element> {
    if page.is("svg") {
        Some(page)
    } else {
        page.find_child("svg")
    }
}
