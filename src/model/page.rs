//! Page-level types.

use super::Element;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// The SVG namespace URI.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// A page found in a parsed document.
///
/// Borrows the page's graphics root (`<svg>` element) from the document tree.
/// For single-page documents this is the document root; for containers it is
/// the `<Page>` element itself when that is an `svg`, or its first `svg` child.
#[derive(Debug, Clone)]
pub struct PageNode<'a> {
    graphics_root: &'a Element,
    inherited_namespaces: Vec<(&'a str, &'a str)>,
    source_position: Option<usize>,
}

impl<'a> PageNode<'a> {
    /// Create a page node from a graphics root and the namespace
    /// declarations in scope at its parent.
    pub fn new(graphics_root: &'a Element, inherited_namespaces: Vec<(&'a str, &'a str)>) -> Self {
        Self {
            graphics_root,
            inherited_namespaces,
            source_position: None,
        }
    }

    /// Set the position of the originating `<Page>` among every `<Page>`
    /// element in the document, counting those that were skipped.
    pub fn with_source_position(mut self, position: usize) -> Self {
        self.source_position = Some(position);
        self
    }

    /// Position of the originating `<Page>` element (0-indexed), if any.
    pub fn source_position(&self) -> Option<usize> {
        self.source_position
    }

    /// The `<svg>` element holding this page's content.
    pub fn graphics_root(&self) -> &'a Element {
        self.graphics_root
    }

    /// Raw `viewBox` attribute, if declared.
    pub fn view_box(&self) -> Option<&'a str> {
        self.graphics_root.attribute("viewBox")
    }

    /// Namespace declarations made by ancestors and visible to this page.
    pub fn inherited_namespaces(&self) -> &[(&'a str, &'a str)] {
        &self.inherited_namespaces
    }

    /// Serialize the graphics root as a standalone document.
    ///
    /// Declarations inherited from ancestors are copied onto the root unless the
    /// root redeclares them. With `ensure_svg_namespace`, an unprefixed root with
    /// no default namespace in scope gets `xmlns` set to the SVG namespace.
    pub fn to_standalone_markup(&self, ensure_svg_namespace: bool) -> String {
        let root = self.graphics_root;
        let declared_here = |key: &str| root.namespace_declarations().any(|(k, _)| k == key);

        let mut extra: Vec<(&str, &str)> = self
            .inherited_namespaces
            .iter()
            .copied()
            .filter(|&(key, _)| !declared_here(key))
            .collect();

        let unprefixed = !root.name.contains(':');
        let has_default = declared_here("xmlns") || extra.iter().any(|(k, _)| *k == "xmlns");
        if ensure_svg_namespace && unprefixed && !has_default {
            extra.push(("xmlns", SVG_NAMESPACE));
        }

        let mut out = String::new();
        root.write_markup(&mut out, &extra);
        out
    }
}

/// A rendered page, ready for a display surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDescriptor {
    /// Position in the page sequence (0-indexed)
    index: usize,

    /// Display width in layout units
    width: f64,

    /// Display height in layout units
    height: f64,

    /// Base64 of the page's standalone SVG markup
    encoded_content: String,

    /// Non-fatal issue found while laying out the page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    warning: Option<String>,
}

impl PageDescriptor {
    /// Create a page descriptor.
    pub fn new(
        index: usize,
        width: f64,
        height: f64,
        encoded_content: String,
        warning: Option<String>,
    ) -> Self {
        Self {
            index,
            width,
            height,
            encoded_content,
            warning,
        }
    }

    /// Position in the page sequence (0-indexed).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Page number as shown to users (1-indexed).
    pub fn number(&self) -> usize {
        self.index + 1
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Get page dimensions as (width, height) tuple.
    pub fn dimensions(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Check if the page is in landscape orientation.
    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }

    /// Base64 of the standalone SVG markup.
    pub fn encoded_content(&self) -> &str {
        &self.encoded_content
    }

    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    /// `data:` URI usable directly as an image source.
    pub fn data_uri(&self) -> String {
        format!("data:image/svg+xml;base64,{}", self.encoded_content)
    }

    /// Decode the embedded markup back to text.
    pub fn decoded_markup(&self) -> crate::Result<String> {
        let bytes = BASE64
            .decode(&self.encoded_content)
            .map_err(|e| crate::Error::Encoding(e.to_string()))?;
        Ok(String::from_utf8(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standalone_markup_copies_inherited_namespaces() {
        let svg = Element::new("svg").with_attribute("viewBox", "0 0 10 10");
        let node = PageNode::new(
            &svg,
            vec![("xmlns", SVG_NAMESPACE), ("xmlns:xlink", "http://www.w3.org/1999/xlink")],
        );
        assert_eq!(
            node.to_standalone_markup(true),
            "<svg viewBox=\"0 0 10 10\" xmlns=\"http://www.w3.org/2000/svg\" \
             xmlns:xlink=\"http://www.w3.org/1999/xlink\" />"
        );
    }

    #[test]
    fn test_standalone_markup_respects_redeclaration() {
        let svg = Element::new("svg").with_attribute("xmlns", "urn:custom");
        let node = PageNode::new(&svg, vec![("xmlns", SVG_NAMESPACE)]);
        assert_eq!(node.to_standalone_markup(true), "<svg xmlns=\"urn:custom\" />");
    }

    #[test]
    fn test_standalone_markup_adds_svg_namespace_when_missing() {
        let svg = Element::new("svg");
        let node = PageNode::new(&svg, Vec::new());
        assert_eq!(
            node.to_standalone_markup(true),
            "<svg xmlns=\"http://www.w3.org/2000/svg\" />"
        );
        assert_eq!(node.to_standalone_markup(false), "<svg />");
    }

    #[test]
    fn test_prefixed_root_is_left_alone() {
        let svg = Element::new("s:svg");
        let node = PageNode::new(&svg, vec![("xmlns:s", SVG_NAMESPACE)]);
        assert_eq!(
            node.to_standalone_markup(true),
            "<s:svg xmlns:s=\"http://www.w3.org/2000/svg\" />"
        );
    }

    #[test]
    fn test_source_position_defaults_to_none() {
        let svg = Element::new("svg");
        assert_eq!(PageNode::new(&svg, Vec::new()).source_position(), None);
        assert_eq!(
            PageNode::new(&svg, Vec::new()).with_source_position(4).source_position(),
            Some(4)
        );
    }

    #[test]
    fn test_descriptor_accessors() {
        let page = PageDescriptor::new(2, 900.0, 450.0, BASE64.encode("<svg />"), None);
        assert_eq!(page.number(), 3);
        assert!(page.is_landscape());
        assert_eq!(page.data_uri(), format!("data:image/svg+xml;base64,{}", BASE64.encode("<svg />")));
        assert_eq!(page.decoded_markup().unwrap(), "<svg />");
    }

    #[test]
    fn test_descriptor_json_omits_missing_warning() {
        let page = PageDescriptor::new(0, 900.0, 1000.0, String::new(), None);
        let json = serde_json::to_string(&page).unwrap();
        assert!(!json.contains("warning"));
    }
}
