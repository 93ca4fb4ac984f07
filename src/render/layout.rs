//! Page layout: dimensions from the `viewBox`, standalone encoded content.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::model::{PageDescriptor, PageNode};

use super::RenderOptions;

/// How a page's height was determined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageHeight {
    /// Derived from the `viewBox` aspect ratio
    FromViewBox(f64),

    /// `viewBox` present but unusable; default height, no warning
    Malformed(f64),

    /// No `viewBox` at all; default height with a warning
    Missing(f64),
}

impl PageHeight {
    pub fn value(self) -> f64 {
        match self {
            PageHeight::FromViewBox(h) | PageHeight::Malformed(h) | PageHeight::Missing(h) => h,
        }
    }
}

/// Width and height (3rd and 4th tokens) of a whitespace-separated
/// four-number `viewBox`.
///
/// Only the extent has to be numeric; the origin tokens are not inspected.
pub fn view_box_extent(view_box: &str) -> Option<(f64, f64)> {
    let parts: Vec<&str> = view_box.split_whitespace().collect();
    if parts.len() != 4 {
        return None;
    }
    let width = parts[2].parse::<f64>().ok()?;
    let height = parts[3].parse::<f64>().ok()?;
    Some((width, height))
}

/// Page height for a `viewBox` value at the configured page width.
pub fn page_height(view_box: Option<&str>, options: &RenderOptions) -> PageHeight {
    let Some(view_box) = view_box else {
        return PageHeight::Missing(options.default_page_height);
    };

    match view_box_extent(view_box) {
        Some((vb_width, vb_height)) if vb_height > 0.0 && vb_width > 0.0 => {
            let height = options.page_width * (vb_height / vb_width);
            if height.is_finite() {
                PageHeight::FromViewBox(height)
            } else {
                PageHeight::Malformed(options.default_page_height)
            }
        }
        _ => PageHeight::Malformed(options.default_page_height),
    }
}

/// Base64 of the UTF-8 bytes of `markup`.
pub fn encode_content(markup: &str) -> String {
    BASE64.encode(markup.as_bytes())
}

/// Lay out one page at position `index`.
///
/// Warnings name the page by its source `<Page>` position when known, so
/// skipped pages still count.
pub fn layout_page(index: usize, node: &PageNode<'_>, options: &RenderOptions) -> PageDescriptor {
    let number = node.source_position().unwrap_or(index) + 1;
    let height = page_height(node.view_box(), options);
    let warning = match height {
        PageHeight::Missing(_) => {
            let message = format!("No viewBox attribute found for Page {number}");
            log::warn!("{message}");
            Some(message)
        }
        PageHeight::Malformed(_) => {
            log::debug!("page {number}: unusable viewBox, using default height");
            None
        }
        PageHeight::FromViewBox(_) => None,
    };

    let markup = node.to_standalone_markup(options.ensure_svg_namespace);
    PageDescriptor::new(
        index,
        options.page_width,
        height.value(),
        encode_content(&markup),
        warning,
    )
}

/// Lay out every page, keeping input order.
pub fn render_pages(nodes: &[PageNode<'_>], options: &RenderOptions) -> Vec<PageDescriptor> {
    nodes
        .iter()
        .enumerate()
        .map(|(index, node)| layout_page(index, node, options))
        .collect()
}
