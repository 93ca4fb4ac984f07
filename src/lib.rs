//! # msvg
//!
//! Multi-page SVG (MSVG) rendering library for Rust.
//!
//! An MSVG document is a container of `<Page>` elements, each holding an
//! `<svg>` subtree. A plain single `<svg>` document is accepted as a one-page
//! document. This library turns either into an ordered list of self-contained,
//! base64-encoded pages with display dimensions, and provides a zoom
//! controller for presenting them as one continuous vertical stack.
//!
//! ## Quick Start
//!
//! ```no_run
//! use msvg::{render_file, RenderResult};
//!
//! fn main() -> msvg::Result<()> {
//!     match render_file("slides.msvg")? {
//!         RenderResult::Pages { pages } => {
//!             for page in &pages {
//!                 println!("page {}: {}x{}", page.number(), page.width(), page.height());
//!             }
//!         }
//!         RenderResult::Failure { message, .. } => eprintln!("{}", message),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Namespace-agnostic page extraction**: `Page` and `svg` are matched by local name
//! - **Self-contained pages**: inherited namespace declarations are carried into each page
//! - **Graceful failures**: malformed markup and embedded raster images become a failure result
//! - **Output surfaces**: standalone HTML viewer and JSON
//! - **Continuous zoom**: scroll-anchored zoom over the page stack
//! - **Packing**: assemble numbered `.svg` files into one `.msvg` container

pub mod detect;
pub mod error;
pub mod model;
pub mod pack;
pub mod parser;
pub mod render;
pub mod zoom;

// Re-export commonly used types
pub use detect::{detect_kind_from_path, detect_kind_from_str, is_msvg_path};
pub use error::{Error, Result};
pub use model::{Document, DocumentKind, Element, Node, PageDescriptor, PageNode};
pub use pack::{pack_directory, pack_pages, PackOptions};
pub use parser::MsvgParser;
pub use render::{FailureKind, JsonFormat, RenderOptions, RenderResult};
pub use zoom::{ZoomConfig, ZoomController, ZoomDirection, ZoomUpdate};

use std::path::Path;

/// Render markup text into pages.
///
/// Never fails: parse errors, raster content and documents without pages
/// come back as [`RenderResult::Failure`].
///
/// # Example
///
/// ```
/// let result = msvg::render(r#"<svg viewBox="0 0 200 100"></svg>"#);
/// assert_eq!(result.page_count(), 1);
/// assert_eq!(result.pages()[0].height(), 450.0);
/// ```
pub fn render(text: &str) -> RenderResult {
    render_with_options(text, &RenderOptions::default())
}

/// Render markup text with custom options.
pub fn render_with_options(text: &str, options: &RenderOptions) -> RenderResult {
    match try_render(text, options) {
        Ok(pages) => RenderResult::Pages { pages },
        Err(err) => {
            log::debug!("render failed: {}", err);
            RenderResult::from_error(&err)
        }
    }
}

/// Render UTF-8 bytes.
///
/// Invalid UTF-8 is an [`Error::Encoding`]; everything after decoding behaves
/// like [`render`].
pub fn render_bytes(data: &[u8]) -> Result<RenderResult> {
    render_bytes_with_options(data, &RenderOptions::default())
}

/// Render UTF-8 bytes with custom options.
pub fn render_bytes_with_options(data: &[u8], options: &RenderOptions) -> Result<RenderResult> {
    let text = std::str::from_utf8(data).map_err(|e| Error::Encoding(e.to_string()))?;
    Ok(render_with_options(text, options))
}

/// Read and render a file.
///
/// # Example
///
/// ```no_run
/// let result = msvg::render_file("document.msvg").unwrap();
/// println!("Pages: {}", result.page_count());
/// ```
pub fn render_file<P: AsRef<Path>>(path: P) -> Result<RenderResult> {
    render_file_with_options(path, &RenderOptions::default())
}

/// Read and render a file with custom options.
pub fn render_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &RenderOptions,
) -> Result<RenderResult> {
    let data = std::fs::read(path)?;
    render_bytes_with_options(&data, options)
}

/// Render a file as a standalone HTML viewer page.
///
/// # Example
///
/// ```no_run
/// let html = msvg::to_html("document.msvg").unwrap();
/// std::fs::write("document.html", html).unwrap();
/// ```
pub fn to_html<P: AsRef<Path>>(path: P) -> Result<String> {
    let result = render_file(path)?;
    Ok(render::to_html(
        &result,
        &RenderOptions::default(),
        &ZoomConfig::default(),
    ))
}

/// Render a file as JSON.
///
/// # Example
///
/// ```no_run
/// use msvg::{to_json, JsonFormat};
///
/// let json = to_json("document.msvg", JsonFormat::Pretty).unwrap();
/// std::fs::write("document.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let result = render_file(path)?;
    render::to_json(&result, format)
}

fn try_render(text: &str, options: &RenderOptions) -> Result<Vec<PageDescriptor>> {
    let parser = MsvgParser::from_str(text)?;
    let nodes = parser.page_nodes()?;
    Ok(render::render_pages(&nodes, options))
}

/// Builder for rendering MSVG documents.
///
/// # Example
///
/// ```no_run
/// use msvg::Msvg;
///
/// let html = Msvg::new()
///     .with_page_width(600.0)
///     .with_title("Slides")
///     .render_file("slides.msvg")?
///     .to_html();
/// # Ok::<(), msvg::Error>(())
/// ```
pub struct Msvg {
    render_options: RenderOptions,
    zoom: ZoomConfig,
}

impl Msvg {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            render_options: RenderOptions::default(),
            zoom: ZoomConfig::default(),
        }
    }

    /// Set the display width of every page.
    pub fn with_page_width(mut self, width: f64) -> Self {
        self.render_options = self.render_options.with_page_width(width);
        self
    }

    /// Set the height used when a page has no usable `viewBox`.
    pub fn with_default_page_height(mut self, height: f64) -> Self {
        self.render_options = self.render_options.with_default_page_height(height);
        self
    }

    /// Enable or disable adding the SVG namespace to bare page roots.
    pub fn with_svg_namespace(mut self, ensure: bool) -> Self {
        self.render_options = self.render_options.with_svg_namespace(ensure);
        self
    }

    /// Set the viewer title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_title(title);
        self
    }

    /// Set zoom settings used by the HTML viewer and [`MsvgResult::zoom_controller`].
    pub fn with_zoom(mut self, zoom: ZoomConfig) -> Self {
        self.zoom = zoom;
        self
    }

    /// Render markup text.
    pub fn render(self, text: &str) -> MsvgResult {
        let result = render_with_options(text, &self.render_options);
        MsvgResult {
            result,
            render_options: self.render_options,
            zoom: self.zoom,
        }
    }

    /// Render UTF-8 bytes.
    pub fn render_bytes(self, data: &[u8]) -> Result<MsvgResult> {
        let result = render_bytes_with_options(data, &self.render_options)?;
        Ok(MsvgResult {
            result,
            render_options: self.render_options,
            zoom: self.zoom,
        })
    }

    /// Read and render a file.
    pub fn render_file<P: AsRef<Path>>(self, path: P) -> Result<MsvgResult> {
        let data = std::fs::read(path)?;
        self.render_bytes(&data)
    }
}

impl Default for Msvg {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of rendering with [`Msvg`].
pub struct MsvgResult {
    result: RenderResult,
    render_options: RenderOptions,
    zoom: ZoomConfig,
}

impl MsvgResult {
    /// The render result.
    pub fn result(&self) -> &RenderResult {
        &self.result
    }

    /// Take the render result.
    pub fn into_result(self) -> RenderResult {
        self.result
    }

    /// Standalone HTML viewer page.
    pub fn to_html(&self) -> String {
        render::to_html(&self.result, &self.render_options, &self.zoom)
    }

    /// JSON of the render result.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.result, format)
    }

    /// A zoom controller for the rendered page stack.
    pub fn zoom_controller(&self) -> ZoomController {
        ZoomController::for_pages(self.result.pages(), self.zoom)
    }
}
