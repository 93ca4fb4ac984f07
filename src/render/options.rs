//! Rendering options and configuration.

/// Fixed display width of every page, in layout units.
pub const DEFAULT_PAGE_WIDTH: f64 = 900.0;

/// Page height used when no usable `viewBox` is declared.
pub const DEFAULT_PAGE_HEIGHT: f64 = 1000.0;

/// Options for laying out pages and producing output surfaces.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Display width of every page
    pub page_width: f64,

    /// Height used when the `viewBox` is missing or unusable
    pub default_page_height: f64,

    /// Add the SVG namespace to page roots that have none in scope
    pub ensure_svg_namespace: bool,

    /// Title of the HTML viewer page
    pub title: String,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page width. Ignored unless positive and finite.
    pub fn with_page_width(mut self, width: f64) -> Self {
        if width.is_finite() && width > 0.0 {
            self.page_width = width;
        }
        self
    }

    /// Set the fallback page height. Ignored unless positive and finite.
    pub fn with_default_page_height(mut self, height: f64) -> Self {
        if height.is_finite() && height > 0.0 {
            self.default_page_height = height;
        }
        self
    }

    /// Enable or disable adding the SVG namespace to bare page roots.
    pub fn with_svg_namespace(mut self, ensure: bool) -> Self {
        self.ensure_svg_namespace = ensure;
        self
    }

    /// Set the viewer title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_width: DEFAULT_PAGE_WIDTH,
            default_page_height: DEFAULT_PAGE_HEIGHT,
            ensure_svg_namespace: true,
            title: "MSVG Viewer".to_string(),
        }
    }
}
