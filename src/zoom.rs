//! Continuous zoom over a vertical stack of pages.
//!
//! The stack is laid out once at scale 1.0. Zooming never re-lays out pages;
//! it applies one uniform scale anchored at the top centre of the stack, so
//! page gaps and padding grow and shrink with the pages. After every zoom
//! action the scroll offset is re-derived so that the content under the
//! vertical centre of the viewport stays put.

use crate::model::PageDescriptor;

/// Zoom and stack-layout settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomConfig {
    /// Scale when a document is loaded
    pub initial_scale: f64,

    /// Lower scale bound
    pub min_scale: f64,

    /// Upper scale bound
    pub max_scale: f64,

    /// Scale change per zoom action or wheel tick
    pub step: f64,

    /// Vertical gap between consecutive pages, at scale 1.0
    pub page_gap: f64,

    /// Padding above the first and below the last page, at scale 1.0
    pub padding: f64,
}

impl ZoomConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set scale bounds. Ignored unless both are positive, finite and ordered.
    pub fn with_bounds(mut self, min_scale: f64, max_scale: f64) -> Self {
        if min_scale.is_finite() && max_scale.is_finite() && min_scale > 0.0 && min_scale <= max_scale {
            self.min_scale = min_scale;
            self.max_scale = max_scale;
            self.initial_scale = self.initial_scale.clamp(min_scale, max_scale);
        }
        self
    }

    /// Set the per-action step. Ignored unless positive and finite.
    pub fn with_step(mut self, step: f64) -> Self {
        if step.is_finite() && step > 0.0 {
            self.step = step;
        }
        self
    }

    /// Set the initial scale, clamped into the bounds.
    pub fn with_initial_scale(mut self, scale: f64) -> Self {
        if scale.is_finite() {
            self.initial_scale = scale.clamp(self.min_scale, self.max_scale);
        }
        self
    }

    /// Set the gap between pages.
    pub fn with_page_gap(mut self, gap: f64) -> Self {
        if gap.is_finite() && gap >= 0.0 {
            self.page_gap = gap;
        }
        self
    }

    /// Set the outer padding.
    pub fn with_padding(mut self, padding: f64) -> Self {
        if padding.is_finite() && padding >= 0.0 {
            self.padding = padding;
        }
        self
    }
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            initial_scale: 1.0,
            min_scale: 0.2,
            max_scale: 3.0,
            step: 0.01,
            page_gap: 40.0,
            padding: 20.0,
        }
    }
}

/// Direction of a discrete zoom action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Height of the page stack at scale 1.0: page heights, the gaps between
/// them and padding at both ends.
pub fn compute_total_height<I>(heights: I, config: &ZoomConfig) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (count, sum) = heights
        .into_iter()
        .fold((0usize, 0.0), |(count, sum), height| (count + 1, sum + height));
    let gaps = count.saturating_sub(1) as f64 * config.page_gap;
    sum + gaps + 2.0 * config.padding
}

/// Outcome of one zoom action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomUpdate {
    /// Scale before the action
    pub previous_scale: f64,

    /// Scale after the action
    pub scale: f64,

    /// Scroll offset that keeps the viewport centre fixed, before any clamping
    pub requested_scroll_top: f64,

    /// Scroll offset after clamping to the scrollable range
    pub scroll_offset: f64,
}

impl ZoomUpdate {
    /// Whether the scale changed (false when already at a bound).
    pub fn changed(&self) -> bool {
        self.scale != self.previous_scale
    }
}

/// Zoom state for one loaded document.
#[derive(Debug, Clone)]
pub struct ZoomController {
    config: ZoomConfig,
    scale: f64,
    scroll_offset: f64,
    original_total_height: f64,
}

impl ZoomController {
    /// Create a controller for a stack of the given unscaled height.
    pub fn new(original_total_height: f64, config: ZoomConfig) -> Self {
        Self {
            config,
            scale: config.initial_scale,
            scroll_offset: 0.0,
            original_total_height: original_total_height.max(0.0),
        }
    }

    /// Create a controller for rendered pages.
    pub fn for_pages(pages: &[PageDescriptor], config: ZoomConfig) -> Self {
        let total = compute_total_height(pages.iter().map(PageDescriptor::height), &config);
        Self::new(total, config)
    }

    /// Start over with a newly loaded document.
    pub fn load(&mut self, pages: &[PageDescriptor]) {
        *self = Self::for_pages(pages, self.config);
    }

    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Stack height at scale 1.0, fixed for the lifetime of the document.
    pub fn original_total_height(&self) -> f64 {
        self.original_total_height
    }

    /// Stack height as currently displayed.
    pub fn visual_height(&self) -> f64 {
        self.original_total_height * self.scale
    }

    /// CSS transform for the stack container.
    pub fn css_transform(&self) -> String {
        format!("scale({})", self.scale)
    }

    /// Record a scroll made by the user, clamped to the scrollable range.
    pub fn set_scroll_offset(&mut self, offset: f64, viewport_height: f64) {
        self.scroll_offset = self.clamp_scroll(offset, viewport_height);
    }

    /// Fraction of the stack that sits under the vertical centre of the viewport.
    pub fn relative_center(&self, viewport_height: f64) -> f64 {
        relative_center(
            self.scroll_offset,
            viewport_height,
            self.original_total_height,
            self.scale,
        )
    }

    /// Apply one zoom step, keeping the viewport centre on the same content.
    ///
    /// Bound checks use the current scale: a step is taken only while strictly
    /// inside the bound, and the result is clamped to it.
    pub fn zoom(&mut self, direction: ZoomDirection, viewport_height: f64) -> ZoomUpdate {
        let viewport_height = viewport_height.max(0.0);
        let previous_scale = self.scale;
        let center = self.relative_center(viewport_height);

        match direction {
            ZoomDirection::In if self.scale < self.config.max_scale => {
                self.scale = (self.scale + self.config.step).min(self.config.max_scale);
            }
            ZoomDirection::Out if self.scale > self.config.min_scale => {
                self.scale = (self.scale - self.config.step).max(self.config.min_scale);
            }
            _ => {}
        }

        let requested_scroll_top =
            self.original_total_height * self.scale * center - viewport_height / 2.0;
        self.scroll_offset = self.clamp_scroll(requested_scroll_top, viewport_height);

        ZoomUpdate {
            previous_scale,
            scale: self.scale,
            requested_scroll_top,
            scroll_offset: self.scroll_offset,
        }
    }

    pub fn zoom_in(&mut self, viewport_height: f64) -> ZoomUpdate {
        self.zoom(ZoomDirection::In, viewport_height)
    }

    pub fn zoom_out(&mut self, viewport_height: f64) -> ZoomUpdate {
        self.zoom(ZoomDirection::Out, viewport_height)
    }

    /// Handle a wheel tick. Zooms only while the modifier key is held; a
    /// positive delta (scrolling down) zooms out.
    pub fn wheel(
        &mut self,
        delta_y: f64,
        modifier_held: bool,
        viewport_height: f64,
    ) -> Option<ZoomUpdate> {
        if !modifier_held {
            return None;
        }
        let direction = if delta_y > 0.0 {
            ZoomDirection::Out
        } else {
            ZoomDirection::In
        };
        Some(self.zoom(direction, viewport_height))
    }

    fn clamp_scroll(&self, offset: f64, viewport_height: f64) -> f64 {
        let max_scroll = (self.visual_height() - viewport_height).max(0.0);
        if offset.is_nan() {
            return 0.0;
        }
        offset.clamp(0.0, max_scroll)
    }
}

/// `(scroll_top + viewport_height / 2) / (total_height * scale)`, or 0 for an
/// empty stack.
pub fn relative_center(scroll_top: f64, viewport_height: f64, total_height: f64, scale: f64) -> f64 {
    let scaled = total_height * scale;
    if scaled <= 0.0 {
        return 0.0;
    }
    (scroll_top + viewport_height / 2.0) / scaled
}
