//! Rendering module: page layout and output surfaces.

mod html;
mod json;
mod layout;
mod options;
mod result;

pub use html::{landing_page, to_html};
pub use json::{to_json, JsonFormat};
pub use layout::{encode_content, layout_page, page_height, render_pages, view_box_extent, PageHeight};
pub use options::{RenderOptions, DEFAULT_PAGE_HEIGHT, DEFAULT_PAGE_WIDTH};
pub use result::{FailureKind, RenderResult};
