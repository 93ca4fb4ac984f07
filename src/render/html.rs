//! Standalone HTML viewer for render results.
//!
//! Pages are stacked vertically inside a zoom container. The embedded script
//! zooms the container with a CSS transform and re-derives the scroll offset
//! the same way [`ZoomController`](crate::zoom::ZoomController) does.

use std::fmt::Write as _;

use quick_xml::escape::escape;

use crate::model::PageDescriptor;
use crate::zoom::{compute_total_height, ZoomConfig};

use super::{RenderOptions, RenderResult};

/// Render a result as a complete viewer page.
pub fn to_html(result: &RenderResult, options: &RenderOptions, zoom: &ZoomConfig) -> String {
    let (body, total_height) = match result {
        RenderResult::Pages { pages } => (
            pages_html(pages),
            compute_total_height(pages.iter().map(PageDescriptor::height), zoom),
        ),
        RenderResult::Failure { kind, message } => (
            format!("<h1>{}</h1><p>{}</p>", kind.title(), escape(message.as_str())),
            0.0,
        ),
    };

    VIEWER_TEMPLATE
        .replace("__TITLE__", &escape(options.title.as_str()))
        .replace("__PAGE_GAP__", &zoom.page_gap.to_string())
        .replace("__PADDING__", &zoom.padding.to_string())
        .replace("__INITIAL_ZOOM__", &zoom.initial_scale.to_string())
        .replace("__ZOOM_STEP__", &zoom.step.to_string())
        .replace("__MIN_ZOOM__", &zoom.min_scale.to_string())
        .replace("__MAX_ZOOM__", &zoom.max_scale.to_string())
        .replace("__TOTAL_HEIGHT__", &total_height.to_string())
        .replace("__PAGES__", &body)
}

/// Page shown before any document is loaded.
pub fn landing_page(title: &str) -> String {
    LANDING_TEMPLATE.replace("__TITLE__", &escape(title))
}

fn pages_html(pages: &[PageDescriptor]) -> String {
    let mut out = String::new();
    for page in pages {
        let _ = write!(
            out,
            "<div class=\"page-frame\" data-page=\"{}\" style=\"width: {}px; height: {}px;\">\
             <img src=\"{}\" alt=\"Page {}\" style=\"width:100%; height:100%; object-fit:contain;\"></div>\n",
            page.number(),
            page.width(),
            page.height(),
            page.data_uri(),
            page.number(),
        );
        if let Some(warning) = page.warning() {
            let _ = writeln!(
                out,
                "<div class=\"warning-message\">Warning: {}.</div>",
                escape(warning)
            );
        }
    }
    out
}

const LANDING_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <title>__TITLE__</title>
  <style>
    body {
      margin: 0;
      font-family: sans-serif;
      background: #f0f0f0;
      display: flex;
      flex-direction: column;
      height: 100vh;
      overflow: hidden;
      align-items: center;
      justify-content: center;
      text-align: center;
    }
    h1 { font-size: 2.5rem; }
    p { font-size: 1.2rem; margin-top: 10px; color: #555; }
  </style>
</head>
<body>
  <h1>__TITLE__</h1>
  <p>Open an .msvg or .svg file to view it.</p>
</body>
</html>
"#;

const VIEWER_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <title>__TITLE__</title>
  <style>
    body {
      margin: 0;
      font-family: sans-serif;
      background: #f0f0f0;
      display: flex;
      flex-direction: column;
      height: 100vh;
    }
    #toolbar {
      padding: 10px;
      background: #ddd;
      display: flex;
      align-items: center;
      gap: 10px;
      flex-shrink: 0;
    }
    #scrollArea {
      flex-grow: 1;
      overflow-y: auto;
    }
    #zoomContainer {
      display: flex;
      flex-direction: column;
      align-items: center;
      padding: __PADDING__px;
      gap: __PAGE_GAP__px;
      transform-origin: top center;
    }
    .page-frame {
      border: 1px solid #ccc;
      background: white;
      display: block;
      box-shadow: 0 0 5px rgba(0, 0, 0, 0.1);
      border-bottom: 2px solid #aaa;
    }
    .warning-message {
      color: orange;
      font-weight: bold;
      margin-top: 5px;
      text-align: center;
    }
  </style>
</head>
<body>
  <div id="toolbar">
    <h1>__TITLE__</h1>
    <button id="zoomOutBtn">-</button>
    <button id="zoomInBtn">+</button>
  </div>
  <div id="scrollArea">
    <div id="zoomContainer">
__PAGES__
    </div>
  </div>
  <script>
    const originalTotalHeight = __TOTAL_HEIGHT__;
    const zoomStep = __ZOOM_STEP__;
    const minZoom = __MIN_ZOOM__;
    const maxZoom = __MAX_ZOOM__;
    let currentZoom = __INITIAL_ZOOM__;

    const zoomContainer = document.getElementById('zoomContainer');
    const scrollArea = document.getElementById('scrollArea');

    function updateLayout() {
      zoomContainer.style.height = `${originalTotalHeight * currentZoom}px`;
      zoomContainer.style.transform = `scale(${currentZoom})`;
    }

    function handleZoom(direction) {
      const viewportHeight = scrollArea.clientHeight;
      const scaled = originalTotalHeight * currentZoom;
      const center = scaled > 0 ? (scrollArea.scrollTop + viewportHeight / 2) / scaled : 0;

      if (direction === 'in' && currentZoom < maxZoom) {
        currentZoom = Math.min(currentZoom + zoomStep, maxZoom);
      } else if (direction === 'out' && currentZoom > minZoom) {
        currentZoom = Math.max(currentZoom - zoomStep, minZoom);
      }

      updateLayout();
      scrollArea.scrollTop = originalTotalHeight * currentZoom * center - viewportHeight / 2;
    }

    document.addEventListener('DOMContentLoaded', updateLayout);
    document.getElementById('zoomInBtn').addEventListener('click', () => handleZoom('in'));
    document.getElementById('zoomOutBtn').addEventListener('click', () => handleZoom('out'));

    scrollArea.addEventListener('wheel', (event) => {
      if (event.ctrlKey) {
        event.preventDefault();
        handleZoom(event.deltaY > 0 ? 'out' : 'in');
      }
    }, { passive: false });
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn options() -> RenderOptions {
        RenderOptions::default()
    }

    #[test]
    fn test_pages_become_frames_in_order() {
        let result: RenderResult = vec![
            PageDescriptor::new(0, 900.0, 450.0, "QQ==".to_string(), None),
            PageDescriptor::new(
                1,
                900.0,
                1000.0,
                "Qg==".to_string(),
                Some("No viewBox attribute found for Page 2".to_string()),
            ),
        ]
        .into();

        let html = to_html(&result, &options(), &ZoomConfig::default());
        let first = html.find("data:image/svg+xml;base64,QQ==").unwrap();
        let second = html.find("data:image/svg+xml;base64,Qg==").unwrap();
        assert!(first < second);
        assert!(html.contains("style=\"width: 900px; height: 450px;\""));
        assert!(html.contains(
            "<div class=\"warning-message\">Warning: No viewBox attribute found for Page 2.</div>"
        ));
        assert_eq!(html.matches("class=\"page-frame\"").count(), 2);
        assert!(html.contains("const originalTotalHeight = 1530;"));
    }

    #[test]
    fn test_failure_message_is_escaped() {
        let result = RenderResult::from_error(&Error::NoRenderableContent);
        let html = to_html(&result, &options(), &ZoomConfig::default());
        assert!(html.contains("<h1>Nothing to display:</h1>"));
        assert!(html.contains("valid &lt;svg&gt; or &lt;Page&gt; tags."));
        assert!(!html.contains("class=\"page-frame\""));
    }

    #[test]
    fn test_zoom_constants_are_injected() {
        let zoom = ZoomConfig::default().with_step(0.05).with_page_gap(10.0);
        let html = to_html(&RenderResult::from(Vec::new()), &options(), &zoom);
        assert!(html.contains("const zoomStep = 0.05;"));
        assert!(html.contains("const minZoom = 0.2;"));
        assert!(html.contains("const maxZoom = 3;"));
        assert!(html.contains("gap: 10px;"));
        assert!(!html.contains("__"));
    }

    #[test]
    fn test_landing_page_title() {
        let html = landing_page("My <Viewer>");
        assert!(html.contains("<title>My &lt;Viewer&gt;</title>"));
    }
}
