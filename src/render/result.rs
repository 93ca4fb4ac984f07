//! Outcome of rendering a document: ordered pages or a single failure.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::model::PageDescriptor;

/// Why a render produced no pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Markup is not well-formed
    ParseError,
    /// Document embeds raster image data
    UnsupportedRasterContent,
    /// No page could be resolved to a graphics root
    NoRenderableContent,
    /// Any other error (I/O, encoding)
    Unexpected,
}

impl FailureKind {
    /// Heading shown above the failure message.
    pub fn title(self) -> &'static str {
        match self {
            FailureKind::ParseError => "Error parsing file:",
            FailureKind::UnsupportedRasterContent => "Rendering Error:",
            FailureKind::NoRenderableContent => "Nothing to display:",
            FailureKind::Unexpected => "An unexpected error occurred:",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::ParseError => "parse error",
            FailureKind::UnsupportedRasterContent => "unsupported raster content",
            FailureKind::NoRenderableContent => "no renderable content",
            FailureKind::Unexpected => "unexpected error",
        };
        f.write_str(name)
    }
}

/// Result of rendering a document.
///
/// Either every renderable page in order, or one failure. Never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderResult {
    Pages {
        pages: Vec<PageDescriptor>,
    },
    Failure {
        #[serde(rename = "failure")]
        kind: FailureKind,
        message: String,
    },
}

impl RenderResult {
    /// Build a failure result from an error.
    pub fn from_error(err: &Error) -> Self {
        RenderResult::Failure {
            kind: err.failure_kind().unwrap_or(FailureKind::Unexpected),
            message: err.to_string(),
        }
    }

    /// Rendered pages; empty for a failure.
    pub fn pages(&self) -> &[PageDescriptor] {
        match self {
            RenderResult::Pages { pages } => pages,
            RenderResult::Failure { .. } => &[],
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages().len()
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, RenderResult::Failure { .. })
    }

    /// Failure kind, if this is a failure.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            RenderResult::Failure { kind, .. } => Some(*kind),
            RenderResult::Pages { .. } => None,
        }
    }

    /// Failure message, if this is a failure.
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            RenderResult::Failure { message, .. } => Some(message),
            RenderResult::Pages { .. } => None,
        }
    }

    /// Per-page warnings in page order.
    pub fn warnings(&self) -> Vec<&str> {
        self.pages().iter().filter_map(PageDescriptor::warning).collect()
    }
}

impl From<Vec<PageDescriptor>> for RenderResult {
    fn from(pages: Vec<PageDescriptor>) -> Self {
        RenderResult::Pages { pages }
    }
}

impl From<Error> for RenderResult {
    fn from(err: Error) -> Self {
        RenderResult::from_error(&err)
    }
}
