//! Error types for the msvg library.

use std::io;
use thiserror::Error;

use crate::render::FailureKind;

/// Result type alias for msvg operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while turning a document into pages.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The markup is not well-formed. Carries the underlying diagnostic.
    #[error("The file is not a valid XML/SVG document. Error: {0}")]
    Parse(String),

    /// The document embeds a raster image, which cannot be displayed.
    #[error(
        "This MSVG file contains an embedded raster image (like a JPG or PNG), which this viewer cannot render. Only vector graphics (paths and shapes) are supported."
    )]
    UnsupportedRasterContent,

    /// The document is well-formed but has no page that can be shown.
    #[error(
        "Could not find any renderable content in the file. Please ensure the file contains valid <svg> or <Page> tags."
    )]
    NoRenderableContent,

    /// Input bytes are not valid UTF-8.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Error while producing an output surface (HTML, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// The failure kind reported to a display surface, for errors that abort a render.
    ///
    /// Ambient errors (I/O, encoding) return `None`; the host reports those itself.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Error::Parse(_) => Some(FailureKind::ParseError),
            Error::UnsupportedRasterContent => Some(FailureKind::UnsupportedRasterContent),
            Error::NoRenderableContent => Some(FailureKind::NoRenderableContent),
            _ => None,
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Parse(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Error::Encoding(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Parse("unexpected end".to_string());
        assert_eq!(
            err.to_string(),
            "The file is not a valid XML/SVG document. Error: unexpected end"
        );

        let err = Error::NoRenderableContent;
        assert!(err.to_string().contains("<svg> or <Page>"));
    }

    #[test]
    fn test_failure_kind_mapping() {
        assert_eq!(
            Error::Parse("x".into()).failure_kind(),
            Some(FailureKind::ParseError)
        );
        assert_eq!(
            Error::UnsupportedRasterContent.failure_kind(),
            Some(FailureKind::UnsupportedRasterContent)
        );
        assert_eq!(
            Error::NoRenderableContent.failure_kind(),
            Some(FailureKind::NoRenderableContent)
        );
        assert_eq!(Error::Other("x".into()).failure_kind(), None);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.failure_kind(), None);
    }
}
