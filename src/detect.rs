//! MSVG format detection.
//!
//! Classifies a document by its root element without building the tree.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{Error, Result};
use crate::model::{local_name, DocumentKind};

/// File extensions handled by this crate, lowercase without the dot.
pub const EXTENSIONS: &[&str] = &["msvg", "svg"];

/// Detect the document kind from markup text.
///
/// An `svg` root means a single page; any other root is treated as a
/// multi-page container. A `svg` root that wraps `Page` elements is still
/// reported as single-page here; [`Document::kind`](crate::model::Document::kind)
/// gives the exact answer after a full parse.
///
/// # Example
/// ```
/// use msvg::detect::detect_kind_from_str;
/// use msvg::DocumentKind;
///
/// let kind = detect_kind_from_str("<?xml version=\"1.0\"?><MSVG/>").unwrap();
/// assert_eq!(kind, DocumentKind::MultiPage);
/// ```
pub fn detect_kind_from_str(text: &str) -> Result<DocumentKind> {
    let mut reader = Reader::from_str(text.trim_start_matches('\u{feff}'));
    loop {
        match reader.read_event()? {
            Event::Start(start) | Event::Empty(start) => {
                return Ok(kind_for_root(start.name().as_ref()));
            }
            Event::Text(text) if !text.iter().all(u8::is_ascii_whitespace) => {
                return Err(Error::Parse("text before the document element".to_string()));
            }
            Event::Eof => return Err(Error::Parse("no element found".to_string())),
            _ => {}
        }
    }
}

/// Detect the document kind from a file, reading only up to the root element.
pub fn detect_kind_from_path<P: AsRef<Path>>(path: P) -> Result<DocumentKind> {
    let file = File::open(path)?;
    let mut reader = Reader::from_reader(BufReader::new(file));
    let mut buf = Vec::new();
    let mut first = true;
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(start) | Event::Empty(start) => {
                return Ok(kind_for_root(start.name().as_ref()));
            }
            Event::Text(text) => {
                let bytes: &[u8] = &text;
                let bytes = if first {
                    bytes.strip_prefix(b"\xef\xbb\xbf".as_slice()).unwrap_or(bytes)
                } else {
                    bytes
                };
                if !bytes.iter().all(u8::is_ascii_whitespace) {
                    return Err(Error::Parse("text before the document element".to_string()));
                }
            }
            Event::Eof => return Err(Error::Parse("no element found".to_string())),
            _ => {}
        }
        first = false;
        buf.clear();
    }
}

/// Check whether a path has an extension this crate handles.
pub fn is_msvg_path<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}

/// Check whether a file can be sniffed as an MSVG or SVG document.
pub fn is_msvg<P: AsRef<Path>>(path: P) -> bool {
    detect_kind_from_path(path).is_ok()
}

fn kind_for_root(name: &[u8]) -> DocumentKind {
    let name = String::from_utf8_lossy(name);
    if local_name(&name) == "svg" {
        DocumentKind::SinglePage
    } else {
        DocumentKind::MultiPage
    }
}
