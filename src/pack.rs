//! Pack numbered SVG files into one MSVG container.
//!
//! Files are ordered by the first run of decimal digits in their name
//! (`slide2.svg` before `slide10.svg`; names without digits count as 0).
//! Ties keep directory-listing order by name. XML declarations are removed
//! from each page since only one may appear, at the very start of a document.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};

/// Options for packing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackOptions {
    /// Extension of input files, without the dot. Matched case-sensitively.
    pub extension: String,

    /// Value of the container's `version` attribute
    pub version: String,
}

impl PackOptions {
    /// Create new pack options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the input file extension. A leading dot is ignored.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Set the container version attribute.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    fn accepts(&self, name: &str) -> bool {
        Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.extension)
    }
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            extension: "svg".to_string(),
            version: "1.0".to_string(),
        }
    }
}

/// Outcome of packing a directory.
#[derive(Debug, Clone, Default)]
pub struct Packed {
    /// The MSVG container text
    pub content: String,

    /// Names of packed files, in page order
    pub pages: Vec<String>,

    /// Matching files that could not be read
    pub skipped: Vec<PathBuf>,
}

impl Packed {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Sort key for a file name: its first run of ASCII digits, or 0.
pub fn page_number(name: &str) -> u64 {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    let re = DIGITS.get_or_init(|| Regex::new(r"[0-9]+").expect("valid regex"));
    re.find(name)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Remove every XML declaration, with the whitespace that follows it.
pub fn strip_xml_header(svg: &str) -> Cow<'_, str> {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    let re = HEADER.get_or_init(|| Regex::new(r"(?i)<\?xml[^>]*\?>\s*").expect("valid regex"));
    re.replace_all(svg, "")
}

/// Pack `(file name, svg text)` pairs into an MSVG container.
///
/// Only names with the configured extension are kept. The output layout,
/// including CRLF line endings, is fixed.
pub fn pack_pages<I, N, S>(files: I, options: &PackOptions) -> String
where
    I: IntoIterator<Item = (N, S)>,
    N: AsRef<str>,
    S: AsRef<str>,
{
    let mut pages: Vec<(N, S)> = files
        .into_iter()
        .filter(|(name, _)| options.accepts(name.as_ref()))
        .collect();
    pages.sort_by_key(|(name, _)| page_number(name.as_ref()));

    let mut out = format!(
        "<MSVG version=\"{}\">\r\n\r\n<pageSet>\r\n",
        quick_xml::escape::escape(options.version.as_str())
    );
    for (_, svg) in &pages {
        out.push_str("\r\n<Page>\r\n\r\n");
        out.push_str(&strip_xml_header(svg.as_ref()));
        out.push_str("\r\n\r\n</Page>\r\n");
    }
    out.push_str("\r\n</pageSet>\r\n\r\n</MSVG>\r\n");
    out
}

/// Pack every matching file in `dir`.
///
/// Subdirectories are ignored. Files that cannot be read as UTF-8 text are
/// skipped with a warning.
pub fn pack_directory<P: AsRef<Path>>(dir: P, options: &PackOptions) -> Result<Packed> {
    let dir = dir.as_ref();
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| options.accepts(n))
        })
        .collect();
    entries.sort();

    let mut files = Vec::with_capacity(entries.len());
    let mut skipped = Vec::new();
    for path in entries {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        match fs::read_to_string(&path) {
            Ok(text) => files.push((name, text)),
            Err(err) => {
                log::warn!("Failed to read {}: {}", path.display(), err);
                skipped.push(path);
            }
        }
    }

    let content = pack_pages(files.iter().map(|(n, t)| (n.as_str(), t.as_str())), options);
    let mut names: Vec<String> = files.into_iter().map(|(n, _)| n).collect();
    names.sort_by_key(|n| page_number(n));

    log::debug!("packed {} page(s) from {}", names.len(), dir.display());
    Ok(Packed {
        content,
        pages: names,
        skipped,
    })
}

/// Pack `dir` and write the container to `output`.
pub fn pack_to_file<P: AsRef<Path>, Q: AsRef<Path>>(
    dir: P,
    output: Q,
    options: &PackOptions,
) -> Result<Packed> {
    let packed = pack_directory(dir, options)?;
    if packed.pages.is_empty() {
        return Err(Error::Other(format!(
            "No .{} files found to pack",
            options.extension
        )));
    }
    fs::write(output, &packed.content)?;
    Ok(packed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_number() {
        assert_eq!(page_number("page12.svg"), 12);
        assert_eq!(page_number("a3b45.svg"), 3);
        assert_eq!(page_number("cover.svg"), 0);
        assert_eq!(page_number("007.svg"), 7);
    }

    #[test]
    fn test_page_number_ignores_non_ascii_digits() {
        assert_eq!(page_number("\u{663}slide5.svg"), 5);
        assert_eq!(page_number("\u{663}\u{664}.svg"), 0);
    }

    #[test]
    fn test_strip_xml_header() {
        let svg = "<?XML version=\"1.0\" encoding=\"UTF-8\"?>\r\n  <svg/>";
        assert_eq!(strip_xml_header(svg), "<svg/>");
        assert_eq!(strip_xml_header("<svg/>"), "<svg/>");
    }

    #[test]
    fn test_pack_pages_exact_layout() {
        let packed = pack_pages([("p1.svg", "<svg id=\"a\"/>")], &PackOptions::default());
        assert_eq!(
            packed,
            "<MSVG version=\"1.0\">\r\n\r\n<pageSet>\r\n\
             \r\n<Page>\r\n\r\n<svg id=\"a\"/>\r\n\r\n</Page>\r\n\
             \r\n</pageSet>\r\n\r\n</MSVG>\r\n"
        );
    }

    #[test]
    fn test_pack_pages_orders_numerically_and_filters() {
        let packed = pack_pages(
            [
                ("slide10.svg", "<svg id=\"ten\"/>"),
                ("notes.txt", "ignored"),
                ("slide2.svg", "<svg id=\"two\"/>"),
                ("cover.svg", "<svg id=\"cover\"/>"),
                ("upper.SVG", "<svg id=\"upper\"/>"),
            ],
            &PackOptions::default(),
        );
        let cover = packed.find("cover").unwrap();
        let two = packed.find("\"two\"").unwrap();
        let ten = packed.find("\"ten\"").unwrap();
        assert!(cover < two && two < ten);
        assert!(!packed.contains("ignored"));
        assert!(!packed.contains("upper"));
    }

    #[test]
    fn test_pack_pages_ties_keep_input_order() {
        let packed = pack_pages(
            [("b.svg", "<svg id=\"b\"/>"), ("a.svg", "<svg id=\"a\"/>")],
            &PackOptions::default(),
        );
        assert!(packed.find("\"b\"").unwrap() < packed.find("\"a\"").unwrap());
    }

    #[test]
    fn test_pack_options_extension() {
        let options = PackOptions::new().with_extension(".xml").with_version("2.0");
        assert_eq!(options.extension, "xml");
        let packed = pack_pages([("1.xml", "<svg/>"), ("2.svg", "<svg/>")], &options);
        assert!(packed.starts_with("<MSVG version=\"2.0\">"));
        assert_eq!(packed.matches("<Page>").count(), 1);
    }
}
