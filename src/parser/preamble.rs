//! Text-level removal of non-semantic preamble directives.

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

fn xml_declaration() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<\?xml\s.*?\?>").expect("XML declaration pattern is valid"))
}

fn doctype_declaration() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<!DOCTYPE.*?>").expect("DOCTYPE pattern is valid"))
}

/// Remove XML declarations, DOCTYPE declarations and a leading byte-order mark.
///
/// Every `<?xml …?>` declaration is removed, not only the first, so documents
/// assembled by concatenating standalone SVG files still parse. Processing
/// instructions such as `<?xml-stylesheet …?>` are left for the parser.
pub fn strip_preamble(text: &str) -> Cow<'_, str> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    match xml_declaration().replace_all(text, "") {
        Cow::Borrowed(unchanged) => doctype_declaration().replace_all(unchanged, ""),
        Cow::Owned(stripped) => {
            Cow::Owned(doctype_declaration().replace_all(&stripped, "").into_owned())
        }
    }
}
