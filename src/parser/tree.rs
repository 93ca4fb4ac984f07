//! Builds the generic markup tree from text using quick-xml.

use std::fmt::Display;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Error, Result};
use crate::model::{Element, Node};

/// Deepest element nesting accepted. Everything downstream walks the tree
/// recursively, so deeper input is rejected as malformed.
pub const MAX_DEPTH: usize = 1024;

/// Parse markup into a tree rooted at the single document element.
///
/// Fails on the first structural problem, including nesting deeper than
/// [`MAX_DEPTH`]. Comments, processing instructions
/// and stray declarations are dropped; CDATA sections become text.
pub fn parse_tree(text: &str) -> Result<Element> {
    let mut reader = Reader::from_str(text);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(err) => return Err(positioned(err, reader.buffer_position())),
        };

        match event {
            Event::Start(start) => {
                if root.is_some() {
                    return Err(positioned(
                        "junk after document element",
                        reader.buffer_position(),
                    ));
                }
                if stack.len() >= MAX_DEPTH {
                    return Err(positioned(
                        format!("element nesting exceeds {MAX_DEPTH} levels"),
                        reader.buffer_position(),
                    ));
                }
                let el = start_element(&start).map_err(|e| positioned(e, reader.buffer_position()))?;
                stack.push(el);
            }
            Event::Empty(start) => {
                let el = start_element(&start).map_err(|e| positioned(e, reader.buffer_position()))?;
                attach(&mut stack, &mut root, el).map_err(|e| positioned(e, reader.buffer_position()))?;
            }
            Event::End(end) => {
                let Some(el) = stack.pop() else {
                    return Err(positioned(
                        format!(
                            "unexpected closing tag `{}`",
                            String::from_utf8_lossy(end.name().as_ref())
                        ),
                        reader.buffer_position(),
                    ));
                };
                attach(&mut stack, &mut root, el).map_err(|e| positioned(e, reader.buffer_position()))?;
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| positioned(e, reader.buffer_position()))?;
                push_text(&mut stack, &text).map_err(|e| positioned(e, reader.buffer_position()))?;
            }
            Event::CData(data) => {
                let bytes = data.into_inner();
                let text = String::from_utf8_lossy(&bytes);
                push_text(&mut stack, &text).map_err(|e| positioned(e, reader.buffer_position()))?;
            }
            Event::Eof => break,
            // Comments, processing instructions and leftover declarations carry no content.
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(positioned(
            format!("unclosed element `{}`", open.name),
            reader.buffer_position(),
        ));
    }

    root.ok_or_else(|| Error::Parse("no element found".to_string()))
}

fn start_element(start: &BytesStart<'_>) -> std::result::Result<Element, String> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut el = Element::new(name);

    for attr in start.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(|e| e.to_string())?;
        el.attributes.push((key, value.into_owned()));
    }

    Ok(el)
}

/// Close an element: append it to its parent, or make it the root.
fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    el: Element,
) -> std::result::Result<(), String> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::Element(el));
        return Ok(());
    }
    if root.is_some() {
        return Err("junk after document element".to_string());
    }
    *root = Some(el);
    Ok(())
}

fn push_text(stack: &mut [Element], text: &str) -> std::result::Result<(), String> {
    let Some(parent) = stack.last_mut() else {
        if text.trim().is_empty() {
            return Ok(());
        }
        return Err("text outside the document element".to_string());
    };

    if let Some(Node::Text(existing)) = parent.children.last_mut() {
        existing.push_str(text);
    } else if !text.is_empty() {
        parent.children.push(Node::Text(text.to_string()));
    }
    Ok(())
}

fn positioned(message: impl Display, position: impl Display) -> Error {
    Error::Parse(format!("{message} (at byte {position})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_tree() {
        let root = parse_tree(
            "<MSVG version=\"1.0\"><pageSet><Page><svg viewBox=\"0 0 1 1\"><rect/></svg></Page></pageSet></MSVG>",
        )
        .unwrap();
        assert_eq!(root.name, "MSVG");
        assert_eq!(root.attribute("version"), Some("1.0"));
        let svg = root.descendants().find(|el| el.is("svg")).unwrap();
        assert_eq!(svg.attribute("viewBox"), Some("0 0 1 1"));
        assert_eq!(svg.child_elements().count(), 1);
    }

    #[test]
    fn test_text_is_unescaped_and_cdata_merged() {
        let root = parse_tree("<svg><style><![CDATA[a>b]]></style><text>1 &lt; 2</text></svg>").unwrap();
        let style = root.find_child("style").unwrap();
        assert_eq!(style.text(), "a>b");
        let text = root.find_child("text").unwrap();
        assert_eq!(text.text(), "1 < 2");
    }

    #[test]
    fn test_comments_and_instructions_dropped() {
        let root = parse_tree("<!-- lead --><svg><!-- inner --><?pi x?><g/></svg>").unwrap();
        assert_eq!(root.children.len(), 1);
    }

    #[test]
    fn test_unclosed_element_is_error() {
        let err = parse_tree("<svg><g>").unwrap_err();
        match err {
            Error::Parse(msg) => assert!(msg.contains("unclosed element `g`")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_mismatched_end_is_error() {
        assert!(matches!(parse_tree("<svg><g></svg>"), Err(Error::Parse(_))));
    }

    #[test]
    fn test_second_root_is_error() {
        assert!(matches!(parse_tree("<svg/><svg/>"), Err(Error::Parse(_))));
        assert!(matches!(parse_tree("<svg></svg>trailing"), Err(Error::Parse(_))));
    }

    #[test]
    fn test_empty_input_is_error() {
        match parse_tree("   ") {
            Err(Error::Parse(msg)) => assert_eq!(msg, "no element found"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_nesting_limit() {
        let nested = |depth: usize| format!("{}{}", "<g>".repeat(depth), "</g>".repeat(depth));

        assert!(parse_tree(&nested(MAX_DEPTH)).is_ok());
        match parse_tree(&nested(MAX_DEPTH + 1)) {
            Err(Error::Parse(msg)) => assert!(msg.contains("nesting exceeds 1024 levels")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_entity_is_error() {
        assert!(matches!(parse_tree("<svg>&nbsp;</svg>"), Err(Error::Parse(_))));
    }
}
