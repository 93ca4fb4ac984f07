//! Document model types.
//!
//! This module defines the intermediate representation between parsing and
//! page layout: a generic markup tree, the document that owns it, the page
//! references extracted from it and the rendered page descriptors.

mod document;
mod element;
mod page;

pub use document::{Document, DocumentKind};
pub use element::{is_namespace_declaration, local_name, Descendants, Element, Node};
pub use page::{PageDescriptor, PageNode, SVG_NAMESPACE};
