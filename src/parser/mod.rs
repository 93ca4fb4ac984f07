//! MSVG parsing module.

mod msvg_parser;
mod preamble;
mod tree;

pub use msvg_parser::MsvgParser;
pub use preamble::strip_preamble;
pub use tree::{parse_tree, MAX_DEPTH};
