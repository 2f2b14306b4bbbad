//! Template markup: the HTML-like tree that designs are read from and written to

mod grammar;
pub mod lexer;
pub mod node;
pub mod writer;

pub use grammar::parse;
pub use node::{Attributes, Document, Element, Node};
pub use writer::{write_document, write_fragment};

/// Elements that never have content or a closing tag
pub(crate) const VOID_ELEMENTS: &[&str] = &["meta", "link", "br", "hr", "img", "input"];
