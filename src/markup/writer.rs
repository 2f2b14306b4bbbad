//! Markup output
//!
//! Elements without children and elements holding only text are written on a
//! single line; any other element puts each child on its own indented line.
//! Empty attribute values are written as bare boolean attributes.

use std::fmt::Write;

use super::node::{Document, Element, Node};
use super::VOID_ELEMENTS;

/// Write a complete document including the `html` wrapper
pub fn write_document(document: &Document, indent: usize) -> String {
    let mut out = String::from("<!DOCTYPE html>\n<html>\n");
    write_element(&mut out, &document.head, 1, indent);
    write_element(&mut out, &document.body, 1, indent);
    out.push_str("</html>\n");
    out
}

/// Write a single element subtree at depth zero
pub fn write_fragment(element: &Element, indent: usize) -> String {
    let mut out = String::new();
    write_element(&mut out, element, 0, indent);
    out
}

fn write_element(out: &mut String, element: &Element, depth: usize, indent: usize) {
    let pad = " ".repeat(depth * indent);
    out.push_str(&pad);
    write_start_tag(out, element);

    if VOID_ELEMENTS.contains(&element.tag()) {
        out.push('\n');
        return;
    }

    let text_only = element
        .children
        .iter()
        .all(|child| matches!(child, Node::Text(_)));

    if text_only {
        for child in &element.children {
            if let Node::Text(text) = child {
                out.push_str(&escape_text(text));
            }
        }
    } else {
        out.push('\n');
        for child in &element.children {
            match child {
                Node::Element(child) => write_element(out, child, depth + 1, indent),
                Node::Text(text) => {
                    out.push_str(&" ".repeat((depth + 1) * indent));
                    out.push_str(&escape_text(text));
                    out.push('\n');
                }
            }
        }
        out.push_str(&pad);
    }

    let _ = writeln!(out, "</{}>", element.tag());
}

fn write_start_tag(out: &mut String, element: &Element) {
    out.push('<');
    out.push_str(element.tag());
    for (name, value) in element.attributes.iter() {
        out.push(' ');
        out.push_str(name);
        if !value.is_empty() {
            let _ = write!(out, "=\"{}\"", escape_attribute(value));
        }
    }
    out.push('>');
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
