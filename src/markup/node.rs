//! Template tree types: elements, text and the head/body document

use super::grammar;
use crate::error::ParseError;

/// Ordered attribute list of an element
///
/// Names are stored lowercase. Setting an existing name replaces the value
/// in place so the written order stays stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value of an attribute
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Check if an attribute is present
    pub fn has(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == name)
    }

    /// Set an attribute, replacing any previous value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into().to_ascii_lowercase();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Remove an attribute, returning its value
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.entries.iter().position(|(key, _)| key == name)?;
        Some(self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A node of the template tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }
}

/// An element with a tag name, attributes and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    pub attributes: Attributes,
    pub children: Vec<Node>,
}

impl Element {
    /// Create an empty element. The tag is normalized to lowercase.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attributes: Attributes::new(),
            children: Vec::new(),
        }
    }

    /// Create an element from parsed attribute pairs; the first occurrence
    /// of a repeated attribute wins.
    pub fn with_attributes(tag: impl Into<String>, attributes: Vec<(String, String)>) -> Self {
        let mut element = Self::new(tag);
        for (name, value) in attributes {
            if !element.attributes.has(&name) {
                element.attributes.set(name, value);
            }
        }
        element
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.has(name)
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.set(name, value);
    }

    /// Builder-style attribute setter
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn append_child(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn append_text(&mut self, text: impl Into<String>) {
        self.children.push(Node::Text(text.into()));
    }

    /// Iterate over element children, skipping text
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Concatenated text of the direct text children
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Elements that belong to the head when they appear outside of `body`
const HEAD_ELEMENTS: [&str; 2] = ["meta", "link"];

/// A template document split into its head and body sections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub head: Element,
    pub body: Element,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self {
            head: Element::new("head"),
            body: Element::new("body"),
        }
    }

    /// Parse template source into a document
    ///
    /// The `html`, `head` and `body` wrappers are optional. `meta` and `link`
    /// elements outside of `body` belong to the head; other content outside
    /// of an explicit `head` lands in the body.
    pub fn parse(source: &str) -> Result<Self, Vec<ParseError>> {
        let nodes = grammar::parse(source)?;
        let mut document = Self::new();
        document.absorb(nodes);
        Ok(document)
    }

    fn absorb(&mut self, nodes: Vec<Node>) {
        for node in nodes {
            match node {
                Node::Element(element) if element.tag() == "html" => self.absorb(element.children),
                Node::Element(element) if element.tag() == "head" => {
                    self.head.children.extend(element.children)
                }
                Node::Element(element) if element.tag() == "body" => {
                    self.body.children.extend(element.children)
                }
                Node::Element(element) if HEAD_ELEMENTS.contains(&element.tag()) => {
                    self.head.children.push(Node::Element(element))
                }
                other => self.body.children.push(other),
            }
        }
    }

    /// Render the document with the given indent width
    pub fn to_html(&self, indent: usize) -> String {
        super::writer::write_document(self, indent)
    }
}
