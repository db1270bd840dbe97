//! Owned XML tree used for reading and rewriting exports.
//!
//! The rewriter works on whole documents: entries move from the input tree to
//! the output tree and synthesized attachment nodes slot in between them. An
//! owned [`Element`] tree supports that directly, with `parse_document` and
//! `document_to_string` converting to and from serialized XML.

mod parse;
mod write;

pub(crate) use parse::parse_document;
pub(crate) use write::document_to_string;

use crate::namespaces::Namespaces;

/// A node in the tree: a child element or a run of character data.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An XML element with its attributes and children, in document order.
///
/// Names are kept in their serialized `prefix:local` form; namespace-aware
/// lookups go through [`Element::find_child`] and [`Element::attr`], which
/// compare namespace URIs rather than prefix spellings.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Creates an empty element with the given qualified name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Adds an attribute, builder style.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_attribute(name, value);
        self
    }

    /// Adds a text child, builder style.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Adds a child element, builder style.
    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.push_child(child);
        self
    }

    /// Appends an attribute.
    pub fn push_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.push((name.into(), value.into()));
    }

    /// Appends a child element.
    pub fn push_child(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub(crate) fn push_node(&mut self, node: Node) {
        self.children.push(node);
    }

    /// The element's qualified name as written, e.g. `bib:Article`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The part of the name after the prefix, e.g. `Article`.
    #[must_use]
    pub fn local_name(&self) -> &str {
        match self.name.split_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    /// All attributes in document order, as `(name, value)` pairs.
    #[must_use]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// All child nodes in document order.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// The child elements in document order, skipping text nodes.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// The concatenated text of the element's direct text children.
    #[must_use]
    pub fn text(&self) -> String {
        let mut text = String::new();
        for node in &self.children {
            if let Node::Text(chunk) = node {
                text.push_str(chunk);
            }
        }
        text
    }

    /// Consumes the element and returns its children.
    #[must_use]
    pub fn into_children(self) -> Vec<Node> {
        self.children
    }

    /// A copy of the element with its name and attributes but no children.
    #[must_use]
    pub fn without_children(&self) -> Element {
        Element {
            name: self.name.clone(),
            attributes: self.attributes.clone(),
            children: Vec::new(),
        }
    }

    /// Finds the first child element whose name resolves to the given
    /// namespace prefix's URI and local name.
    pub fn find_child(&self, ns: &Namespaces, prefix: &str, local: &str) -> Option<&Element> {
        let want = ns.uri(prefix)?;
        self.child_elements().find(|child| {
            ns.resolve(child.name())
                .is_some_and(|(uri, child_local)| uri == want && child_local == local)
        })
    }

    /// Finds the value of the first attribute whose name resolves to the given
    /// namespace prefix's URI and local name.
    pub fn attr(&self, ns: &Namespaces, prefix: &str, local: &str) -> Option<&str> {
        let want = ns.uri(prefix)?;
        self.attributes.iter().find_map(|(name, value)| {
            let (uri, attr_local) = ns.resolve(name)?;
            (uri == want && attr_local == local).then_some(value.as_str())
        })
    }
}
