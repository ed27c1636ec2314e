//! Workflow document model, parser, and writer.
//!
//! Documents are stored in an arena: every element lives in a flat `Vec` and
//! is addressed by a compact [`NodeId`]. The tree owns nodes strictly
//! parent-to-child through the `children` lists; there are no parent pointers
//! on the nodes themselves. Upward navigation is provided separately by
//! [`crate::search::AncestorIndex`], which is built per pass over a single
//! tree snapshot.

mod parser;
mod writer;

pub use parser::{parse_file, parse_str};
pub use writer::to_xml_string;

/// Compact element identifier (index into the document arena).
pub type NodeId = u32;

/// A single attribute. Attribute order within an element is the order the
/// attributes appeared in the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// An element in the document arena.
#[derive(Debug, Clone)]
pub struct Element {
    /// Tag name.
    pub tag: String,
    /// Direct text content, if any.
    pub text: Option<String>,
    /// Attributes in document order.
    pub attrs: Vec<Attribute>,
    /// Child elements in document order.
    pub children: Vec<NodeId>,
}

impl Element {
    /// Create an element with no text, attributes, or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            text: None,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Look up an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Look up an attribute value by name, treating the empty string as absent.
    pub fn non_empty_attr(&self, name: &str) -> Option<&str> {
        self.attr(name).filter(|v| !v.is_empty())
    }

    /// Add an attribute, preserving insertion order.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.push(Attribute {
            name: name.into(),
            value: value.into(),
        });
    }
}

/// An arena-backed document tree with a single root element.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
    root: NodeId,
}

impl Document {
    /// Create a document containing only a root element.
    pub fn new(root: Element) -> Self {
        Self {
            nodes: vec![root],
            root: 0,
        }
    }

    /// The root element id.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of elements in the document.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the document somehow holds no elements. A parsed document
    /// always has at least the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Borrow an element.
    ///
    /// # Panics
    /// Panics if `id` did not come from this document.
    pub fn node(&self, id: NodeId) -> &Element {
        &self.nodes[id as usize]
    }

    /// Mutably borrow an element.
    ///
    /// # Panics
    /// Panics if `id` did not come from this document.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Element {
        &mut self.nodes[id as usize]
    }

    /// Append an element as the last child of `parent`, returning its id.
    pub fn add_child(&mut self, parent: NodeId, element: Element) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(element);
        self.nodes[parent as usize].children.push(id);
        id
    }
}
