//! Document outline (bookmark tree) types.

use serde::{Deserialize, Serialize};

/// Where an explicit destination points.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageTarget {
    /// Indirect reference to a page object: (object number, generation).
    Reference(u32, u16),
    /// Zero-based page index, as written by some producers.
    Index(u32),
}

/// An opaque navigation destination attached to an outline node.
///
/// Only the document that produced a destination can resolve it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Destination {
    /// Named destination, looked up in the document's name tables.
    Named(String),
    /// Explicit destination array whose first element is the target page.
    Explicit(PageTarget),
}

impl Destination {
    /// Shorthand for a named destination.
    pub fn named(name: impl Into<String>) -> Self {
        Destination::Named(name.into())
    }

    /// Shorthand for an explicit zero-based page index.
    pub fn page_index(index: u32) -> Self {
        Destination::Explicit(PageTarget::Index(index))
    }
}

/// A single node of a document's outline tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineNode {
    /// Node title as stored in the document (untrimmed)
    pub title: String,

    /// Navigation destination, if any
    pub destination: Option<Destination>,

    /// Child nodes in document order
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    /// Create a new outline node without children.
    pub fn new(title: impl Into<String>, destination: Option<Destination>) -> Self {
        Self {
            title: title.into(),
            destination,
            children: Vec::new(),
        }
    }

    /// Add a child node.
    pub fn add_child(&mut self, child: OutlineNode) {
        self.children.push(child);
    }

    /// Builder-style variant of [`add_child`](Self::add_child).
    pub fn with_child(mut self, child: OutlineNode) -> Self {
        self.children.push(child);
        self
    }
}

/// Count all nodes in a forest, including nested ones.
pub fn total_nodes(nodes: &[OutlineNode]) -> usize {
    nodes
        .iter()
        .map(|node| 1 + total_nodes(&node.children))
        .sum()
}
