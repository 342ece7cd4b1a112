//! # Line Content
//!
//! A line's content is a persistent value: an ordered sequence of text runs
//! and markup elements. Annotation passes never edit it in place; they build a
//! fresh [`ContentTree`] and replace the old one wholesale.
//!
//! ## Base text
//!
//! Every offset used while annotating is measured against the line's *base
//! text*: the transcription as it reads in the edition. Text runs contribute
//! to it, and so do elements whose [`TextFlow`] is `Base` (a `choice`
//! contributes its `corr`, an `app` its `lem`). Apparatus elements (`note`,
//! `sic`, `rdg`, `pb`) contribute nothing. Splicing never changes the base text.
//!
//! ## Modules
//!
//! - **`span`**: `Span` byte ranges into the base text
//! - **`elements`**: builders for the TEI elements the annotator inserts
//! - **`splice`**: `splice()` rebuilds content around a set of insertions

pub mod elements;
pub mod span;
pub mod splice;

use serde::Serialize;

pub use span::Span;
pub use splice::{Insertion, SpliceError, Spliced, splice, splice_one};

/// Whether an element's text is part of the line's base text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextFlow {
    /// Children contribute to the base text (`choice`, `corr`, `app`, `lem`).
    Base,
    /// Editorial matter outside the base text (`note`, `sic`, `rdg`, `pb`).
    Apparatus,
}

/// A markup element inside a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    pub name: String,
    /// Attributes in serialization order.
    pub attributes: Vec<(String, String)>,
    pub children: Vec<ContentNode>,
    pub flow: TextFlow,
}

impl Element {
    pub fn new(name: impl Into<String>, flow: TextFlow) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            flow,
        }
    }

    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.is_empty() {
            self.children.push(ContentNode::Text(text));
        }
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(ContentNode::Element(child));
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Child elements with the given name, in order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter_map(move |c| match c {
            ContentNode::Element(e) if e.name == name => Some(e),
            _ => None,
        })
    }

    fn push_base_text(&self, out: &mut String) {
        if self.flow == TextFlow::Apparatus {
            return;
        }
        for child in &self.children {
            child.push_base_text(out);
        }
    }

    fn push_full_text(&self, out: &mut String) {
        for child in &self.children {
            child.push_full_text(out);
        }
    }

    /// Base text contributed by this element.
    pub fn base_text(&self) -> String {
        let mut out = String::new();
        self.push_base_text(&mut out);
        out
    }

    /// All text inside this element, apparatus included.
    pub fn full_text(&self) -> String {
        let mut out = String::new();
        self.push_full_text(&mut out);
        out
    }
}

/// A single node of a line's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ContentNode {
    Text(String),
    Element(Element),
}

impl ContentNode {
    fn push_base_text(&self, out: &mut String) {
        match self {
            ContentNode::Text(t) => out.push_str(t),
            ContentNode::Element(e) => e.push_base_text(out),
        }
    }

    fn push_full_text(&self, out: &mut String) {
        match self {
            ContentNode::Text(t) => out.push_str(t),
            ContentNode::Element(e) => e.push_full_text(out),
        }
    }

    /// Length of this node's base text in bytes.
    pub fn base_len(&self) -> usize {
        match self {
            ContentNode::Text(t) => t.len(),
            ContentNode::Element(e) => e.base_text().len(),
        }
    }
}

impl From<Element> for ContentNode {
    fn from(e: Element) -> Self {
        ContentNode::Element(e)
    }
}

/// The content of one line.
///
/// Always normalized: no empty text runs and no two adjacent text runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ContentTree {
    nodes: Vec<ContentNode>,
}

impl ContentTree {
    pub fn new(nodes: Vec<ContentNode>) -> Self {
        let mut tree = Self {
            nodes: Vec::with_capacity(nodes.len()),
        };
        for node in nodes {
            tree.push(node);
        }
        tree
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(vec![ContentNode::Text(text.into())])
    }

    pub fn nodes(&self) -> &[ContentNode] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Appends a node, merging adjacent text runs.
    pub fn push(&mut self, node: ContentNode) {
        match node {
            ContentNode::Text(t) if t.is_empty() => {}
            ContentNode::Text(t) => match self.nodes.last_mut() {
                Some(ContentNode::Text(prev)) => prev.push_str(&t),
                _ => self.nodes.push(ContentNode::Text(t)),
            },
            element => self.nodes.push(element),
        }
    }

    /// The flattened base text that anchors are searched in.
    pub fn base_text(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            node.push_base_text(&mut out);
        }
        out
    }

    /// Every text leaf in document order, apparatus included.
    pub fn full_text(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            node.push_full_text(&mut out);
        }
        out
    }

    /// All elements with the given name, searched depth-first.
    pub fn find_elements<'a>(&'a self, name: &str) -> Vec<&'a Element> {
        fn walk<'a>(nodes: &'a [ContentNode], name: &str, out: &mut Vec<&'a Element>) {
            for node in nodes {
                if let ContentNode::Element(e) = node {
                    if e.name == name {
                        out.push(e);
                    }
                    walk(&e.children, name, out);
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.nodes, name, &mut out);
        out
    }
}

impl FromIterator<ContentNode> for ContentTree {
    fn from_iter<I: IntoIterator<Item = ContentNode>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sic_corr(sic: &str, corr: &str) -> Element {
        Element::new("choice", TextFlow::Base)
            .with_child(Element::new("sic", TextFlow::Apparatus).with_text(sic))
            .with_child(Element::new("corr", TextFlow::Base).with_text(corr))
    }

    #[test]
    fn normalizes_adjacent_text() {
        let tree = ContentTree::new(vec![
            ContentNode::Text("a".into()),
            ContentNode::Text(String::new()),
            ContentNode::Text("b".into()),
        ]);
        assert_eq!(tree.nodes(), &[ContentNode::Text("ab".into())]);
    }

    #[test]
    fn base_text_skips_apparatus() {
        let tree = ContentTree::new(vec![
            ContentNode::Text("The ".into()),
            sic_corr("catte", "cat").into(),
            Element::new("note", TextFlow::Apparatus)
                .with_text("feline")
                .into(),
            ContentNode::Text(" sat".into()),
        ]);
        assert_eq!(tree.base_text(), "The cat sat");
        assert_eq!(tree.full_text(), "The cattecatfeline sat");
    }

    #[test]
    fn find_nested_elements() {
        let tree = ContentTree::new(vec![sic_corr("a", "b").into()]);
        assert_eq!(tree.find_elements("sic").len(), 1);
        assert_eq!(tree.find_elements("corr")[0].base_text(), "b");
    }

    #[test]
    fn attributes_keep_order() {
        let e = Element::new("note", TextFlow::Apparatus)
            .with_attr("resp", "#EDT")
            .with_attr("n", "1");
        assert_eq!(e.attr("n"), Some("1"));
        assert_eq!(e.attributes[0].0, "resp");
        assert_eq!(e.attr("missing"), None);
    }
}
