//! Tree-structured rich text documents with absolute position addressing.
//!
//! A document is an ordered tree of nodes. Every node occupies a contiguous
//! range of integer positions in the flattened document:
//!
//! - a text node occupies one position per character,
//! - an atom (image, embed, hard break) occupies exactly one position,
//! - an element occupies its content plus one position for its opening and
//!   one for its closing boundary.
//!
//! Positions address the content of the root, so the first top-level node
//! starts at position 0 and the content of an element starting at `p` starts
//! at `p + 1`. All offsets are in Unicode scalar values (chars), not bytes.

use std::ops::Range;

use serde_json::{Map, Value};
use smol_str::SmolStr;

/// Free-form node or mark attributes, kept as the editor stores them.
pub type Attrs = Map<String, Value>;

/// A formatting mark on a text node (bold, italic, link, ...).
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    pub kind: SmolStr,
    pub attrs: Option<Attrs>,
}

impl Mark {
    pub fn new(kind: impl Into<SmolStr>) -> Self {
        Self {
            kind: kind.into(),
            attrs: None,
        }
    }

    pub fn with_attrs(mut self, attrs: Attrs) -> Self {
        self.attrs = Some(attrs);
        self
    }
}

/// A node in the document tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// A container with ordered children and no text of its own.
    Element {
        kind: SmolStr,
        attrs: Option<Attrs>,
        children: Vec<Node>,
    },
    /// A contiguous run of characters sharing one set of marks.
    Text { text: String, marks: Vec<Mark> },
    /// A leaf without text content.
    Atom { kind: SmolStr, attrs: Option<Attrs> },
}

impl Node {
    pub fn element(kind: impl Into<SmolStr>, children: Vec<Node>) -> Self {
        Node::Element {
            kind: kind.into(),
            attrs: None,
            children,
        }
    }

    /// Shorthand for a `paragraph` element.
    pub fn paragraph(children: Vec<Node>) -> Self {
        Self::element("paragraph", children)
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    pub fn marked_text(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Node::Text {
            text: text.into(),
            marks,
        }
    }

    pub fn atom(kind: impl Into<SmolStr>) -> Self {
        Node::Atom {
            kind: kind.into(),
            attrs: None,
        }
    }

    /// Number of positions this node occupies.
    pub fn node_size(&self) -> usize {
        match self {
            Node::Element { children, .. } => 2 + content_size(children),
            Node::Text { text, .. } => text.chars().count(),
            Node::Atom { .. } => 1,
        }
    }

    /// The node type name. Text nodes are `text`.
    pub fn kind(&self) -> &str {
        match self {
            Node::Element { kind, .. } | Node::Atom { kind, .. } => kind,
            Node::Text { .. } => "text",
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text { .. })
    }

    /// The text of a text node.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Children of an element; empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element { children, .. } => children,
            _ => &[],
        }
    }
}

/// Total size of a sequence of sibling nodes.
pub(crate) fn content_size(nodes: &[Node]) -> usize {
    nodes.iter().map(Node::node_size).sum()
}

/// Convert a char offset within `text` to a byte offset, clamping to the end.
pub(crate) fn char_to_byte(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

/// A rich text document: the content of the root `doc` node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    content: Vec<Node>,
}

impl Document {
    pub fn new(content: Vec<Node>) -> Self {
        Self { content }
    }

    /// Top-level nodes in document order.
    pub fn content(&self) -> &[Node] {
        &self.content
    }

    pub fn into_content(self) -> Vec<Node> {
        self.content
    }

    /// Number of addressable positions in the document.
    pub fn content_size(&self) -> usize {
        content_size(&self.content)
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Iterate over every node with its absolute start position, depth-first
    /// in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: vec![(self.content.iter(), 0)],
        }
    }

    /// Iterate over text nodes only, yielding `(position, text)`.
    pub fn text_nodes(&self) -> impl Iterator<Item = (usize, &str)> {
        self.descendants()
            .filter_map(|(pos, node)| node.as_text().map(|text| (pos, text)))
    }

    /// Text of all text nodes overlapping `range`, clipped to it.
    ///
    /// Boundaries and atoms contribute nothing.
    pub fn text_between(&self, range: Range<usize>) -> String {
        let mut out = String::new();
        if range.start >= range.end {
            return out;
        }
        for (pos, text) in self.text_nodes() {
            let len = text.chars().count();
            let end = pos + len;
            if end <= range.start || pos >= range.end {
                continue;
            }
            let from = range.start.saturating_sub(pos);
            let to = range.end.min(end) - pos;
            out.push_str(&text[char_to_byte(text, from)..char_to_byte(text, to)]);
        }
        out
    }

    /// Concatenated text of the whole document.
    pub fn text_content(&self) -> String {
        self.text_nodes().map(|(_, text)| text).collect()
    }
}

/// Depth-first iterator over `(position, node)` pairs.
pub struct Descendants<'a> {
    /// Sibling iterators with the position of the next sibling in each.
    stack: Vec<(std::slice::Iter<'a, Node>, usize)>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = (usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (siblings, pos) = self.stack.last_mut()?;
            match siblings.next() {
                Some(node) => {
                    let at = *pos;
                    *pos += node.node_size();
                    if let Node::Element { children, .. } = node {
                        self.stack.push((children.iter(), at + 1));
                    }
                    return Some((at, node));
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// paragraph("foo bar") + bulletList(listItem(paragraph("foo")))
    fn nested_doc() -> Document {
        Document::new(vec![
            Node::paragraph(vec![Node::text("foo bar")]),
            Node::element(
                "bulletList",
                vec![Node::element(
                    "listItem",
                    vec![Node::paragraph(vec![Node::text("foo")])],
                )],
            ),
        ])
    }

    #[test]
    fn test_node_sizes() {
        assert_eq!(Node::text("héllo").node_size(), 5);
        assert_eq!(Node::atom("hardBreak").node_size(), 1);
        assert_eq!(Node::paragraph(vec![]).node_size(), 2);
        assert_eq!(Node::paragraph(vec![Node::text("abc")]).node_size(), 5);
    }

    #[test]
    fn test_content_size() {
        assert_eq!(nested_doc().content_size(), 18);
        assert_eq!(Document::default().content_size(), 0);
    }

    #[test]
    fn test_descendant_positions() {
        let doc = nested_doc();
        let visited: Vec<(usize, &str)> = doc
            .descendants()
            .map(|(pos, node)| (pos, node.kind()))
            .collect();
        assert_eq!(
            visited,
            vec![
                (0, "paragraph"),
                (1, "text"),
                (9, "bulletList"),
                (10, "listItem"),
                (11, "paragraph"),
                (12, "text"),
            ]
        );
    }

    #[test]
    fn test_text_nodes_with_atoms() {
        let doc = Document::new(vec![Node::paragraph(vec![
            Node::text("ab"),
            Node::atom("hardBreak"),
            Node::text("cd"),
        ])]);
        let nodes: Vec<(usize, &str)> = doc.text_nodes().collect();
        assert_eq!(nodes, vec![(1, "ab"), (4, "cd")]);
    }

    #[test]
    fn test_text_between() {
        let doc = nested_doc();
        assert_eq!(doc.text_between(1..4), "foo");
        assert_eq!(doc.text_between(5..8), "bar");
        assert_eq!(doc.text_between(12..15), "foo");
        // Boundaries between the two text nodes contribute nothing.
        assert_eq!(doc.text_between(5..15), "barfoo");
        assert_eq!(doc.text_between(0..18), "foo barfoo");
    }

    #[test]
    fn test_text_between_empty_or_inverted() {
        let doc = nested_doc();
        assert_eq!(doc.text_between(3..3), "");
        #[allow(clippy::reversed_empty_ranges)]
        let inverted = 5..3;
        assert_eq!(doc.text_between(inverted), "");
    }

    #[test]
    fn test_text_between_multibyte() {
        let doc = Document::new(vec![Node::text("héllo wörld")]);
        assert_eq!(doc.text_between(6..8), "wö");
        assert_eq!(doc.text_between(1..2), "é");
    }

    #[test]
    fn test_text_content() {
        assert_eq!(nested_doc().text_content(), "foo barfoo");
    }

    #[test]
    fn test_char_to_byte() {
        assert_eq!(char_to_byte("héllo", 0), 0);
        assert_eq!(char_to_byte("héllo", 2), 3);
        assert_eq!(char_to_byte("héllo", 5), 6);
        assert_eq!(char_to_byte("héllo", 99), 6);
    }
}
