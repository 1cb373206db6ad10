//! Import and export of documents in the editor's JSON content format.
//!
//! ```json
//! {"type": "doc", "content": [
//!   {"type": "paragraph", "content": [
//!     {"type": "text", "text": "Hello ", "marks": [{"type": "bold"}]},
//!     {"type": "text", "text": "world"}
//!   ]}
//! ]}
//! ```
//!
//! Nodes of type `text` become text nodes, known leaf types become atoms and
//! everything else is an element. Attributes are carried through untouched.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::document::{Attrs, Document, Mark, Node};
use crate::error::JsonError;

/// Node types that never have content.
pub const ATOM_TYPES: &[&str] = &[
    "image",
    "imageResizable",
    "youtube",
    "hardBreak",
    "horizontalRule",
];

#[derive(Debug, Serialize, Deserialize)]
struct JsonNode {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attrs: Option<Attrs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<Vec<JsonNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    marks: Option<Vec<JsonMark>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonMark {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attrs: Option<Attrs>,
}

impl Document {
    /// Parse a document from editor JSON.
    pub fn from_json(json: &str) -> Result<Self, JsonError> {
        let root: JsonNode = serde_json::from_str(json)?;
        if root.kind != "doc" {
            return Err(JsonError::InvalidRoot { found: root.kind });
        }
        let content = root
            .content
            .unwrap_or_default()
            .into_iter()
            .map(node_from_json)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Document::new(content))
    }

    /// Serialize the document as pretty-printed editor JSON.
    pub fn to_json(&self) -> Result<String, JsonError> {
        let root = JsonNode {
            kind: "doc".to_string(),
            attrs: None,
            content: Some(self.content().iter().map(node_to_json).collect()),
            text: None,
            marks: None,
        };
        Ok(serde_json::to_string_pretty(&root)?)
    }
}

fn node_from_json(node: JsonNode) -> Result<Node, JsonError> {
    if node.kind == "text" {
        let text = node.text.ok_or(JsonError::MissingText)?;
        let marks = node
            .marks
            .unwrap_or_default()
            .into_iter()
            .map(|mark| Mark {
                kind: SmolStr::new(mark.kind),
                attrs: mark.attrs,
            })
            .collect();
        return Ok(Node::Text { text, marks });
    }

    if ATOM_TYPES.contains(&node.kind.as_str()) {
        return Ok(Node::Atom {
            kind: SmolStr::new(node.kind),
            attrs: node.attrs,
        });
    }

    let children = node
        .content
        .unwrap_or_default()
        .into_iter()
        .map(node_from_json)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Node::Element {
        kind: SmolStr::new(node.kind),
        attrs: node.attrs,
        children,
    })
}

fn node_to_json(node: &Node) -> JsonNode {
    match node {
        Node::Element {
            kind,
            attrs,
            children,
        } => JsonNode {
            kind: kind.to_string(),
            attrs: attrs.clone(),
            // Empty elements are written without a content array.
            content: (!children.is_empty()).then(|| children.iter().map(node_to_json).collect()),
            text: None,
            marks: None,
        },
        Node::Text { text, marks } => JsonNode {
            kind: "text".to_string(),
            attrs: None,
            content: None,
            text: Some(text.clone()),
            marks: (!marks.is_empty()).then(|| {
                marks
                    .iter()
                    .map(|mark| JsonMark {
                        kind: mark.kind.to_string(),
                        attrs: mark.attrs.clone(),
                    })
                    .collect()
            }),
        },
        Node::Atom { kind, attrs } => JsonNode {
            kind: kind.to_string(),
            attrs: attrs.clone(),
            content: None,
            text: None,
            marks: None,
        },
    }
}
