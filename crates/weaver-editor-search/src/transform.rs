//! Atomic multi-range edits.
//!
//! `apply_edit` is a pure transformation: it either returns a new document
//! with every range removed, or an error and no document at all. The input
//! is never touched, so a failed edit cannot leave a partial deletion behind.

use std::ops::Range;

use crate::document::{Document, Node, char_to_byte};
use crate::error::EditError;

/// Delete every range in `deletions` from `doc` as a single edit.
///
/// Ranges may be given in any order. Empty ranges are ignored. Ranges must
/// not overlap and each must fall inside one text node.
///
/// Deletions are applied from the highest position to the lowest, so every
/// range still addresses the characters it was computed against when its
/// turn comes. After deletion the result is normalized: emptied text nodes
/// are dropped and neighbouring text nodes with identical marks are merged.
/// Normalization never shifts positions.
pub fn apply_edit(doc: &Document, deletions: &[Range<usize>]) -> Result<Document, EditError> {
    let ranges = validate(doc, deletions)?;

    let mut content = doc.content().to_vec();
    for range in ranges.iter().rev() {
        delete_in(&mut content, 0, range)?;
    }
    normalize(&mut content);

    tracing::trace!(ranges = ranges.len(), "applied multi-range edit");
    Ok(Document::new(content))
}

/// Sort, drop empty ranges and reject anything out of bounds or overlapping.
fn validate(doc: &Document, deletions: &[Range<usize>]) -> Result<Vec<Range<usize>>, EditError> {
    let size = doc.content_size();
    let mut ranges = Vec::with_capacity(deletions.len());
    for range in deletions {
        if range.start > range.end {
            return Err(EditError::Inverted {
                start: range.start,
                end: range.end,
            });
        }
        if range.end > size {
            return Err(EditError::OutOfBounds {
                start: range.start,
                end: range.end,
                size,
            });
        }
        if range.start < range.end {
            ranges.push(range.clone());
        }
    }

    ranges.sort_by_key(|r| r.start);
    for pair in ranges.windows(2) {
        if pair[1].start < pair[0].end {
            return Err(EditError::Overlapping {
                first: pair[0].clone(),
                second: pair[1].clone(),
            });
        }
    }
    Ok(ranges)
}

/// Remove `range` from the text node that contains it.
///
/// `base` is the absolute position of the first node in `nodes`.
fn delete_in(nodes: &mut [Node], base: usize, range: &Range<usize>) -> Result<(), EditError> {
    let not_in_text = || EditError::NotInText {
        start: range.start,
        end: range.end,
    };

    let mut pos = base;
    for node in nodes.iter_mut() {
        if pos >= range.end {
            break;
        }
        let end = pos + node.node_size();
        if range.start >= pos && range.end <= end {
            return match node {
                Node::Text { text, .. } => {
                    let from = char_to_byte(text, range.start - pos);
                    let to = char_to_byte(text, range.end - pos);
                    text.replace_range(from..to, "");
                    Ok(())
                }
                // Strictly inside: the range may not cover the element's own boundaries.
                Node::Element { children, .. } if range.start > pos && range.end < end => {
                    delete_in(children, pos + 1, range)
                }
                _ => Err(not_in_text()),
            };
        }
        pos = end;
    }
    Err(not_in_text())
}

/// Drop empty text nodes and merge adjacent text nodes with equal marks.
fn normalize(nodes: &mut Vec<Node>) {
    let mut merged: Vec<Node> = Vec::with_capacity(nodes.len());
    for mut node in nodes.drain(..) {
        match &mut node {
            Node::Element { children, .. } => normalize(children),
            Node::Text { text, .. } if text.is_empty() => continue,
            _ => {}
        }
        if let (Some(Node::Text { text: prev, marks: prev_marks }), Node::Text { text, marks }) =
            (merged.last_mut(), &node)
        {
            if prev_marks == marks {
                prev.push_str(text);
                continue;
            }
        }
        merged.push(node);
    }
    *nodes = merged;
}
