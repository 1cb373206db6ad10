//! Error types for searching and editing documents.

use std::ops::Range;

use miette::Diagnostic;
use smol_str::SmolStr;
use thiserror::Error;

/// Errors surfaced by search commands.
///
/// "No matches" is never an error; it is an empty match list or a `false`
/// return from the removing command.
#[derive(Error, Debug, Diagnostic)]
#[non_exhaustive]
pub enum SearchError {
    /// The query could not be compiled as a pattern.
    #[error("invalid search pattern `{pattern}`: {message}")]
    #[diagnostic(
        code(weaver::search::pattern),
        help("search in literal mode to match the text exactly as typed")
    )]
    InvalidPattern {
        /// The query as given.
        pattern: SmolStr,
        /// The pattern compiler's explanation.
        message: String,
    },

    /// Applying the removal edit failed. The document is unchanged.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Edit(#[from] EditError),
}

/// Errors from applying a multi-range edit.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EditError {
    /// A range reaches past the end of the document content.
    #[error("range {start}..{end} is outside the document (content size {size})")]
    #[diagnostic(code(weaver::edit::out_of_bounds))]
    OutOfBounds {
        start: usize,
        end: usize,
        size: usize,
    },

    /// A range ends before it starts.
    #[error("range {start}..{end} is inverted")]
    #[diagnostic(code(weaver::edit::inverted))]
    Inverted { start: usize, end: usize },

    /// Two ranges of the same edit overlap.
    #[error("ranges {first:?} and {second:?} overlap")]
    #[diagnostic(
        code(weaver::edit::overlap),
        help("each position may be deleted by at most one range of an edit")
    )]
    Overlapping {
        first: Range<usize>,
        second: Range<usize>,
    },

    /// A range does not resolve to characters of a single text node.
    #[error("range {start}..{end} does not lie inside a single text node")]
    #[diagnostic(code(weaver::edit::not_in_text))]
    NotInText { start: usize, end: usize },
}

/// Errors from reading or writing editor JSON content.
#[derive(Error, Debug, Diagnostic)]
#[non_exhaustive]
pub enum JsonError {
    /// Malformed JSON or a node with the wrong shape.
    #[error("failed to parse document JSON: {0}")]
    #[diagnostic(code(weaver::json::parse))]
    Parse(#[from] serde_json::Error),

    /// The top-level node is not a document.
    #[error("document root must have type `doc`, found `{found}`")]
    #[diagnostic(code(weaver::json::root))]
    InvalidRoot { found: String },

    /// A `text` node without its `text` field.
    #[error("text node is missing its `text` field")]
    #[diagnostic(code(weaver::json::missing_text))]
    MissingText,
}

/// A query mode name that is neither `literal` nor `pattern`.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
#[error("unknown query mode `{0}`, expected `literal` or `pattern`")]
#[diagnostic(code(weaver::search::mode))]
pub struct UnknownQueryMode(pub String);
