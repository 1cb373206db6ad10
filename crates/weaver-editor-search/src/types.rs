//! Core search types: matches and search options.
//!
//! These types are independent of how a document is stored and can be handed
//! to any UI layer as-is.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use smol_str::SmolStr;

use crate::error::UnknownQueryMode;

/// A found occurrence of a query in a document.
///
/// `start` and `end` are absolute document positions (character offsets in
/// the flattened position space of the whole tree), never offsets inside a
/// single text node. A match is never empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Match {
    /// Absolute position of the first matched character.
    pub start: usize,
    /// Absolute position one past the last matched character.
    pub end: usize,
    /// The matched text as it appears in the document.
    pub text: SmolStr,
}

impl Match {
    /// Create a new match.
    pub fn new(start: usize, end: usize, text: impl Into<SmolStr>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Always false for matches produced by a search.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The position range covered by this match.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{} {:?}", self.start, self.end, self.text.as_str())
    }
}

/// How a query string is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum QueryMode {
    /// The query is matched as typed.
    #[default]
    Literal,
    /// The query is a regular expression.
    Pattern,
}

impl QueryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryMode::Literal => "literal",
            QueryMode::Pattern => "pattern",
        }
    }
}

impl FromStr for QueryMode {
    type Err = UnknownQueryMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "literal" | "text" => Ok(QueryMode::Literal),
            "pattern" | "regex" => Ok(QueryMode::Pattern),
            _ => Err(UnknownQueryMode(s.to_string())),
        }
    }
}

impl fmt::Display for QueryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options applied to a single search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SearchOptions {
    /// Match case exactly. Off by default.
    pub case_sensitive: bool,
    /// Literal text or regular expression.
    pub mode: QueryMode,
}

impl SearchOptions {
    /// Case-insensitive literal search.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn case_sensitive(mut self, value: bool) -> Self {
        self.case_sensitive = value;
        self
    }

    pub fn mode(mut self, mode: QueryMode) -> Self {
        self.mode = mode;
        self
    }

    /// Shorthand for `mode(QueryMode::Pattern)`.
    pub fn pattern(self) -> Self {
        self.mode(QueryMode::Pattern)
    }
}
