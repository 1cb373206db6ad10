//! Document-wide text search and removal.
//!
//! These are pure functions over a [`Document`]: they never mutate the
//! document they are given and hold no state between calls. Caching the last
//! result for a UI lives in [`crate::engine::SearchEngine`].

mod matcher;


pub use matcher::Matcher;

use web_time::Instant;

use crate::document::Document;
use crate::error::SearchError;
use crate::transform::apply_edit;
use crate::types::{Match, SearchOptions};

/// Whether a query is empty or whitespace only. Blank queries search nothing.
pub fn is_blank(query: &str) -> bool {
    query.trim().is_empty()
}

/// Find every occurrence of `query` in the text nodes of `doc`.
///
/// Text nodes are visited depth-first in document order and each one is
/// scanned on its own, so matches are ascending and never straddle two text
/// nodes (text split across differently formatted runs is not found).
/// A blank query yields no matches.
pub fn find_matches(
    doc: &Document,
    query: &str,
    options: &SearchOptions,
) -> Result<Vec<Match>, SearchError> {
    if is_blank(query) {
        return Ok(Vec::new());
    }

    let matcher = Matcher::new(query, options)?;
    let matches: Vec<Match> = doc
        .text_nodes()
        .flat_map(|(pos, text)| matcher.scan(text, pos))
        .collect();

    tracing::trace!(query, matches = matches.len(), "scanned document");
    Ok(matches)
}

/// Outcome of a successful removal.
#[derive(Clone, Debug)]
pub struct Removal {
    /// The document with every match deleted.
    pub document: Document,
    /// How many ranges were deleted.
    pub removed: usize,
}

/// Compute the document with every occurrence of `query` removed.
///
/// Matches are always recomputed against `doc`, never taken from an earlier
/// search. Returns `Ok(None)` when there is nothing to remove. The edit is
/// atomic: on error no document is produced.
pub fn remove_matches(
    doc: &Document,
    query: &str,
    options: &SearchOptions,
) -> Result<Option<Removal>, SearchError> {
    let start = Instant::now();
    let matches = find_matches(doc, query, options)?;
    if matches.is_empty() {
        return Ok(None);
    }

    let ranges: Vec<_> = matches.iter().map(Match::range).collect();
    let document = apply_edit(doc, &ranges)?;

    tracing::debug!(
        query,
        removed = ranges.len(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "removed matches"
    );
    Ok(Some(Removal {
        document,
        removed: ranges.len(),
    }))
}
