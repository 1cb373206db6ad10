//! Query compilation and per-node scanning.

use regex::{Regex, RegexBuilder};
use smol_str::SmolStr;

use crate::error::SearchError;
use crate::types::{Match, QueryMode, SearchOptions};

/// A compiled query.
///
/// Holds no scan state: every call to [`Matcher::scan`] starts from the
/// beginning of the text it is given.
#[derive(Clone, Debug)]
pub struct Matcher {
    regex: Regex,
}

impl Matcher {
    /// Compile `query` according to `options`.
    ///
    /// Literal queries are escaped, so they never fail to compile. Pattern
    /// queries that are not valid regular expressions yield
    /// [`SearchError::InvalidPattern`].
    pub fn new(query: &str, options: &SearchOptions) -> Result<Self, SearchError> {
        let source = match options.mode {
            QueryMode::Literal => regex::escape(query),
            QueryMode::Pattern => query.to_string(),
        };
        let regex = RegexBuilder::new(&source)
            .case_insensitive(!options.case_sensitive)
            .build()
            .map_err(|e| SearchError::InvalidPattern {
                pattern: SmolStr::new(query),
                message: e.to_string(),
            })?;
        Ok(Self { regex })
    }

    /// Find every non-empty, non-overlapping occurrence in `text`, left to
    /// right, reported at absolute positions starting from `base`.
    ///
    /// Zero-length matches are skipped, and the cursor moves at least one
    /// character past each of them so the scan always terminates.
    pub fn scan(&self, text: &str, base: usize) -> Vec<Match> {
        let mut matches = Vec::new();
        let mut cursor = 0;
        // Running byte/char offsets, so char positions are counted once.
        let mut counted_bytes = 0;
        let mut counted_chars = 0;

        while cursor <= text.len() {
            let Some(found) = self.regex.find_at(text, cursor) else {
                break;
            };

            if found.is_empty() {
                match text[found.end()..].chars().next() {
                    Some(c) => cursor = found.end() + c.len_utf8(),
                    None => break,
                }
                continue;
            }

            counted_chars += text[counted_bytes..found.start()].chars().count();
            let start = counted_chars;
            let len = found.as_str().chars().count();
            counted_chars += len;
            counted_bytes = found.end();

            matches.push(Match::new(base + start, base + start + len, found.as_str()));
            cursor = found.end();
        }

        matches
    }
}
