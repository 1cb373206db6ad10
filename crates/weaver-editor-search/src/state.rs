//! Cached search results for a UI layer.

use std::sync::Arc;

use smol_str::SmolStr;

use crate::types::Match;

/// The last search of an editing session.
///
/// The match list is an immutable shared slice that is replaced, never
/// mutated, so observers can detect a change with [`SearchState::same_matches`]
/// (pointer identity) instead of comparing contents.
#[derive(Clone, Debug)]
pub struct SearchState {
    matches: Arc<[Match]>,
    query: SmolStr,
    case_sensitive: bool,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::empty()
    }
}

impl SearchState {
    /// No query, no matches.
    pub fn empty() -> Self {
        Self {
            matches: Arc::from(Vec::new()),
            query: SmolStr::default(),
            case_sensitive: false,
        }
    }

    pub fn new(query: impl Into<SmolStr>, case_sensitive: bool, matches: Vec<Match>) -> Self {
        Self {
            matches: Arc::from(matches),
            query: query.into(),
            case_sensitive,
        }
    }

    pub fn matches(&self) -> &Arc<[Match]> {
        &self.matches
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// True if both states share the very same match list.
    pub fn same_matches(&self, other: &SearchState) -> bool {
        Arc::ptr_eq(&self.matches, &other.matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_state() {
        let state = SearchState::empty();
        assert!(state.is_empty());
        assert_eq!(state.query(), "");
        assert!(!state.case_sensitive());
    }

    #[test]
    fn test_identity_changes_on_replace() {
        let a = SearchState::new("foo", false, vec![Match::new(1, 4, "foo")]);
        let b = SearchState::new("foo", false, vec![Match::new(1, 4, "foo")]);
        assert_eq!(a.matches(), b.matches());
        assert!(!a.same_matches(&b));

        let clone = a.clone();
        assert!(a.same_matches(&clone));
    }

    #[test]
    fn test_fresh_empty_states_are_distinct() {
        assert!(!SearchState::empty().same_matches(&SearchState::empty()));
    }
}
