//! The search engine: find and remove with a cached, observable result.
//!
//! `SearchEngine` wraps the pure functions in [`crate::search`] with the
//! state a UI needs to display matches:
//!
//! ```text
//! EMPTY --find(query)--> HAS_MATCHES --remove()--> EMPTY
//! EMPTY --find("")-----> EMPTY
//! HAS_MATCHES --find(other)--> HAS_MATCHES | EMPTY
//! any --remove() with no matches--> EMPTY
//! ```
//!
//! Removal always recomputes matches against the document it is given, so a
//! stale cache can never drive a deletion.

use std::fmt;
use std::sync::Arc;

use crate::document::Document;
use crate::error::SearchError;
use crate::search::{Removal, find_matches, is_blank, remove_matches};
use crate::state::SearchState;
use crate::types::{Match, SearchOptions};

/// Callback invoked with the new state every time the engine replaces it.
pub type SearchObserver = Box<dyn FnMut(&SearchState)>;

/// Handle returned by [`SearchEngine::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Finds and removes text in documents, remembering the last result.
#[derive(Default)]
pub struct SearchEngine {
    state: SearchState,
    observers: Vec<(SubscriptionId, SearchObserver)>,
    next_subscription: u64,
}

impl fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchEngine")
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current cached state.
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// The current cached matches.
    pub fn matches(&self) -> Arc<[Match]> {
        self.state.matches().clone()
    }

    /// Register an observer. It is called on every state replacement,
    /// including resets to empty.
    pub fn subscribe(&mut self, observer: impl FnMut(&SearchState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    /// Find every occurrence of `query` in `doc` and cache the result.
    ///
    /// A blank query clears the cache and returns no matches. An invalid
    /// pattern is returned as an error and leaves the cache as it was.
    pub fn find(
        &mut self,
        doc: &Document,
        query: &str,
        options: SearchOptions,
    ) -> Result<Arc<[Match]>, SearchError> {
        if is_blank(query) {
            self.clear();
            return Ok(self.matches());
        }

        let matches = find_matches(doc, query, &options).inspect_err(|e| {
            tracing::warn!(query, error = %e, "search failed");
        })?;
        tracing::debug!(query, matches = matches.len(), "found matches");
        self.publish(SearchState::new(query, options.case_sensitive, matches));
        Ok(self.matches())
    }

    /// Remove every occurrence of `query` from `doc` in one atomic edit.
    ///
    /// Returns `Ok(true)` if anything was removed. The cache is cleared
    /// whatever the outcome, and on error `doc` is left unchanged.
    pub fn remove(
        &mut self,
        doc: &mut Document,
        query: &str,
        options: SearchOptions,
    ) -> Result<bool, SearchError> {
        match self.removal(doc, query, options)? {
            Some(removal) => {
                *doc = removal.document;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Like [`SearchEngine::remove`], but hands back the edited document
    /// instead of writing it, for hosts that record history on commit.
    pub fn removal(
        &mut self,
        doc: &Document,
        query: &str,
        options: SearchOptions,
    ) -> Result<Option<Removal>, SearchError> {
        let outcome = remove_matches(doc, query, &options);
        self.clear();
        outcome.inspect_err(|e| {
            tracing::warn!(query, error = %e, "remove failed");
        })
    }

    /// Replace the cached state with a fresh empty one.
    pub fn clear(&mut self) {
        self.publish(SearchState::empty());
    }

    /// Replace the cached state and notify observers.
    pub fn publish(&mut self, state: SearchState) {
        self.state = state;
        for (_, observer) in &mut self.observers {
            observer(&self.state);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::document::Node;
    use crate::error::EditError;

    fn doc(text: &str) -> Document {
        Document::new(vec![Node::paragraph(vec![Node::text(text)])])
    }

    #[test]
    fn test_find_caches_matches() {
        let mut engine = SearchEngine::new();
        let matches = engine
            .find(&doc("foo bar foo"), "foo", SearchOptions::new())
            .unwrap();
        assert_eq!(matches.len(), 2);
        assert!(Arc::ptr_eq(&matches, engine.state().matches()));
        assert_eq!(engine.state().query(), "foo");
    }

    #[test]
    fn test_blank_query_clears() {
        let mut engine = SearchEngine::new();
        let d = doc("foo");
        engine.find(&d, "foo", SearchOptions::new()).unwrap();
        assert_eq!(engine.state().len(), 1);

        let matches = engine.find(&d, "   ", SearchOptions::new()).unwrap();
        assert!(matches.is_empty());
        assert!(engine.state().is_empty());
        assert_eq!(engine.state().query(), "");
    }

    #[test]
    fn test_invalid_pattern_keeps_cache() {
        let mut engine = SearchEngine::new();
        let d = doc("foo");
        engine.find(&d, "foo", SearchOptions::new()).unwrap();

        let result = engine.find(&d, "[", SearchOptions::new().pattern());
        assert!(matches!(result, Err(SearchError::InvalidPattern { .. })));
        assert_eq!(engine.state().len(), 1);
    }

    #[test]
    fn test_remove_clears_and_edits() {
        let mut engine = SearchEngine::new();
        let mut d = doc("foo bar foo");
        engine.find(&d, "foo", SearchOptions::new()).unwrap();

        assert!(engine.remove(&mut d, "foo", SearchOptions::new()).unwrap());
        assert_eq!(d.text_content(), " bar ");
        assert!(engine.state().is_empty());
    }

    #[test]
    fn test_remove_without_matches() {
        let mut engine = SearchEngine::new();
        let mut d = doc("foo");
        let before = d.clone();

        assert!(!engine.remove(&mut d, "zzz", SearchOptions::new()).unwrap());
        assert_eq!(d, before);
        assert!(engine.state().is_empty());
    }

    #[test]
    fn test_remove_blank_query() {
        let mut engine = SearchEngine::new();
        let mut d = doc("foo");
        assert!(!engine.remove(&mut d, "", SearchOptions::new()).unwrap());
        assert_eq!(d.text_content(), "foo");
    }

    #[test]
    fn test_removal_leaves_document_to_caller() {
        let mut engine = SearchEngine::new();
        let d = doc("a-b-c");
        engine.find(&d, "-", SearchOptions::new()).unwrap();

        let removal = engine
            .removal(&d, "-", SearchOptions::new())
            .unwrap()
            .unwrap();
        assert_eq!(removal.removed, 2);
        assert_eq!(removal.document.text_content(), "abc");
        assert_eq!(d.text_content(), "a-b-c");
        assert!(engine.state().is_empty());

        assert!(engine.removal(&d, "x", SearchOptions::new()).unwrap().is_none());
    }

    #[test]
    fn test_remove_without_prior_find() {
        let mut engine = SearchEngine::new();
        let mut d = doc("a-b-c");
        assert!(engine.remove(&mut d, "-", SearchOptions::new()).unwrap());
        assert_eq!(d.text_content(), "abc");
    }

    #[test]
    fn test_remove_recomputes_after_mutation() {
        let mut engine = SearchEngine::new();
        let mut d = doc("xx foo");
        engine.find(&d, "foo", SearchOptions::new()).unwrap();
        assert_eq!(engine.state().matches()[0].range(), 4..7);

        // The document changes behind the engine's back.
        d = doc("foo");
        assert!(engine.remove(&mut d, "foo", SearchOptions::new()).unwrap());
        assert_eq!(d.text_content(), "");
    }

    #[test]
    fn test_remove_error_clears_cache() {
        let mut engine = SearchEngine::new();
        let mut d = doc("foo");
        engine.find(&d, "foo", SearchOptions::new()).unwrap();

        let result = engine.remove(&mut d, "(", SearchOptions::new().pattern());
        assert!(result.is_err());
        assert!(engine.state().is_empty());
        assert_eq!(d.text_content(), "foo");
        // Edit errors convert into search errors.
        let err: SearchError = EditError::NotInText { start: 0, end: 1 }.into();
        assert!(matches!(err, SearchError::Edit(_)));
    }

    #[test]
    fn test_observers_see_new_identity() {
        let mut engine = SearchEngine::new();
        let seen: Rc<RefCell<Vec<SearchState>>> = Rc::default();
        let sink = seen.clone();
        engine.subscribe(move |state| sink.borrow_mut().push(state.clone()));

        let d = doc("foo foo");
        engine.find(&d, "foo", SearchOptions::new()).unwrap();
        engine.find(&d, "foo", SearchOptions::new()).unwrap();
        engine.clear();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].matches(), seen[1].matches());
        assert!(!seen[0].same_matches(&seen[1]));
        assert!(seen[2].is_empty());
    }

    #[test]
    fn test_unsubscribe() {
        let mut engine = SearchEngine::new();
        let calls = Rc::new(RefCell::new(0));
        let counter = calls.clone();
        let id = engine.subscribe(move |_| *counter.borrow_mut() += 1);

        engine.clear();
        assert!(engine.unsubscribe(id));
        assert!(!engine.unsubscribe(id));
        engine.clear();

        assert_eq!(*calls.borrow(), 1);
    }
}
