//! Editing sessions: a document plus its search state and history.
//!
//! Defines the `SearchHost` trait for anything that owns a document and can
//! run the find/remove command pair against it, and `EditorSession`, a plain
//! field-based implementation.

use std::sync::Arc;

use crate::document::Document;
use crate::engine::{SearchEngine, SubscriptionId};
use crate::error::SearchError;
use crate::search::is_blank;
use crate::state::SearchState;
use crate::types::{Match, QueryMode, SearchOptions};
use crate::undo::{DEFAULT_HISTORY_DEPTH, History, UndoManager};

/// Core trait for hosts of the find-and-remove commands.
///
/// A host owns one document and one search engine. Different hosts can store
/// them however they like (plain fields, reactive signals) while sharing the
/// command logic provided here.
pub trait SearchHost {
    // === Required: Document access ===

    /// The current document.
    fn document(&self) -> &Document;

    /// Replace the document with the result of an atomic edit.
    ///
    /// `label` describes the edit, for history and logging.
    fn commit(&mut self, document: Document, label: &str);

    // === Required: Search state ===

    fn engine(&self) -> &SearchEngine;

    fn engine_mut(&mut self) -> &mut SearchEngine;

    /// Borrow the document and the engine together.
    fn parts_mut(&mut self) -> (&Document, &mut SearchEngine);

    /// Options applied by `find_text` and `remove_text`.
    fn options(&self) -> SearchOptions;

    fn set_options(&mut self, options: SearchOptions);

    // === Provided: Commands ===

    /// Search the document and cache the matches for display.
    ///
    /// Returns false for a blank query (after clearing the cache), true for
    /// any other query regardless of how many matches it found.
    fn find_text(&mut self, query: &str) -> Result<bool, SearchError> {
        let options = self.options();
        let (document, engine) = self.parts_mut();
        engine.find(document, query, options)?;
        Ok(!is_blank(query))
    }

    /// Remove every occurrence of `query` in one atomic edit.
    ///
    /// Returns true if at least one occurrence was removed. The match cache
    /// is cleared whatever the outcome.
    fn remove_text(&mut self, query: &str) -> Result<bool, SearchError> {
        let options = self.options();
        let (document, engine) = self.parts_mut();
        match engine.removal(document, query, options)? {
            Some(removal) => {
                tracing::info!(query, removed = removal.removed, "removeText");
                self.commit(removal.document, &format!("remove {query:?}"));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Drop cached matches.
    fn clear_search(&mut self) {
        self.engine_mut().clear();
    }

    // === Provided: Convenience accessors ===

    /// Matches of the last search.
    fn matches(&self) -> Arc<[Match]> {
        self.engine().matches()
    }

    fn search_state(&self) -> &SearchState {
        self.engine().state()
    }

    fn set_case_sensitive(&mut self, case_sensitive: bool) {
        let options = self.options().case_sensitive(case_sensitive);
        self.set_options(options);
    }

    fn set_query_mode(&mut self, mode: QueryMode) {
        let options = self.options().mode(mode);
        self.set_options(options);
    }
}

/// Simple field-based implementation of `SearchHost` with undo support.
///
/// Owned by one editing session at a time; every mutating operation takes
/// `&mut self`, so operations cannot interleave.
#[derive(Debug)]
pub struct EditorSession {
    document: Document,
    engine: SearchEngine,
    history: History,
    options: SearchOptions,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(Document::default())
    }
}

impl EditorSession {
    /// Create a session with default options and history depth.
    pub fn new(document: Document) -> Self {
        Self {
            document,
            engine: SearchEngine::new(),
            history: History::new(DEFAULT_HISTORY_DEPTH),
            options: SearchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_history_depth(mut self, depth: usize) -> Self {
        self.history = History::new(depth);
        self
    }

    /// Observe every replacement of the cached search state.
    pub fn subscribe(&mut self, observer: impl FnMut(&SearchState) + 'static) -> SubscriptionId {
        self.engine.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.engine.unsubscribe(id)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn into_document(self) -> Document {
        self.document
    }
}

impl SearchHost for EditorSession {
    fn document(&self) -> &Document {
        &self.document
    }

    fn commit(&mut self, document: Document, label: &str) {
        let before = std::mem::replace(&mut self.document, document);
        self.history.record(before, label);
    }

    fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    fn engine_mut(&mut self) -> &mut SearchEngine {
        &mut self.engine
    }

    fn parts_mut(&mut self) -> (&Document, &mut SearchEngine) {
        (&self.document, &mut self.engine)
    }

    fn options(&self) -> SearchOptions {
        self.options
    }

    fn set_options(&mut self, options: SearchOptions) {
        self.options = options;
    }
}

impl UndoManager for EditorSession {
    fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // Undo and redo move every position, so cached matches are dropped.
    fn undo(&mut self) -> bool {
        let current = self.document.clone();
        let Some(previous) = self.history.undo(current) else {
            return false;
        };
        self.document = previous;
        self.engine.clear();
        true
    }

    fn redo(&mut self) -> bool {
        let current = self.document.clone();
        let Some(next) = self.history.redo(current) else {
            return false;
        };
        self.document = next;
        self.engine.clear();
        true
    }

    fn clear_history(&mut self) {
        self.history.clear();
    }
}
