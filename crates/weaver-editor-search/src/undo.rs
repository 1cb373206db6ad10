//! Undo/redo management for document edits.
//!
//! Provides:
//! - `UndoManager` trait for abstracting undo implementations
//! - `History` - bounded stacks of whole-document snapshots
//!
//! Each atomic edit is one history step, so undoing a multi-range removal
//! restores every removed range at once.

use smol_str::SmolStr;

use crate::document::Document;

/// Default number of undo steps kept, matching the editor's undo depth.
pub const DEFAULT_HISTORY_DEPTH: usize = 50;

/// Trait for managing undo/redo operations.
///
/// Implementations must actually perform the undo/redo, not just track state.
pub trait UndoManager {
    /// Check if undo is available.
    fn can_undo(&self) -> bool;

    /// Check if redo is available.
    fn can_redo(&self) -> bool;

    /// Perform undo. Returns true if successful.
    fn undo(&mut self) -> bool;

    /// Perform redo. Returns true if successful.
    fn redo(&mut self) -> bool;

    /// Clear all undo/redo history.
    fn clear_history(&mut self);
}

/// A recorded document state.
#[derive(Debug, Clone)]
struct Snapshot {
    document: Document,
    /// What the edit that moved away from this state was, for logging.
    label: SmolStr,
}

/// Bounded undo/redo stacks of document snapshots.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    max_steps: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_DEPTH)
    }
}

impl History {
    pub fn new(max_steps: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_steps,
        }
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Record the state an edit is about to replace.
    pub fn record(&mut self, before: Document, label: impl Into<SmolStr>) {
        // Clear redo stack on new edit
        self.redo_stack.clear();
        if self.max_steps == 0 {
            return;
        }

        self.undo_stack.push(Snapshot {
            document: before,
            label: label.into(),
        });

        // Trim if over max
        while self.undo_stack.len() > self.max_steps {
            self.undo_stack.remove(0);
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Step back: returns the previous state and keeps `current` for redo.
    pub fn undo(&mut self, current: Document) -> Option<Document> {
        let snapshot = self.undo_stack.pop()?;
        tracing::debug!(edit = %snapshot.label, "undo");
        self.redo_stack.push(Snapshot {
            document: current,
            label: snapshot.label,
        });
        Some(snapshot.document)
    }

    /// Step forward again: returns the undone state and keeps `current` for undo.
    pub fn redo(&mut self, current: Document) -> Option<Document> {
        let snapshot = self.redo_stack.pop()?;
        tracing::debug!(edit = %snapshot.label, "redo");
        self.undo_stack.push(Snapshot {
            document: current,
            label: snapshot.label,
        });
        Some(snapshot.document)
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
