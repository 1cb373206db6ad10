//! weaver-editor-search: find and remove text in rich text documents.
//!
//! This crate provides:
//! - `Document` - tree-structured content with absolute position addressing
//! - `SearchEngine` - match cache with change notification
//! - `apply_edit` - atomic multi-range deletion
//! - `SearchHost` trait and `EditorSession` - the findText/removeText commands
//! - Editor JSON import and export

pub mod actions;
pub mod document;
pub mod engine;
pub mod error;
pub mod execute;
pub mod json;
pub mod search;
pub mod session;
pub mod state;
pub mod transform;
pub mod types;
pub mod undo;

pub use actions::EditorCommand;
pub use document::{Attrs, Descendants, Document, Mark, Node};
pub use engine::{SearchEngine, SearchObserver, SubscriptionId};
pub use error::{EditError, JsonError, SearchError, UnknownQueryMode};
pub use execute::execute_command;
pub use json::ATOM_TYPES;
pub use search::{Matcher, Removal, find_matches, is_blank, remove_matches};
pub use session::{EditorSession, SearchHost};
pub use smol_str::SmolStr;
pub use state::SearchState;
pub use transform::apply_edit;
pub use types::{Match, QueryMode, SearchOptions};
pub use undo::{DEFAULT_HISTORY_DEPTH, History, UndoManager};
