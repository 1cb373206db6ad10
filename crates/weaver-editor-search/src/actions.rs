//! Editor commands.
//!
//! Platform-agnostic definitions of the operations a UI layer can invoke on
//! an editing session. Toolbars, dialogs and key bindings all end up
//! producing one of these.

use smol_str::SmolStr;

use crate::types::QueryMode;

/// A command understood by [`crate::execute::execute_command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCommand {
    /// Search the document and cache matches for display.
    FindText { query: SmolStr },
    /// Remove every occurrence of the query in one atomic edit.
    RemoveText { query: SmolStr },
    /// Drop cached matches.
    ClearSearch,
    SetCaseSensitive(bool),
    SetQueryMode(QueryMode),
    Undo,
    Redo,
}

impl EditorCommand {
    pub fn find_text(query: impl Into<SmolStr>) -> Self {
        EditorCommand::FindText {
            query: query.into(),
        }
    }

    pub fn remove_text(query: impl Into<SmolStr>) -> Self {
        EditorCommand::RemoveText {
            query: query.into(),
        }
    }

    /// The command's name as the editor registers it.
    pub fn name(&self) -> &'static str {
        match self {
            EditorCommand::FindText { .. } => "findText",
            EditorCommand::RemoveText { .. } => "removeText",
            EditorCommand::ClearSearch => "clearSearch",
            EditorCommand::SetCaseSensitive(_) => "setCaseSensitive",
            EditorCommand::SetQueryMode(_) => "setQueryMode",
            EditorCommand::Undo => "undo",
            EditorCommand::Redo => "redo",
        }
    }

    /// Whether running this command can change the document.
    pub fn is_destructive(&self) -> bool {
        matches!(
            self,
            EditorCommand::RemoveText { .. } | EditorCommand::Undo | EditorCommand::Redo
        )
    }
}
