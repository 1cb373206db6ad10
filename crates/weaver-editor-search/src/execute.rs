//! Command execution for editing sessions.
//!
//! This module provides the `execute_command` function that applies
//! `EditorCommand` operations to any type implementing `SearchHost` and
//! `UndoManager`. The logic is generic and platform-agnostic.

use crate::actions::EditorCommand;
use crate::error::SearchError;
use crate::session::SearchHost;
use crate::undo::UndoManager;

/// Execute an editor command on a host.
///
/// This is the central dispatch point for all commands. Returns the
/// command's boolean result: for `FindText` whether the query was non-blank,
/// for `RemoveText` whether anything was removed, for `Undo`/`Redo` whether
/// there was a step to take, and true for setting changes.
pub fn execute_command<H: SearchHost + UndoManager>(
    host: &mut H,
    command: &EditorCommand,
) -> Result<bool, SearchError> {
    tracing::trace!(command = command.name(), "execute");
    match command {
        EditorCommand::FindText { query } => host.find_text(query),
        EditorCommand::RemoveText { query } => host.remove_text(query),
        EditorCommand::ClearSearch => {
            host.clear_search();
            Ok(true)
        }
        EditorCommand::SetCaseSensitive(case_sensitive) => {
            host.set_case_sensitive(*case_sensitive);
            Ok(true)
        }
        EditorCommand::SetQueryMode(mode) => {
            host.set_query_mode(*mode);
            Ok(true)
        }
        EditorCommand::Undo => Ok(host.undo()),
        EditorCommand::Redo => Ok(host.redo()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, Node};
    use crate::session::EditorSession;
    use crate::types::QueryMode;

    fn session(text: &str) -> EditorSession {
        EditorSession::new(Document::new(vec![Node::paragraph(vec![Node::text(
            text,
        )])]))
    }

    #[test]
    fn test_find_then_remove() {
        let mut s = session("red green red");
        assert!(execute_command(&mut s, &EditorCommand::find_text("red")).unwrap());
        assert_eq!(s.matches().len(), 2);

        assert!(execute_command(&mut s, &EditorCommand::remove_text("red")).unwrap());
        assert_eq!(s.document().text_content(), " green ");
        assert!(s.matches().is_empty());
    }

    #[test]
    fn test_remove_reports_false_when_nothing_matches() {
        let mut s = session("red");
        assert!(!execute_command(&mut s, &EditorCommand::remove_text("blue")).unwrap());
    }

    #[test]
    fn test_settings_commands() {
        let mut s = session("Red red");
        execute_command(&mut s, &EditorCommand::SetCaseSensitive(true)).unwrap();
        execute_command(&mut s, &EditorCommand::find_text("Red")).unwrap();
        assert_eq!(s.matches().len(), 1);

        execute_command(&mut s, &EditorCommand::SetQueryMode(QueryMode::Pattern)).unwrap();
        execute_command(&mut s, &EditorCommand::find_text("[Rr]ed")).unwrap();
        assert_eq!(s.matches().len(), 2);

        execute_command(&mut s, &EditorCommand::ClearSearch).unwrap();
        assert!(s.matches().is_empty());
    }

    #[test]
    fn test_undo_redo_commands() {
        let mut s = session("abc");
        assert!(!execute_command(&mut s, &EditorCommand::Undo).unwrap());

        execute_command(&mut s, &EditorCommand::remove_text("b")).unwrap();
        assert!(execute_command(&mut s, &EditorCommand::Undo).unwrap());
        assert_eq!(s.document().text_content(), "abc");
        assert!(execute_command(&mut s, &EditorCommand::Redo).unwrap());
        assert_eq!(s.document().text_content(), "ac");
    }

    #[test]
    fn test_invalid_pattern_surfaces() {
        let mut s = session("abc");
        execute_command(&mut s, &EditorCommand::SetQueryMode(QueryMode::Pattern)).unwrap();
        let result = execute_command(&mut s, &EditorCommand::find_text("a("));
        assert!(matches!(result, Err(SearchError::InvalidPattern { .. })));
    }
}
