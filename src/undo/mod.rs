//! Undo/redo command history
//!
//! A two-stack history of [`Command`]s. Each command pairs two tagged
//! snapshots: the state to restore on undo and the state to restore on redo.
//! Registration always follows the mutation it describes and clears the redo
//! stack, so replay is deterministic.

use serde::{Deserialize, Serialize};

use crate::models::note::Note;
use crate::models::score;

/// The state a command restores, tagged by scope
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Snapshot {
    /// One note, replaced in place
    Note { index: usize, note: Note },
    /// The whole score
    Score { notes: Vec<Note> },
}

impl Snapshot {
    /// Restore this snapshot into the owning sequence and relink it
    pub fn apply(&self, notes: &mut Vec<Note>) {
        match self {
            Snapshot::Note { index, note } => {
                if *index < notes.len() {
                    notes[*index] = note.clone();
                }
            }
            Snapshot::Score { notes: replacement } => {
                *notes = replacement.clone();
            }
        }
        score::relink(notes);
    }
}

/// A reversible edit
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Command {
    /// Human-readable description for the UI affordance
    pub summary: String,
    /// Whether the command changes the note count; callers use this to
    /// invalidate caches keyed by note index
    pub all: bool,
    pub undo: Snapshot,
    pub redo: Snapshot,
}

impl Command {
    /// Command over a single note
    pub fn note(summary: impl Into<String>, index: usize, before: Note, after: Note) -> Self {
        Self {
            summary: summary.into(),
            all: false,
            undo: Snapshot::Note {
                index,
                note: before,
            },
            redo: Snapshot::Note { index, note: after },
        }
    }

    /// Command over the whole score
    pub fn score(
        summary: impl Into<String>,
        all: bool,
        before: Vec<Note>,
        after: Vec<Note>,
    ) -> Self {
        Self {
            summary: summary.into(),
            all,
            undo: Snapshot::Score { notes: before },
            redo: Snapshot::Score { notes: after },
        }
    }
}

/// Two-stack undo/redo manager
///
/// Single-writer: callers serialize access (one event-handling thread);
/// the manager performs no internal synchronization.
#[derive(Debug, Default)]
pub struct History {
    undo_stack: Vec<Command>,
    redo_stack: Vec<Command>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a freshly executed command; new actions invalidate forward history
    pub fn register(&mut self, command: Command) {
        self.undo_stack.push(command);
        self.redo_stack.clear();
    }

    /// Move the top command to the redo stack and return its undo snapshot
    ///
    /// Empty stack logs a warning and returns `None`; callers are expected
    /// to disable the affordance instead of reaching this.
    pub fn undo(&mut self) -> Option<Snapshot> {
        let Some(command) = self.undo_stack.pop() else {
            log::warn!("undo requested with an empty undo stack");
            return None;
        };
        let snapshot = command.undo.clone();
        self.redo_stack.push(command);
        Some(snapshot)
    }

    /// Mirror of [`History::undo`]
    pub fn redo(&mut self) -> Option<Snapshot> {
        let Some(command) = self.redo_stack.pop() else {
            log::warn!("redo requested with an empty redo stack");
            return None;
        };
        let snapshot = command.redo.clone();
        self.undo_stack.push(command);
        Some(snapshot)
    }

    /// Summary of the command `undo` would revert
    pub fn undo_summary(&self) -> Option<&str> {
        self.undo_stack.last().map(|c| c.summary.as_str())
    }

    /// Summary of the command `redo` would replay
    pub fn redo_summary(&self) -> Option<&str> {
        self.redo_stack.last().map(|c| c.summary.as_str())
    }

    /// Whether the next undo changes the note count
    pub fn undo_all(&self) -> bool {
        self.undo_stack.last().is_some_and(|c| c.all)
    }

    /// Whether the next redo changes the note count
    pub fn redo_all(&self) -> bool {
        self.redo_stack.last().is_some_and(|c| c.all)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Empty both stacks (called on new-score load)
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sung(lyric: &str) -> Note {
        let mut n = Note::new();
        n.lyric = Some(lyric.to_string());
        n
    }

    #[test]
    fn register_clears_forward_history() {
        let mut history = History::new();
        history.register(Command::note("edit a", 0, sung("あ"), sung("か")));
        history.undo();
        assert!(history.can_redo());

        history.register(Command::note("edit b", 0, sung("あ"), sung("さ")));
        assert!(!history.can_redo());
        assert_eq!(history.undo_summary(), Some("edit b"));
    }

    #[test]
    fn undo_then_redo_restores_both_snapshots() {
        let mut history = History::new();
        let before = vec![sung("あ")];
        let after = vec![sung("か")];
        history.register(Command::score("batch", false, before.clone(), after.clone()));

        let mut notes = after.clone();
        history.undo().unwrap().apply(&mut notes);
        assert_eq!(notes[0].lyric, before[0].lyric);

        history.redo().unwrap().apply(&mut notes);
        assert_eq!(notes[0].lyric, after[0].lyric);
    }

    #[test]
    fn underflow_is_ignored() {
        let mut history = History::new();
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
    }

    #[test]
    fn all_flag_surfaces_for_the_top_command() {
        let mut history = History::new();
        history.register(Command::score(
            "delete notes",
            true,
            vec![sung("あ")],
            vec![],
        ));
        assert!(history.undo_all());
        history.undo();
        assert!(history.redo_all());
        assert!(!history.undo_all());
    }

    #[test]
    fn clear_empties_both_stacks() {
        let mut history = History::new();
        history.register(Command::note("edit", 0, sung("あ"), sung("か")));
        history.undo();
        history.clear();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.undo_summary(), None);
    }
}
