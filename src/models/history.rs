//! Linear undo/redo history of design actions.
//!
//! The log is a list of immutable entries plus a cursor. Recording after an
//! undo discards everything past the cursor; there is no branching.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{HistoryDirection, StudioError, StudioResult};

/// One recorded design action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Unique entry identifier
    pub id: Uuid,
    /// Human-readable description of the action
    pub action: String,
    /// When the action was recorded
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    fn new(action: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            action: action.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Ordered action log with a movable cursor.
///
/// # Invariant
///
/// `cursor` is `None` exactly when `entries` is empty; otherwise it indexes an
/// existing entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
    cursor: Option<usize>,
}

impl HistoryLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new action at the cursor.
    ///
    /// Any entries after the cursor are discarded before the new entry is
    /// appended; the cursor then points at the new entry.
    pub fn record(&mut self, action: impl Into<String>) -> &HistoryEntry {
        let keep = self.cursor.map_or(0, |cursor| cursor + 1);
        self.entries.truncate(keep);
        self.entries.push(HistoryEntry::new(action));

        let last = self.entries.len() - 1;
        self.cursor = Some(last);
        &self.entries[last]
    }

    /// Moves the cursor back one entry and returns the entry now current.
    pub fn undo(&mut self) -> StudioResult<&HistoryEntry> {
        match self.cursor {
            Some(cursor) if cursor > 0 => {
                self.cursor = Some(cursor - 1);
                Ok(&self.entries[cursor - 1])
            }
            _ => Err(StudioError::empty_history(HistoryDirection::Undo)),
        }
    }

    /// Moves the cursor forward one entry and returns the entry now current.
    pub fn redo(&mut self) -> StudioResult<&HistoryEntry> {
        match self.cursor {
            Some(cursor) if cursor + 1 < self.entries.len() => {
                self.cursor = Some(cursor + 1);
                Ok(&self.entries[cursor + 1])
            }
            _ => Err(StudioError::empty_history(HistoryDirection::Redo)),
        }
    }

    /// True when [`HistoryLog::undo`] would succeed.
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|cursor| cursor > 0)
    }

    /// True when [`HistoryLog::redo`] would succeed.
    pub fn can_redo(&self) -> bool {
        self.cursor
            .is_some_and(|cursor| cursor + 1 < self.entries.len())
    }

    /// Cursor position, if any entry exists.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Cursor as a signed index: `-1` for an empty log.
    #[allow(clippy::cast_possible_wrap)]
    pub fn history_index(&self) -> isize {
        self.cursor.map_or(-1, |cursor| cursor as isize)
    }

    /// The entry at the cursor.
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.cursor.map(|cursor| &self.entries[cursor])
    }

    /// All entries, oldest first, including those past the cursor.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
