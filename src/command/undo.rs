//! Single-level undo

use crate::model::Playlist;

/// The operation that reverses one successful mutating command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inverse {
    Stop,
    Play(String),
    Pause,
    Resume,
    DeletePlaylist(String),
    /// Bring back a deleted playlist with its former contents, reopening it
    /// at `position` if it was the active playlist
    RecreatePlaylist { playlist: Playlist, position: Option<usize> },
    RemoveFromPlaylist { playlist: String, video_id: String },
    InsertIntoPlaylist {
        playlist: String,
        video_id: String,
        index: usize,
        /// Active position before the removal
        position: Option<usize>,
    },
    /// Snapshot of a cleared playlist, in its original order
    RestorePlaylist {
        playlist: String,
        video_ids: Vec<String>,
        position: Option<usize>,
    },
    ClosePlaylist,
    ReopenPlaylist { playlist: String, position: usize },
    Next,
    Previous,
    Unflag(String),
    Flag { video_id: String, reason: String },
}

/// What was done and how to reverse it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoRecord {
    /// Verb of the command being reversed, for messages
    pub command: &'static str,
    pub inverse: Inverse,
}

impl UndoRecord {
    pub fn new(command: &'static str, inverse: Inverse) -> Self {
        Self { command, inverse }
    }
}

/// Holds at most one record; a new record replaces the old one
#[derive(Debug, Clone, Default)]
pub struct UndoLedger {
    last: Option<UndoRecord>,
}

impl UndoLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, record: UndoRecord) {
        log::debug!("Undo ledger: {} -> {:?}", record.command, record.inverse);
        self.last = Some(record);
    }

    pub fn clear(&mut self) {
        self.last = None;
    }

    /// Remove and return the record, leaving the ledger empty
    pub fn take(&mut self) -> Option<UndoRecord> {
        self.last.take()
    }

    pub fn peek(&self) -> Option<&UndoRecord> {
        self.last.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.last.is_none()
    }
}
