//! Error types for player operations

use thiserror::Error;

/// Broad category of a failure, used when reporting and in tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    DuplicateName,
    InvalidState,
    BoundaryReached,
    InvalidInput,
    NothingToUndo,
}

/// Failure of a player operation
///
/// The messages are the user-visible suffix; the dispatcher prefixes them
/// with the operation that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayerError {
    #[error("Video does not exist")]
    VideoNotFound,

    #[error("Video is currently flagged (reason: {reason})")]
    VideoFlagged { reason: String },

    #[error("No video is currently playing")]
    NothingPlaying,

    #[error("Video is already paused")]
    AlreadyPaused,

    #[error("Video is not paused")]
    NotPaused,

    #[error("No videos available")]
    NoVideosAvailable,

    #[error("Playlist does not exist")]
    PlaylistNotFound,

    #[error("A playlist with the same name already exists")]
    DuplicateName,

    #[error("Video already added")]
    AlreadyInPlaylist,

    #[error("Video is not in playlist")]
    NotInPlaylist,

    #[error("Playlist is empty")]
    EmptyPlaylist,

    #[error("No playlist playing")]
    NoActivePlaylist,

    #[error("Already playing first video in playlist")]
    AtFirstVideo,

    #[error("Already playing last video in playlist")]
    AtLastVideo,

    #[error("Video is already flagged")]
    AlreadyFlagged,

    #[error("Video is not flagged")]
    NotFlagged,

    #[error("Score should be from 1 to 5, got {0}")]
    InvalidScore(i64),

    #[error("No result numbered {0}")]
    InvalidIndex(usize),

    #[error("Nothing to undo")]
    NothingToUndo,
}

impl PlayerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlayerError::VideoNotFound | PlayerError::PlaylistNotFound => ErrorKind::NotFound,
            PlayerError::DuplicateName => ErrorKind::DuplicateName,
            PlayerError::VideoFlagged { .. }
            | PlayerError::NothingPlaying
            | PlayerError::AlreadyPaused
            | PlayerError::NotPaused
            | PlayerError::NoVideosAvailable
            | PlayerError::AlreadyInPlaylist
            | PlayerError::NotInPlaylist
            | PlayerError::NoActivePlaylist
            | PlayerError::AlreadyFlagged
            | PlayerError::NotFlagged => ErrorKind::InvalidState,
            PlayerError::AtFirstVideo | PlayerError::AtLastVideo | PlayerError::EmptyPlaylist => {
                ErrorKind::BoundaryReached
            }
            PlayerError::InvalidScore(_) | PlayerError::InvalidIndex(_) => ErrorKind::InvalidInput,
            PlayerError::NothingToUndo => ErrorKind::NothingToUndo,
        }
    }
}

pub type PlayerResult<T> = std::result::Result<T, PlayerError>;
