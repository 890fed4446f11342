//! The single playback slot

use crate::error::{PlayerError, PlayerResult};

/// Which video is loaded, whether it is paused, and which playlist (if any)
/// is driving NEXT/PREVIOUS
///
/// Videos are referenced by id. `paused` only means something while a
/// video is loaded, and the position only while a playlist is active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackState {
    current: Option<String>,
    paused: bool,
    active_playlist: Option<String>,
    position: usize,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self::default()
    }

    /// ID of the loaded video
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn is_paused(&self) -> bool {
        self.current.is_some() && self.paused
    }

    pub fn is_playing(&self, video_id: &str) -> bool {
        self.current.as_deref() == Some(video_id)
    }

    pub fn active_playlist(&self) -> Option<&str> {
        self.active_playlist.as_deref()
    }

    /// Position in the active playlist, `None` when no playlist is active
    pub fn position(&self) -> Option<usize> {
        self.active_playlist.as_ref().map(|_| self.position)
    }

    /// Load a video unpaused, returning whatever was loaded before
    pub(crate) fn load(&mut self, video_id: String) -> Option<String> {
        self.paused = false;
        self.current.replace(video_id)
    }

    /// Unload the current video, returning its id
    pub(crate) fn stop(&mut self) -> PlayerResult<String> {
        let stopped = self.current.take().ok_or(PlayerError::NothingPlaying)?;
        self.paused = false;
        Ok(stopped)
    }

    pub(crate) fn pause(&mut self) -> PlayerResult<&str> {
        let current = self.current.as_deref().ok_or(PlayerError::NothingPlaying)?;
        if self.paused {
            return Err(PlayerError::AlreadyPaused);
        }
        self.paused = true;
        Ok(current)
    }

    pub(crate) fn resume(&mut self) -> PlayerResult<&str> {
        let current = self.current.as_deref().ok_or(PlayerError::NothingPlaying)?;
        if !self.paused {
            return Err(PlayerError::NotPaused);
        }
        self.paused = false;
        Ok(current)
    }

    pub(crate) fn set_active(&mut self, playlist: String, position: usize) {
        self.active_playlist = Some(playlist);
        self.position = position;
    }

    pub(crate) fn set_position(&mut self, position: usize) {
        self.position = position;
    }

    pub(crate) fn is_active(&self, playlist: &str) -> bool {
        self.active_playlist.as_deref() == Some(playlist)
    }

    /// Clear the active playlist, returning its name and position
    pub(crate) fn close_active(&mut self) -> PlayerResult<(String, usize)> {
        let name = self
            .active_playlist
            .take()
            .ok_or(PlayerError::NoActivePlaylist)?;
        let position = std::mem::take(&mut self.position);
        Ok((name, position))
    }
}
