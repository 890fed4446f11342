use serde::{Deserialize, Serialize};

/// Represents a named playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Playlist name, case preserved as created
    pub name: String,

    /// Video IDs (references Video::id), ordered, no duplicates
    video_ids: Vec<String>,
}

impl Playlist {
    /// Create a new empty playlist
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            video_ids: Vec::new(),
        }
    }

    /// Create a playlist with existing contents
    pub fn with_videos(name: impl Into<String>, video_ids: Vec<String>) -> Self {
        let mut playlist = Self::new(name);
        for id in video_ids {
            playlist.push(id);
        }
        playlist
    }

    pub fn contains(&self, video_id: &str) -> bool {
        self.video_ids.iter().any(|id| id == video_id)
    }

    /// Append a video, returns false if it was already present
    pub fn push(&mut self, video_id: String) -> bool {
        if self.contains(&video_id) {
            return false;
        }
        self.video_ids.push(video_id);
        true
    }

    /// Insert a video at `index` (clamped to the end)
    pub fn insert(&mut self, index: usize, video_id: String) -> bool {
        if self.contains(&video_id) {
            return false;
        }
        let index = index.min(self.video_ids.len());
        self.video_ids.insert(index, video_id);
        true
    }

    /// Remove a video, returning the index it occupied
    pub fn remove(&mut self, video_id: &str) -> Option<usize> {
        let index = self.video_ids.iter().position(|id| id == video_id)?;
        self.video_ids.remove(index);
        Some(index)
    }

    /// Empty the playlist and hand back its previous contents in order
    pub fn clear(&mut self) -> Vec<String> {
        std::mem::take(&mut self.video_ids)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.video_ids.get(index).map(String::as_str)
    }

    pub fn video_ids(&self) -> &[String] {
        &self.video_ids
    }

    /// Number of videos in this playlist
    pub fn len(&self) -> usize {
        self.video_ids.len()
    }

    /// Check if playlist is empty
    pub fn is_empty(&self) -> bool {
        self.video_ids.is_empty()
    }
}
