use super::Video;
use std::collections::HashMap;

/// The fixed set of videos loaded at startup
///
/// Only a video's flag and rating fields change after loading; the set of
/// IDs never does.
#[derive(Debug, Clone, Default)]
pub struct VideoCatalog {
    /// All videos indexed by their ID
    videos: HashMap<String, Video>,
}

impl VideoCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a video, returns false (and keeps the existing one) if the ID is taken
    pub fn add_video(&mut self, video: Video) -> bool {
        if self.videos.contains_key(&video.id) {
            return false;
        }
        self.videos.insert(video.id.clone(), video);
        true
    }

    /// Get a video by ID
    pub fn get(&self, id: &str) -> Option<&Video> {
        self.videos.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Video> {
        self.videos.get_mut(id)
    }

    /// All videos, in no particular order
    pub fn videos(&self) -> impl Iterator<Item = &Video> {
        self.videos.values()
    }

    /// Total number of videos
    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }
}

impl FromIterator<Video> for VideoCatalog {
    fn from_iter<I: IntoIterator<Item = Video>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for video in iter {
            catalog.add_video(video);
        }
        catalog
    }
}
