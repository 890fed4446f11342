//! Named playlists with case-insensitive name resolution

use crate::error::{PlayerError, PlayerResult};
use crate::model::{Playlist, VideoCatalog};

/// All playlists, keyed by their case-preserved name
///
/// Lookups compare names case-insensitively. Resolution never creates a
/// playlist; a miss is always `PlaylistNotFound`.
#[derive(Debug, Clone, Default)]
pub struct PlaylistStore {
    playlists: Vec<Playlist>,
}

impl PlaylistStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn position_of(&self, name: &str) -> Option<usize> {
        let wanted = name.to_lowercase();
        self.playlists
            .iter()
            .position(|p| p.name.to_lowercase() == wanted)
    }

    /// Resolve a user-supplied name to the stored playlist
    pub fn get(&self, name: &str) -> PlayerResult<&Playlist> {
        self.position_of(name)
            .map(|idx| &self.playlists[idx])
            .ok_or(PlayerError::PlaylistNotFound)
    }

    fn get_mut(&mut self, name: &str) -> PlayerResult<&mut Playlist> {
        let idx = self
            .position_of(name)
            .ok_or(PlayerError::PlaylistNotFound)?;
        Ok(&mut self.playlists[idx])
    }

    /// Stored name for a user-supplied one
    pub fn resolve(&self, name: &str) -> PlayerResult<&str> {
        self.get(name).map(|p| p.name.as_str())
    }

    pub fn create(&mut self, name: &str) -> PlayerResult<()> {
        self.insert(Playlist::new(name))
    }

    /// Insert a whole playlist, used to bring back a deleted one
    pub(crate) fn insert(&mut self, playlist: Playlist) -> PlayerResult<()> {
        if self.position_of(&playlist.name).is_some() {
            return Err(PlayerError::DuplicateName);
        }
        log::debug!("Created playlist {:?}", playlist.name);
        self.playlists.push(playlist);
        Ok(())
    }

    /// Append a video, returning the resolved playlist name
    pub fn add_video(
        &mut self,
        name: &str,
        video_id: &str,
        catalog: &VideoCatalog,
    ) -> PlayerResult<String> {
        self.insert_video(name, video_id, usize::MAX, catalog)
    }

    /// Insert a video at `index` (clamped to the end)
    pub(crate) fn insert_video(
        &mut self,
        name: &str,
        video_id: &str,
        index: usize,
        catalog: &VideoCatalog,
    ) -> PlayerResult<String> {
        let playlist = self.get_mut(name)?;
        let video = catalog.get(video_id).ok_or(PlayerError::VideoNotFound)?;
        if video.is_flagged() {
            return Err(PlayerError::VideoFlagged {
                reason: video.flag_reason().to_string(),
            });
        }
        if !playlist.insert(index, video.id.clone()) {
            return Err(PlayerError::AlreadyInPlaylist);
        }
        Ok(playlist.name.clone())
    }

    /// Remove a video, returning the resolved name and the index it held
    pub fn remove_video(
        &mut self,
        name: &str,
        video_id: &str,
        catalog: &VideoCatalog,
    ) -> PlayerResult<(String, usize)> {
        let playlist = self.get_mut(name)?;
        if catalog.get(video_id).is_none() {
            return Err(PlayerError::VideoNotFound);
        }
        let index = playlist
            .remove(video_id)
            .ok_or(PlayerError::NotInPlaylist)?;
        Ok((playlist.name.clone(), index))
    }

    /// Empty a playlist, returning its name and former contents in order
    pub fn clear(&mut self, name: &str) -> PlayerResult<(String, Vec<String>)> {
        let playlist = self.get_mut(name)?;
        let removed = playlist.clear();
        Ok((playlist.name.clone(), removed))
    }

    /// Replace a playlist's contents wholesale
    pub(crate) fn restore(&mut self, name: &str, video_ids: Vec<String>) -> PlayerResult<String> {
        let playlist = self.get_mut(name)?;
        *playlist = Playlist::with_videos(playlist.name.clone(), video_ids);
        Ok(playlist.name.clone())
    }

    /// Remove a playlist entirely and hand it back
    pub fn delete(&mut self, name: &str) -> PlayerResult<Playlist> {
        let idx = self
            .position_of(name)
            .ok_or(PlayerError::PlaylistNotFound)?;
        Ok(self.playlists.remove(idx))
    }

    /// All playlists, sorted case-insensitively by name
    pub fn list(&self) -> Vec<&Playlist> {
        let mut playlists: Vec<&Playlist> = self.playlists.iter().collect();
        playlists.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });
        playlists
    }

    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Video;

    fn catalog() -> VideoCatalog {
        let mut flagged = Video::new("v3", "Bad Video", vec![], "");
        flagged.set_flag("spoilers");
        [
            Video::new("v1", "Amazing Cats", vec![], ""),
            Video::new("v2", "Funny Dogs", vec![], ""),
            flagged,
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_create_rejects_case_insensitive_duplicate() {
        let mut store = PlaylistStore::new();
        store.create("Trip").unwrap();
        assert_eq!(store.create("TRIP"), Err(PlayerError::DuplicateName));
        assert_eq!(store.resolve("tRiP"), Ok("Trip"));
    }

    #[test]
    fn test_add_video_error_precedence() {
        let catalog = catalog();
        let mut store = PlaylistStore::new();

        assert_eq!(
            store.add_video("Nope", "missing", &catalog),
            Err(PlayerError::PlaylistNotFound)
        );
        store.create("Trip").unwrap();
        assert_eq!(
            store.add_video("trip", "missing", &catalog),
            Err(PlayerError::VideoNotFound)
        );
        assert_eq!(
            store.add_video("trip", "v3", &catalog),
            Err(PlayerError::VideoFlagged {
                reason: "spoilers".to_string()
            })
        );
        assert_eq!(store.add_video("FOO", "v1", &catalog), Err(PlayerError::PlaylistNotFound));
        assert_eq!(store.add_video("TRIP", "v1", &catalog), Ok("Trip".to_string()));
        assert_eq!(
            store.add_video("trip", "v1", &catalog),
            Err(PlayerError::AlreadyInPlaylist)
        );
        assert_eq!(store.get("Trip").unwrap().len(), 1);
    }

    #[test]
    fn test_remove_video() {
        let catalog = catalog();
        let mut store = PlaylistStore::new();
        store.create("Trip").unwrap();
        store.add_video("Trip", "v1", &catalog).unwrap();
        store.add_video("Trip", "v2", &catalog).unwrap();

        assert_eq!(
            store.remove_video("trip", "missing", &catalog),
            Err(PlayerError::VideoNotFound)
        );
        assert_eq!(
            store.remove_video("trip", "v3", &catalog),
            Err(PlayerError::NotInPlaylist)
        );
        assert_eq!(
            store.remove_video("trip", "v2", &catalog),
            Ok(("Trip".to_string(), 1))
        );
        assert_eq!(store.get("Trip").unwrap().video_ids(), &["v1"]);
    }

    #[test]
    fn test_clear_and_restore_preserve_order() {
        let catalog = catalog();
        let mut store = PlaylistStore::new();
        store.create("Trip").unwrap();
        store.add_video("Trip", "v2", &catalog).unwrap();
        store.add_video("Trip", "v1", &catalog).unwrap();

        let (name, removed) = store.clear("TRIP").unwrap();
        assert_eq!(name, "Trip");
        assert_eq!(removed, vec!["v2".to_string(), "v1".to_string()]);
        assert!(store.get("Trip").unwrap().is_empty());

        store.restore("trip", removed).unwrap();
        assert_eq!(store.get("Trip").unwrap().video_ids(), &["v2", "v1"]);
    }

    #[test]
    fn test_delete_and_list() {
        let mut store = PlaylistStore::new();
        store.create("beta").unwrap();
        store.create("Alpha").unwrap();

        let names: Vec<&str> = store.list().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "beta"]);

        assert_eq!(store.delete("BETA").unwrap().name, "beta");
        assert_eq!(store.delete("beta"), Err(PlayerError::PlaylistNotFound));
        assert_eq!(store.len(), 1);
    }
}
