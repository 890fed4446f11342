//! The owning player context
//!
//! `VideoPlayer` holds the catalog, the playlists, the playback slot and the
//! sink. Every operation goes through it; there is no global state.

use super::playback::PlaybackState;
use super::playlists::PlaylistStore;
use super::search;
use super::sink::PlaybackSink;
use crate::error::{PlayerError, PlayerResult};
use crate::model::{Playlist, Video, VideoCatalog, DEFAULT_FLAG_REASON};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

/// Result of loading a video into the playback slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayReport {
    /// Video that was implicitly stopped
    pub stopped: Option<String>,

    /// Video now loaded
    pub playing: String,

    /// Non-fatal playback sink problem
    pub warning: Option<String>,
}

/// Result of flagging a video
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagReport {
    pub reason: String,

    /// Whether the flagged video was playing and got stopped
    pub stopped: bool,
}

/// Main player state, generic over where playback URLs go
pub struct VideoPlayer<S: PlaybackSink> {
    catalog: VideoCatalog,
    playback: PlaybackState,
    playlists: PlaylistStore,
    sink: S,
    rng: StdRng,
}

impl<S: PlaybackSink> VideoPlayer<S> {
    /// Create a new player over a loaded catalog
    pub fn new(catalog: VideoCatalog, sink: S) -> Self {
        Self {
            catalog,
            playback: PlaybackState::new(),
            playlists: PlaylistStore::new(),
            sink,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Make PLAY_RANDOM deterministic
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn catalog(&self) -> &VideoCatalog {
        &self.catalog
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    pub fn playlists(&self) -> &PlaylistStore {
        &self.playlists
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn video(&self, id: &str) -> PlayerResult<&Video> {
        self.catalog.get(id).ok_or(PlayerError::VideoNotFound)
    }

    /// The loaded video, if any
    pub fn current_video(&self) -> Option<&Video> {
        self.playback.current().and_then(|id| self.catalog.get(id))
    }

    // ------------------------------------------------------------------
    // Playback
    // ------------------------------------------------------------------

    /// Load and start a video, implicitly stopping whatever was loaded
    pub fn play(&mut self, id: &str) -> PlayerResult<PlayReport> {
        let video = self.video(id)?;
        if video.is_flagged() {
            return Err(PlayerError::VideoFlagged {
                reason: video.flag_reason().to_string(),
            });
        }
        let id = video.id.clone();
        let url = video.source_url.clone();

        let stopped = self.playback.load(id.clone());
        log::debug!("Playing {} (stopped {:?})", id, stopped);
        let warning = self.launch(&id, &url);

        Ok(PlayReport {
            stopped,
            playing: id,
            warning,
        })
    }

    fn launch(&self, id: &str, url: &str) -> Option<String> {
        if url.is_empty() {
            log::warn!("Video {} has no playback URL", id);
            return Some("No URL available for this video".to_string());
        }
        match self.sink.open(url) {
            Ok(()) => None,
            Err(e) => {
                log::warn!("Playback sink failed for {}: {:#}", url, e);
                Some(format!("Cannot open URL: {}", e))
            }
        }
    }

    /// Stop the loaded video and return its id
    pub fn stop(&mut self) -> PlayerResult<String> {
        let stopped = self.playback.stop()?;
        log::debug!("Stopped {}", stopped);
        Ok(stopped)
    }

    pub fn pause(&mut self) -> PlayerResult<String> {
        self.playback.pause().map(str::to_string)
    }

    pub fn resume(&mut self) -> PlayerResult<String> {
        self.playback.resume().map(str::to_string)
    }

    /// Play a uniformly random non-flagged video
    pub fn play_random(&mut self) -> PlayerResult<PlayReport> {
        let mut candidates: Vec<&Video> = self
            .catalog
            .videos()
            .filter(|video| !video.is_flagged())
            .collect();
        // HashMap order varies between runs, sort so seeded runs repeat
        candidates.sort_by(|a, b| a.id.cmp(&b.id));

        let id = candidates
            .choose(&mut self.rng)
            .map(|video| video.id.clone())
            .ok_or(PlayerError::NoVideosAvailable)?;
        self.play(&id)
    }

    // ------------------------------------------------------------------
    // Playlists
    // ------------------------------------------------------------------

    pub fn create_playlist(&mut self, name: &str) -> PlayerResult<()> {
        self.playlists.create(name)
    }

    /// Returns the resolved playlist name
    pub fn add_to_playlist(&mut self, name: &str, video_id: &str) -> PlayerResult<String> {
        self.playlists.add_video(name, video_id, &self.catalog)
    }

    /// Put a removed video back at `index`
    ///
    /// `position` is the active position recorded before the removal, if the
    /// playlist was active then.
    pub(crate) fn insert_into_playlist(
        &mut self,
        name: &str,
        video_id: &str,
        index: usize,
        position: Option<usize>,
    ) -> PlayerResult<String> {
        let resolved = self
            .playlists
            .insert_video(name, video_id, index, &self.catalog)?;
        self.restore_active(&resolved, position);
        Ok(resolved)
    }

    /// Returns the resolved playlist name and the index the video held
    pub fn remove_from_playlist(
        &mut self,
        name: &str,
        video_id: &str,
    ) -> PlayerResult<(String, usize)> {
        let (resolved, index) = self
            .playlists
            .remove_video(name, video_id, &self.catalog)?;
        if self.playback.is_active(&resolved) {
            if let Some(position) = self.playback.position() {
                // removing the playing entry also steps back, so NEXT lands on
                // the entry that followed it (except at index 0)
                let position = if index <= position {
                    position.saturating_sub(1)
                } else {
                    position
                };
                self.set_clamped_position(&resolved, position);
            }
        }
        Ok((resolved, index))
    }

    /// Returns the resolved playlist name and its former contents
    pub fn clear_playlist(&mut self, name: &str) -> PlayerResult<(String, Vec<String>)> {
        let (resolved, removed) = self.playlists.clear(name)?;
        if self.playback.is_active(&resolved) {
            self.playback.set_position(0);
        }
        Ok((resolved, removed))
    }

    pub(crate) fn restore_playlist(
        &mut self,
        name: &str,
        video_ids: Vec<String>,
        position: Option<usize>,
    ) -> PlayerResult<String> {
        let resolved = self.playlists.restore(name, video_ids)?;
        self.restore_active(&resolved, position);
        Ok(resolved)
    }

    /// Delete a playlist, closing it first if it is active
    pub fn delete_playlist(&mut self, name: &str) -> PlayerResult<Playlist> {
        let playlist = self.playlists.delete(name)?;
        if self.playback.is_active(&playlist.name) {
            let _ = self.playback.close_active();
        }
        Ok(playlist)
    }

    pub(crate) fn recreate_playlist(
        &mut self,
        playlist: Playlist,
        position: Option<usize>,
    ) -> PlayerResult<String> {
        let name = playlist.name.clone();
        self.playlists.insert(playlist)?;
        self.restore_active(&name, position);
        Ok(name)
    }

    /// Make `playlist` active at a previously recorded position
    fn restore_active(&mut self, playlist: &str, position: Option<usize>) {
        if let Some(position) = position {
            self.playback.set_active(playlist.to_string(), 0);
            self.set_clamped_position(playlist, position);
        }
    }

    fn set_clamped_position(&mut self, playlist: &str, position: usize) {
        if !self.playback.is_active(playlist) {
            return;
        }
        let len = self.playlists.get(playlist).map(Playlist::len).unwrap_or(0);
        self.playback.set_position(position.min(len.saturating_sub(1)));
    }

    /// Start a playlist from its first video
    ///
    /// An empty playlist still becomes the active playlist at position 0,
    /// with nothing loaded, and the call reports `EmptyPlaylist`.
    pub fn play_playlist(&mut self, name: &str) -> PlayerResult<PlayReport> {
        let playlist = self.playlists.get(name)?;
        let resolved = playlist.name.clone();

        let first = match playlist.get(0) {
            Some(first) => first.to_string(),
            None => {
                self.playback.set_active(resolved, 0);
                return Err(PlayerError::EmptyPlaylist);
            }
        };

        let report = self.play(&first)?;
        self.playback.set_active(resolved, 0);
        Ok(report)
    }

    pub fn next(&mut self) -> PlayerResult<PlayReport> {
        self.step(true)
    }

    pub fn previous(&mut self) -> PlayerResult<PlayReport> {
        self.step(false)
    }

    fn step(&mut self, forward: bool) -> PlayerResult<PlayReport> {
        let name = self
            .playback
            .active_playlist()
            .ok_or(PlayerError::NoActivePlaylist)?;
        let position = self.playback.position().unwrap_or(0);
        let playlist = self
            .playlists
            .get(name)
            .map_err(|_| PlayerError::NoActivePlaylist)?;

        let target = if forward {
            if position + 1 >= playlist.len() {
                return Err(PlayerError::AtLastVideo);
            }
            position + 1
        } else {
            if position == 0 {
                return Err(PlayerError::AtFirstVideo);
            }
            position - 1
        };
        let id = playlist
            .get(target)
            .map(str::to_string)
            .ok_or(PlayerError::AtLastVideo)?;

        let report = self.play(&id)?;
        self.playback.set_position(target);
        Ok(report)
    }

    /// Close the active playlist, returning its name and position
    pub fn close_playlist(&mut self) -> PlayerResult<(String, usize)> {
        self.playback.close_active()
    }

    /// Make a playlist active again without loading anything
    pub(crate) fn reopen_playlist(&mut self, name: &str, position: usize) -> PlayerResult<String> {
        let resolved = self.playlists.resolve(name)?.to_string();
        self.restore_active(&resolved, Some(position));
        Ok(resolved)
    }

    // ------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------

    pub fn search_by_title(&self, term: &str) -> Vec<&Video> {
        search::search_by_title(&self.catalog, term)
    }

    pub fn search_by_tag(&self, tag: &str) -> Vec<&Video> {
        search::search_by_tag(&self.catalog, tag)
    }

    /// Play the search result at a zero-based index
    pub fn play_by_index(&mut self, results: &[String], index: usize) -> PlayerResult<PlayReport> {
        let id = search::select(results, index)?.clone();
        self.play(&id)
    }

    // ------------------------------------------------------------------
    // Flagging and rating
    // ------------------------------------------------------------------

    /// Flag a video, stopping it if it is the one playing
    pub fn flag(&mut self, id: &str, reason: Option<&str>) -> PlayerResult<FlagReport> {
        let video = self.video(id)?;
        if video.is_flagged() {
            return Err(PlayerError::AlreadyFlagged);
        }
        let id = video.id.clone();
        let reason = reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_FLAG_REASON)
            .to_string();

        let stopped = self.playback.is_playing(&id);
        if stopped {
            self.playback.stop()?;
        }
        if let Some(video) = self.catalog.get_mut(&id) {
            video.set_flag(reason.clone());
        }
        log::debug!("Flagged {} ({})", id, reason);

        Ok(FlagReport { reason, stopped })
    }

    /// Remove a flag, returning the reason it carried
    pub fn unflag(&mut self, id: &str) -> PlayerResult<String> {
        let video = self
            .catalog
            .get_mut(id)
            .ok_or(PlayerError::VideoNotFound)?;
        if !video.is_flagged() {
            return Err(PlayerError::NotFlagged);
        }
        Ok(video.clear_flag())
    }

    /// Record a 1..=5 score, returning the new average
    pub fn rate(&mut self, id: &str, score: i64) -> PlayerResult<f32> {
        let video = self
            .catalog
            .get_mut(id)
            .ok_or(PlayerError::VideoNotFound)?;
        let score = u8::try_from(score)
            .ok()
            .filter(|s| (1..=5).contains(s))
            .ok_or(PlayerError::InvalidScore(score))?;

        video.add_rating(score);
        Ok(video.average_rating().unwrap_or(f32::from(score)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::NullSink;

    fn player() -> VideoPlayer<NullSink> {
        let catalog: VideoCatalog = [
            Video::new("v1", "Amazing Cats", vec!["#cat".into(), "#fun".into()], "u1"),
            Video::new("v2", "Funny Dogs", vec!["#dog".into(), "#fun".into()], "u2"),
            Video::new("v3", "Another Cat", vec!["#cat".into()], "u3"),
        ]
        .into_iter()
        .collect();
        VideoPlayer::new(catalog, NullSink::new()).with_seed(7)
    }

    #[test]
    fn test_play_stops_previous() {
        let mut player = player();
        let first = player.play("v1").unwrap();
        assert_eq!(first.stopped, None);
        assert_eq!(first.warning, None);

        let second = player.play("v2").unwrap();
        assert_eq!(second.stopped.as_deref(), Some("v1"));
        assert_eq!(player.playback().current(), Some("v2"));
        assert!(!player.playback().is_paused());
    }

    struct FailingSink;

    impl PlaybackSink for FailingSink {
        fn open(&self, _url: &str) -> anyhow::Result<()> {
            Err(anyhow::anyhow!("no browser found"))
        }
    }

    #[test]
    fn test_sink_failure_is_only_a_warning() {
        let catalog: VideoCatalog = [
            Video::new("v1", "Amazing Cats", vec![], "u1"),
            Video::new("v2", "No Link", vec![], ""),
        ]
        .into_iter()
        .collect();
        let mut player = VideoPlayer::new(catalog, FailingSink);

        let report = player.play("v1").unwrap();
        assert!(report.warning.unwrap().contains("no browser found"));
        assert_eq!(player.playback().current(), Some("v1"));

        let report = player.play("v2").unwrap();
        assert_eq!(
            report.warning.as_deref(),
            Some("No URL available for this video")
        );
        assert_eq!(player.playback().current(), Some("v2"));
    }

    #[test]
    fn test_play_failures_leave_state() {
        let mut player = player();
        player.play("v1").unwrap();
        assert_eq!(player.play("nope"), Err(PlayerError::VideoNotFound));

        player.flag("v2", Some("spoilers")).unwrap();
        assert_eq!(
            player.play("v2"),
            Err(PlayerError::VideoFlagged {
                reason: "spoilers".to_string()
            })
        );
        assert_eq!(player.playback().current(), Some("v1"));
    }

    #[test]
    fn test_play_random_skips_flagged() {
        let mut player = player();
        player.flag("v1", None).unwrap();
        player.flag("v2", None).unwrap();
        for _ in 0..5 {
            assert_eq!(player.play_random().unwrap().playing, "v3");
        }

        player.flag("v3", None).unwrap();
        assert_eq!(player.play_random(), Err(PlayerError::NoVideosAvailable));
    }

    #[test]
    fn test_flag_stops_current_video() {
        let mut player = player();
        player.play("v1").unwrap();

        let report = player.flag("v1", None).unwrap();
        assert!(report.stopped);
        assert_eq!(report.reason, DEFAULT_FLAG_REASON);
        assert_eq!(player.playback().current(), None);
        assert_eq!(player.flag("v1", None), Err(PlayerError::AlreadyFlagged));

        assert_eq!(player.unflag("v1"), Ok(DEFAULT_FLAG_REASON.to_string()));
        assert_eq!(player.unflag("v1"), Err(PlayerError::NotFlagged));
        assert_eq!(player.unflag("nope"), Err(PlayerError::VideoNotFound));
    }

    #[test]
    fn test_rate_validates_score() {
        let mut player = player();
        assert_eq!(player.rate("nope", 9), Err(PlayerError::VideoNotFound));
        assert_eq!(player.rate("v1", 0), Err(PlayerError::InvalidScore(0)));
        assert_eq!(player.rate("v1", 6), Err(PlayerError::InvalidScore(6)));
        assert_eq!(player.rate("v1", 3), Ok(3.0));
        assert_eq!(player.rate("v1", 5), Ok(4.0));
        assert_eq!(player.video("v1").unwrap().ratings(), &[3, 5]);
    }

    #[test]
    fn test_playlist_navigation() {
        let mut player = player();
        player.create_playlist("Trip").unwrap();
        player.add_to_playlist("Trip", "v1").unwrap();
        player.add_to_playlist("trip", "v2").unwrap();

        player.play_playlist("TRIP").unwrap();
        assert_eq!(player.playback().current(), Some("v1"));
        assert_eq!(player.playback().active_playlist(), Some("Trip"));
        assert_eq!(player.playback().position(), Some(0));

        assert_eq!(player.previous(), Err(PlayerError::AtFirstVideo));
        assert_eq!(player.next().unwrap().playing, "v2");
        assert_eq!(player.playback().position(), Some(1));

        assert_eq!(player.next(), Err(PlayerError::AtLastVideo));
        assert_eq!(player.playback().position(), Some(1));
        assert_eq!(player.playback().current(), Some("v2"));
    }

    #[test]
    fn test_empty_playlist_still_becomes_active() {
        let mut player = player();
        player.create_playlist("Empty").unwrap();

        assert_eq!(player.play_playlist("empty"), Err(PlayerError::EmptyPlaylist));
        assert_eq!(player.playback().active_playlist(), Some("Empty"));
        assert_eq!(player.playback().position(), Some(0));
        assert_eq!(player.playback().current(), None);
        assert_eq!(player.next(), Err(PlayerError::AtLastVideo));
        assert_eq!(player.previous(), Err(PlayerError::AtFirstVideo));
    }

    #[test]
    fn test_navigation_without_playlist() {
        let mut player = player();
        assert_eq!(player.next(), Err(PlayerError::NoActivePlaylist));
        assert_eq!(player.previous(), Err(PlayerError::NoActivePlaylist));
        assert_eq!(player.close_playlist(), Err(PlayerError::NoActivePlaylist));
    }

    #[test]
    fn test_removing_before_position_keeps_current_entry() {
        let mut player = player();
        player.create_playlist("Trip").unwrap();
        for id in ["v1", "v2", "v3"] {
            player.add_to_playlist("Trip", id).unwrap();
        }
        player.play_playlist("Trip").unwrap();
        player.next().unwrap();
        player.next().unwrap();
        assert_eq!(player.playback().position(), Some(2));

        player.remove_from_playlist("Trip", "v1").unwrap();
        assert_eq!(player.playback().position(), Some(1));

        player.remove_from_playlist("Trip", "v3").unwrap();
        assert_eq!(player.playback().position(), Some(0));
    }

    #[test]
    fn test_removing_playing_entry_steps_back() {
        let mut player = player();
        player.create_playlist("Trip").unwrap();
        for id in ["v1", "v2", "v3"] {
            player.add_to_playlist("Trip", id).unwrap();
        }
        player.play_playlist("Trip").unwrap();
        player.next().unwrap();

        assert_eq!(player.remove_from_playlist("Trip", "v2"), Ok(("Trip".to_string(), 1)));
        assert_eq!(player.playback().position(), Some(0));
        assert_eq!(player.playback().current(), Some("v2"));
        assert_eq!(player.next().unwrap().playing, "v3");
    }

    #[test]
    fn test_reinsert_and_restore_use_recorded_position() {
        let mut player = player();
        player.create_playlist("Trip").unwrap();
        for id in ["v1", "v2", "v3"] {
            player.add_to_playlist("Trip", id).unwrap();
        }
        player.play_playlist("Trip").unwrap();
        player.next().unwrap();

        player.remove_from_playlist("Trip", "v2").unwrap();
        player.insert_into_playlist("trip", "v2", 1, Some(1)).unwrap();
        assert_eq!(player.playback().position(), Some(1));

        let (_, removed) = player.clear_playlist("Trip").unwrap();
        assert_eq!(player.playback().position(), Some(0));
        player.restore_playlist("Trip", removed, Some(1)).unwrap();
        assert_eq!(player.playback().position(), Some(1));

        let deleted = player.delete_playlist("Trip").unwrap();
        assert_eq!(player.playback().active_playlist(), None);
        player.recreate_playlist(deleted, Some(2)).unwrap();
        assert_eq!(player.playback().active_playlist(), Some("Trip"));
        assert_eq!(player.playback().position(), Some(2));
    }

    #[test]
    fn test_deleting_active_playlist_closes_it() {
        let mut player = player();
        player.create_playlist("Trip").unwrap();
        player.add_to_playlist("Trip", "v1").unwrap();
        player.play_playlist("Trip").unwrap();

        let deleted = player.delete_playlist("trip").unwrap();
        assert_eq!(deleted.name, "Trip");
        assert_eq!(player.playback().active_playlist(), None);
        assert_eq!(player.playback().current(), Some("v1"));
    }

    #[test]
    fn test_play_by_index() {
        let mut player = player();
        let results: Vec<String> = player
            .search_by_tag("#cat")
            .iter()
            .map(|v| v.id.clone())
            .collect();
        assert_eq!(results, vec!["v1", "v3"]);

        assert_eq!(player.play_by_index(&results, 1).unwrap().playing, "v3");
        assert_eq!(
            player.play_by_index(&results, 2),
            Err(PlayerError::InvalidIndex(3))
        );
    }
}
