//! Routes parsed commands to the player and keeps the undo ledger

use super::help::help_lines;
use super::parser::Command;
use super::undo::{Inverse, UndoLedger, UndoRecord};
use crate::display::{playlist_summary, video_info, video_line};
use crate::error::{PlayerError, PlayerResult};
use crate::model::Video;
use crate::player::search::sort_by_title;
use crate::player::{PlayReport, PlaybackSink, VideoPlayer};
use std::fmt;

/// Output of one command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pub lines: Vec<String>,

    /// Search results were listed and can be played by number
    pub offers_selection: bool,

    /// A named playlist was missing and may be created on request
    pub offers_create: Option<String>,

    /// The session should end
    pub exit: bool,
}

impl Response {
    fn from_lines(lines: Vec<String>) -> Self {
        Self {
            lines,
            ..Self::default()
        }
    }

    fn line(line: impl Into<String>) -> Self {
        Self::from_lines(vec![line.into()])
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines.join("\n"))
    }
}

/// Executes commands one at a time against a `VideoPlayer`
///
/// Every successful mutating command replaces the single undo record with
/// its inverse. Read-only commands, parse errors and failed operations leave
/// the record alone.
pub struct CommandDispatcher<S: PlaybackSink> {
    player: VideoPlayer<S>,
    ledger: UndoLedger,
    /// Video IDs from the most recent search, in display order
    results: Vec<String>,
}

impl<S: PlaybackSink> CommandDispatcher<S> {
    pub fn new(player: VideoPlayer<S>) -> Self {
        Self {
            player,
            ledger: UndoLedger::new(),
            results: Vec::new(),
        }
    }

    pub fn player(&self) -> &VideoPlayer<S> {
        &self.player
    }

    pub fn ledger(&self) -> &UndoLedger {
        &self.ledger
    }

    pub fn last_results(&self) -> &[String] {
        &self.results
    }

    /// Parse and run one command line
    pub fn execute(&mut self, line: &str) -> Response {
        match Command::parse(line) {
            Ok(command) => self.dispatch(command),
            Err(err) => {
                log::debug!("Rejected {:?}: {}", line, err);
                Response::line(format!("Cannot {}: {}", err.operation(), err))
            }
        }
    }

    /// Run an already-parsed command
    pub fn dispatch(&mut self, command: Command) -> Response {
        let operation = command.operation();
        let creatable = command.creatable_playlist().map(str::to_string);
        match self.apply(command) {
            Ok(response) => response,
            Err(err) => {
                log::debug!("{} failed: {:?}", operation, err);
                let mut response = Response::line(format!("Cannot {}: {}", operation, err));
                if err == PlayerError::PlaylistNotFound {
                    response.offers_create = creatable;
                }
                response
            }
        }
    }

    /// Create the playlist offered by a failed command if the answer is "yes"
    ///
    /// Goes through CREATE_PLAYLIST, so the creation can be undone.
    pub fn create_offered(&mut self, name: &str, answer: &str) -> Response {
        let confirmed = answer
            .split_whitespace()
            .next()
            .is_some_and(|word| word.eq_ignore_ascii_case("yes"));
        if !confirmed {
            return Response::default();
        }
        self.dispatch(Command::CreatePlaylist(name.to_string()))
    }

    /// Play a listed search result by its 1-based number
    ///
    /// Anything that is not a number is taken as "no" and does nothing.
    pub fn play_result(&mut self, answer: &str) -> Response {
        let Ok(number) = answer.trim().parse::<usize>() else {
            return Response::default();
        };
        let result = match number.checked_sub(1) {
            Some(index) => self.player.play_by_index(&self.results, index),
            None => Err(PlayerError::InvalidIndex(number)),
        };
        match result {
            Ok(report) => {
                self.ledger.record(UndoRecord::new("PLAY", Inverse::Stop));
                Response::from_lines(self.play_lines(&report))
            }
            Err(err) => Response::line(format!("Cannot play video: {}", err)),
        }
    }

    fn apply(&mut self, command: Command) -> PlayerResult<Response> {
        let lines = match command {
            Command::NumberOfVideos => {
                vec![format!("{} videos in the library", self.player.catalog().len())]
            }
            Command::ShowAllVideos => self.show_all_videos(),
            Command::Play(id) => {
                let report = self.player.play(&id)?;
                self.ledger.record(UndoRecord::new("PLAY", Inverse::Stop));
                self.play_lines(&report)
            }
            Command::PlayRandom => {
                let report = self.player.play_random()?;
                self.ledger
                    .record(UndoRecord::new("PLAY_RANDOM", Inverse::Stop));
                self.play_lines(&report)
            }
            Command::Stop => {
                let id = self.player.stop()?;
                let line = format!("Stopping video: {}", self.title(&id));
                self.ledger
                    .record(UndoRecord::new("STOP", Inverse::Play(id)));
                vec![line]
            }
            Command::Pause => {
                let id = self.player.pause()?;
                self.ledger.record(UndoRecord::new("PAUSE", Inverse::Resume));
                vec![format!("Pausing video: {}", self.title(&id))]
            }
            Command::Continue => {
                let id = self.player.resume()?;
                self.ledger
                    .record(UndoRecord::new("CONTINUE", Inverse::Pause));
                vec![format!("Continuing video: {}", self.title(&id))]
            }
            Command::ShowPlaying => self.show_playing(),
            Command::CreatePlaylist(name) => {
                self.player.create_playlist(&name)?;
                let line = format!("Successfully created new playlist: {}", name);
                self.ledger.record(UndoRecord::new(
                    "CREATE_PLAYLIST",
                    Inverse::DeletePlaylist(name),
                ));
                vec![line]
            }
            Command::AddToPlaylist { playlist, video_id } => {
                let resolved = self.player.add_to_playlist(&playlist, &video_id)?;
                let line = format!("Added video to {}: {}", playlist, self.title(&video_id));
                self.ledger.record(UndoRecord::new(
                    "ADD_TO_PLAYLIST",
                    Inverse::RemoveFromPlaylist {
                        playlist: resolved,
                        video_id,
                    },
                ));
                vec![line]
            }
            Command::PlayPlaylist(name) => {
                let report = self.player.play_playlist(&name)?;
                self.ledger
                    .record(UndoRecord::new("PLAY_PLAYLIST", Inverse::ClosePlaylist));
                let resolved = self.player.playback().active_playlist().unwrap_or(name.as_str());
                let mut lines = vec![format!("Playing playlist: {}", resolved)];
                lines.extend(self.play_lines(&report));
                lines
            }
            Command::Next => {
                let report = self.player.next()?;
                self.ledger
                    .record(UndoRecord::new("NEXT", Inverse::Previous));
                self.play_lines(&report)
            }
            Command::Previous => {
                let report = self.player.previous()?;
                self.ledger
                    .record(UndoRecord::new("PREVIOUS", Inverse::Next));
                self.play_lines(&report)
            }
            Command::ShowCurrentPlaylist => self.show_current_playlist(),
            Command::ClosePlaylist => {
                let (name, position) = self.player.close_playlist()?;
                let line = format!("Successfully closed playlist: {}", name);
                self.ledger.record(UndoRecord::new(
                    "CLOSE_PLAYLIST",
                    Inverse::ReopenPlaylist {
                        playlist: name,
                        position,
                    },
                ));
                vec![line]
            }
            Command::RemoveFromPlaylist { playlist, video_id } => {
                let active = self.active_slot();
                let (resolved, index) = self.player.remove_from_playlist(&playlist, &video_id)?;
                let line = format!("Removed video from {}: {}", playlist, self.title(&video_id));
                self.ledger.record(UndoRecord::new(
                    "REMOVE_FROM_PLAYLIST",
                    Inverse::InsertIntoPlaylist {
                        position: position_in(active, &resolved),
                        playlist: resolved,
                        video_id,
                        index,
                    },
                ));
                vec![line]
            }
            Command::ClearPlaylist(name) => {
                let active = self.active_slot();
                let (resolved, removed) = self.player.clear_playlist(&name)?;
                self.ledger.record(UndoRecord::new(
                    "CLEAR_PLAYLIST",
                    Inverse::RestorePlaylist {
                        position: position_in(active, &resolved),
                        playlist: resolved,
                        video_ids: removed,
                    },
                ));
                vec![format!("Successfully removed all videos from {}", name)]
            }
            Command::DeletePlaylist(name) => {
                let active = self.active_slot();
                let deleted = self.player.delete_playlist(&name)?;
                self.ledger.record(UndoRecord::new(
                    "DELETE_PLAYLIST",
                    Inverse::RecreatePlaylist {
                        position: position_in(active, &deleted.name),
                        playlist: deleted,
                    },
                ));
                vec![format!("Deleted playlist: {}", name)]
            }
            Command::ShowPlaylist(name) => self.show_playlist(&name)?,
            Command::ShowAllPlaylists => self.show_all_playlists(),
            Command::SearchVideos(term) => return Ok(self.search(&term, false)),
            Command::SearchVideosWithTag(tag) => return Ok(self.search(&tag, true)),
            Command::FlagVideo { video_id, reason } => {
                let report = self.player.flag(&video_id, reason.as_deref())?;
                let lines = self.flag_lines(&video_id, report.stopped, &report.reason);
                self.ledger
                    .record(UndoRecord::new("FLAG_VIDEO", Inverse::Unflag(video_id)));
                lines
            }
            Command::AllowVideo(video_id) => {
                let reason = self.player.unflag(&video_id)?;
                let line = format!(
                    "Successfully removed flag from video: {}",
                    self.title(&video_id)
                );
                self.ledger.record(UndoRecord::new(
                    "ALLOW_VIDEO",
                    Inverse::Flag { video_id, reason },
                ));
                vec![line]
            }
            Command::RateVideo { video_id, score } => {
                let average = self.player.rate(&video_id, score)?;
                // ratings are append-only, so there is nothing to reverse
                self.ledger.clear();
                vec![format!(
                    "Rated video: {}, score: {} (average: {:.1})",
                    self.title(&video_id),
                    score,
                    average
                )]
            }
            Command::Help => help_lines(),
            Command::Undo => self.undo()?,
            Command::Exit => {
                return Ok(Response {
                    lines: vec!["Goodbye!".to_string()],
                    exit: true,
                    ..Response::default()
                })
            }
        };

        Ok(Response::from_lines(lines))
    }

    /// Replay the recorded inverse; the record is consumed either way
    fn undo(&mut self) -> PlayerResult<Vec<String>> {
        let record = self.ledger.take().ok_or(PlayerError::NothingToUndo)?;
        match self.replay(record.inverse) {
            Ok(lines) => {
                let mut out = vec![format!("Undoing {}", record.command)];
                out.extend(lines);
                Ok(out)
            }
            Err(err) => {
                log::debug!("Undo of {} failed: {}", record.command, err);
                Err(PlayerError::NothingToUndo)
            }
        }
    }

    fn replay(&mut self, inverse: Inverse) -> PlayerResult<Vec<String>> {
        let lines = match inverse {
            Inverse::Stop => {
                let id = self.player.stop()?;
                vec![format!("Stopping video: {}", self.title(&id))]
            }
            Inverse::Play(id) => {
                let report = self.player.play(&id)?;
                self.play_lines(&report)
            }
            Inverse::Pause => {
                let id = self.player.pause()?;
                vec![format!("Pausing video: {}", self.title(&id))]
            }
            Inverse::Resume => {
                let id = self.player.resume()?;
                vec![format!("Continuing video: {}", self.title(&id))]
            }
            Inverse::DeletePlaylist(name) => {
                let deleted = self.player.delete_playlist(&name)?;
                vec![format!("Deleted playlist: {}", deleted.name)]
            }
            Inverse::RecreatePlaylist { playlist, position } => {
                let summary = playlist_summary(&playlist);
                self.player.recreate_playlist(playlist, position)?;
                vec![format!("Restored playlist: {}", summary)]
            }
            Inverse::RemoveFromPlaylist { playlist, video_id } => {
                let (resolved, _) = self.player.remove_from_playlist(&playlist, &video_id)?;
                vec![format!(
                    "Removed video from {}: {}",
                    resolved,
                    self.title(&video_id)
                )]
            }
            Inverse::InsertIntoPlaylist {
                playlist,
                video_id,
                index,
                position,
            } => {
                let resolved =
                    self.player
                        .insert_into_playlist(&playlist, &video_id, index, position)?;
                vec![format!(
                    "Added video to {}: {}",
                    resolved,
                    self.title(&video_id)
                )]
            }
            Inverse::RestorePlaylist {
                playlist,
                video_ids,
                position,
            } => {
                let count = video_ids.len();
                let resolved = self
                    .player
                    .restore_playlist(&playlist, video_ids, position)?;
                vec![format!("Restored {} videos to {}", count, resolved)]
            }
            Inverse::ClosePlaylist => {
                let (name, _) = self.player.close_playlist()?;
                vec![format!("Successfully closed playlist: {}", name)]
            }
            Inverse::ReopenPlaylist { playlist, position } => {
                let resolved = self.player.reopen_playlist(&playlist, position)?;
                vec![format!("Reopened playlist: {}", resolved)]
            }
            Inverse::Next => {
                let report = self.player.next()?;
                self.play_lines(&report)
            }
            Inverse::Previous => {
                let report = self.player.previous()?;
                self.play_lines(&report)
            }
            Inverse::Unflag(video_id) => {
                self.player.unflag(&video_id)?;
                vec![format!(
                    "Successfully removed flag from video: {}",
                    self.title(&video_id)
                )]
            }
            Inverse::Flag { video_id, reason } => {
                let report = self.player.flag(&video_id, Some(reason.as_str()))?;
                self.flag_lines(&video_id, report.stopped, &report.reason)
            }
        };
        Ok(lines)
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Active playlist and position, before a command changes them
    fn active_slot(&self) -> Option<(String, usize)> {
        let playback = self.player.playback();
        Some((playback.active_playlist()?.to_string(), playback.position()?))
    }

    fn title(&self, id: &str) -> String {
        self.player
            .video(id)
            .map(|video| video.title.clone())
            .unwrap_or_else(|_| id.to_string())
    }

    fn play_lines(&self, report: &PlayReport) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(stopped) = &report.stopped {
            lines.push(format!("Stopping video: {}", self.title(stopped)));
        }
        lines.push(format!("Playing video: {}", self.title(&report.playing)));
        if let Some(warning) = &report.warning {
            lines.push(format!("Warning: {}", warning));
        }
        lines
    }

    fn flag_lines(&self, video_id: &str, stopped: bool, reason: &str) -> Vec<String> {
        let title = self.title(video_id);
        let mut lines = Vec::new();
        if stopped {
            lines.push(format!("Stopping video: {}", title));
        }
        lines.push(format!(
            "Successfully flagged video: {} (reason: {})",
            title, reason
        ));
        lines
    }

    fn show_all_videos(&self) -> Vec<String> {
        let mut videos: Vec<&Video> = self.player.catalog().videos().collect();
        sort_by_title(&mut videos);

        let mut lines = vec!["Here's a list of all available videos:".to_string()];
        lines.extend(videos.into_iter().map(|video| format!("  {}", video_line(video))));
        lines
    }

    fn show_playing(&self) -> Vec<String> {
        match self.player.current_video() {
            Some(video) => {
                let mut line = format!("Currently playing: {}", video_info(video));
                if self.player.playback().is_paused() {
                    line.push_str(" - PAUSED");
                }
                vec![line]
            }
            None => vec!["No video is currently playing".to_string()],
        }
    }

    fn show_current_playlist(&self) -> Vec<String> {
        let playback = self.player.playback();
        let (Some(name), Some(position)) = (playback.active_playlist(), playback.position()) else {
            return vec!["No playlist playing".to_string()];
        };
        let len = self
            .player
            .playlists()
            .get(name)
            .map(|p| p.len())
            .unwrap_or(0);
        if len == 0 {
            vec![format!("Current playlist: {} (empty)", name)]
        } else {
            vec![format!(
                "Current playlist: {} (video {} of {})",
                name,
                position + 1,
                len
            )]
        }
    }

    fn show_playlist(&self, name: &str) -> PlayerResult<Vec<String>> {
        let playlist = self.player.playlists().get(name)?;
        let mut lines = vec![format!("Showing playlist: {}", name)];
        if playlist.is_empty() {
            lines.push("  No videos here yet".to_string());
        }
        for id in playlist.video_ids() {
            if let Some(video) = self.player.catalog().get(id) {
                lines.push(format!("  {}", video_line(video)));
            }
        }
        Ok(lines)
    }

    fn show_all_playlists(&self) -> Vec<String> {
        let playlists = self.player.playlists().list();
        if playlists.is_empty() {
            return vec!["No playlists exist yet".to_string()];
        }
        let mut lines = vec!["Showing all playlists:".to_string()];
        lines.extend(playlists.into_iter().map(|p| format!("  {}", playlist_summary(p))));
        lines
    }

    fn search(&mut self, term: &str, by_tag: bool) -> Response {
        let videos = if by_tag {
            self.player.search_by_tag(term)
        } else {
            self.player.search_by_title(term)
        };

        if videos.is_empty() {
            self.results.clear();
            return Response::line(format!("No search results for {}", term));
        }

        let mut lines = vec![format!("Here are the results for {}:", term)];
        lines.extend(
            videos
                .iter()
                .enumerate()
                .map(|(i, video)| format!("  {}) {}", i + 1, video_info(video))),
        );
        self.results = videos.iter().map(|video| video.id.clone()).collect();

        Response {
            lines,
            offers_selection: true,
            ..Response::default()
        }
    }
}

/// Position recorded in `active` if it belongs to `playlist`
fn position_in(active: Option<(String, usize)>, playlist: &str) -> Option<usize> {
    active
        .filter(|(name, _)| name == playlist)
        .map(|(_, position)| position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VideoCatalog;
    use crate::player::NullSink;

    fn dispatcher() -> CommandDispatcher<NullSink> {
        let catalog: VideoCatalog = [
            Video::new("v1", "Amazing Cats", vec!["#cat".into()], "u1"),
            Video::new("v2", "Funny Dogs", vec!["#dog".into()], "u2"),
        ]
        .into_iter()
        .collect();
        CommandDispatcher::new(VideoPlayer::new(catalog, NullSink::new()))
    }

    #[test]
    fn test_failed_command_keeps_previous_record() {
        let mut d = dispatcher();
        d.execute("PLAY v1");
        let response = d.execute("PLAY nope");

        assert_eq!(response.lines, vec!["Cannot play video: Video does not exist"]);
        assert_eq!(d.ledger().peek().map(|r| r.command), Some("PLAY"));
    }

    #[test]
    fn test_failed_replay_is_consumed() {
        let mut d = dispatcher();
        d.execute("PLAY v1");
        d.execute("STOP");
        // make the recorded inverse unplayable without touching the ledger
        d.player.flag("v1", None).unwrap();

        let response = d.execute("UNDO");
        assert_eq!(response.lines, vec!["Cannot undo: Nothing to undo"]);
        assert!(d.ledger().is_empty());
        assert_eq!(d.player().playback().current(), None);
    }

    #[test]
    fn test_undo_prefixes_command_name() {
        let mut d = dispatcher();
        d.execute("CREATE_PLAYLIST Mix");
        let response = d.execute("UNDO");

        assert_eq!(response.lines, vec!["Undoing CREATE_PLAYLIST", "Deleted playlist: Mix"]);
        assert!(d.player().playlists().is_empty());
    }

    #[test]
    fn test_read_only_commands_leave_ledger() {
        let mut d = dispatcher();
        d.execute("PLAY v2");
        for line in ["SHOW_ALL_VIDEOS", "SHOW_PLAYING", "SHOW_ALL_PLAYLISTS", "HELP", "SEARCH_VIDEOS cat"] {
            d.execute(line);
        }
        assert_eq!(d.ledger().peek().map(|r| r.command), Some("PLAY"));
    }

    #[test]
    fn test_empty_search_clears_previous_results() {
        let mut d = dispatcher();
        d.execute("SEARCH_VIDEOS cat");
        assert_eq!(d.last_results(), &["v1"]);

        d.execute("SEARCH_VIDEOS zebra");
        assert!(d.last_results().is_empty());
        assert_eq!(d.play_result("1").lines, vec!["Cannot play video: No result numbered 1"]);
        assert_eq!(d.play_result("0").lines, vec!["Cannot play video: No result numbered 0"]);
    }

    #[test]
    fn test_parse_errors_are_prefixed_with_operation() {
        let mut d = dispatcher();
        assert_eq!(
            d.execute("PLAY").lines,
            vec!["Cannot play video: Missing argument. Usage: PLAY <video_id>"]
        );
        assert!(d.ledger().is_empty());
    }

    #[test]
    fn test_create_is_offered_only_for_missing_playlist() {
        let mut d = dispatcher();
        d.execute("CREATE_PLAYLIST Mix");
        assert_eq!(d.execute("ADD_TO_PLAYLIST mix nope").offers_create, None);
        assert_eq!(
            d.execute("SHOW_PLAYLIST Other").offers_create.as_deref(),
            Some("Other")
        );

        // declining leaves the CREATE_PLAYLIST record in place
        assert!(d.create_offered("Other", "").lines.is_empty());
        assert_eq!(d.ledger().peek().map(|r| r.command), Some("CREATE_PLAYLIST"));
        assert_eq!(d.player().playlists().len(), 1);
    }

    #[test]
    fn test_response_display_joins_lines() {
        let response = Response::from_lines(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(response.to_string(), "a\nb");
    }
}
