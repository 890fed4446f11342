//! Human-readable rendering of videos and playlists

use crate::model::{Playlist, Video};

/// `TITLE (ID) [TAG1 TAG2]`, plus the average rating when rated
pub fn video_info(video: &Video) -> String {
    let mut out = format!("{} ({}) [{}]", video.title, video.id, video.tags.join(" "));
    if let Some(average) = video.average_rating() {
        out.push_str(&format!(" {:.1}", average));
    }
    out
}

/// `video_info` with a `- FLAGGED (reason: ...)` suffix for flagged videos
pub fn video_line(video: &Video) -> String {
    let info = video_info(video);
    if video.is_flagged() {
        format!("{} - FLAGGED (reason: {})", info, video.flag_reason())
    } else {
        info
    }
}

/// `NAME (n video)` / `NAME (n videos)`
pub fn playlist_summary(playlist: &Playlist) -> String {
    let noun = if playlist.len() == 1 { "video" } else { "videos" };
    format!("{} ({} {})", playlist.name, playlist.len(), noun)
}
