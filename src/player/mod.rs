//! Playback, playlists, search and moderation
//!
//! `VideoPlayer` owns all mutable state. Playback URLs go to a
//! `PlaybackSink`, which lets tests observe them and headless runs skip
//! the browser.

pub mod config;
mod playback;
mod playlists;
pub mod search;
mod session;
mod sink;

pub use config::PlayerConfig;
pub use playback::PlaybackState;
pub use playlists::PlaylistStore;
pub use session::{FlagReport, PlayReport, VideoPlayer};
pub use sink::{BrowserSink, NullSink, PlaybackSink};
