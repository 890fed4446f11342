//! Vidshelf - an in-memory video catalog controller
//!
//! Tracks a fixed library of videos, plays/pauses/stops them, organizes
//! them into named playlists and supports search, flagging, rating and
//! one level of undo.

pub mod catalog;
pub mod command;
pub mod display;
pub mod error;
pub mod model;
pub mod player;

pub use command::{Command, CommandDispatcher, Response};
pub use error::{ErrorKind, PlayerError};
pub use player::{PlayerConfig, VideoPlayer};
