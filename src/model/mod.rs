//! Data model for the video catalog
//!
//! These structures are independent of both the on-disk catalog format
//! and the command surface.

mod catalog;
mod playlist;
mod video;

pub use catalog::VideoCatalog;
pub use playlist::Playlist;
pub use video::{Video, DEFAULT_FLAG_REASON};
