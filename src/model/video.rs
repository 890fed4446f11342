use serde::{Deserialize, Serialize};

/// Flag reason recorded when none is given
pub const DEFAULT_FLAG_REASON: &str = "Not supplied";

/// A single video record in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    /// Unique identifier for this video
    pub id: String,

    /// Video title
    pub title: String,

    /// Tags in catalog order
    pub tags: Vec<String>,

    /// Playback URL handed to the playback sink (may be empty)
    pub source_url: String,

    flagged: bool,
    flag_reason: String,

    /// Rating history, 1..=5, append-only
    ratings: Vec<u8>,
}

impl Video {
    /// Create an unflagged, unrated video
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        tags: Vec<String>,
        source_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            tags,
            source_url: source_url.into(),
            flagged: false,
            flag_reason: DEFAULT_FLAG_REASON.to_string(),
            ratings: Vec::new(),
        }
    }

    pub fn is_flagged(&self) -> bool {
        self.flagged
    }

    pub fn flag_reason(&self) -> &str {
        &self.flag_reason
    }

    /// Mark as flagged with the given reason
    pub fn set_flag(&mut self, reason: impl Into<String>) {
        self.flagged = true;
        self.flag_reason = reason.into();
    }

    /// Clear the flag and return the reason it carried
    pub fn clear_flag(&mut self) -> String {
        self.flagged = false;
        std::mem::replace(&mut self.flag_reason, DEFAULT_FLAG_REASON.to_string())
    }

    /// Append a score to the rating history
    ///
    /// Range checking happens at the player level, this only records.
    pub fn add_rating(&mut self, score: u8) {
        self.ratings.push(score);
    }

    pub fn ratings(&self) -> &[u8] {
        &self.ratings
    }

    /// Average over the full rating history, `None` when unrated
    pub fn average_rating(&self) -> Option<f32> {
        if self.ratings.is_empty() {
            return None;
        }
        let sum: u32 = self.ratings.iter().map(|&r| u32::from(r)).sum();
        Some(sum as f32 / self.ratings.len() as f32)
    }

    /// Case-insensitive exact match against any tag
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == tag)
    }
}
