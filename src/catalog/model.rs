//! Intermediate record shared by the catalog readers

use crate::model::Video;

/// A catalog entry as read from disk, before validation
#[derive(Debug, Clone, Default)]
pub struct CatalogEntry {
    pub id: Option<String>,
    pub title: Option<String>,
    pub tags: Vec<String>,
    pub url: Option<String>,
}

impl CatalogEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert to a `Video`, requires a non-empty id
    ///
    /// A missing title falls back to the id.
    pub fn into_video(self) -> Option<Video> {
        let id = self.id.filter(|id| !id.trim().is_empty())?;
        let id = id.trim().to_string();
        let title = self
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| id.clone());
        let tags = self
            .tags
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        let url = self.url.map(|u| u.trim().to_string()).unwrap_or_default();

        Some(Video::new(id, title, tags, url))
    }
}
