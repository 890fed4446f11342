//! Title and tag search over the catalog
//!
//! Flagged videos never appear in results. Results are sorted by title,
//! then by id.

use crate::error::{PlayerError, PlayerResult};
use crate::model::{Video, VideoCatalog};

/// Videos whose title contains `term`, ignoring case
pub fn search_by_title<'a>(catalog: &'a VideoCatalog, term: &str) -> Vec<&'a Video> {
    let term = term.to_lowercase();
    collect_sorted(catalog, |video| video.title.to_lowercase().contains(&term))
}

/// Videos carrying `tag` exactly, ignoring case
pub fn search_by_tag<'a>(catalog: &'a VideoCatalog, tag: &str) -> Vec<&'a Video> {
    collect_sorted(catalog, |video| video.has_tag(tag))
}

fn collect_sorted<'a, F>(catalog: &'a VideoCatalog, matches: F) -> Vec<&'a Video>
where
    F: Fn(&Video) -> bool,
{
    let mut results: Vec<&Video> = catalog
        .videos()
        .filter(|video| !video.is_flagged() && matches(video))
        .collect();
    sort_by_title(&mut results);
    results
}

/// Sort videos by title, ties broken by id
pub fn sort_by_title(videos: &mut [&Video]) {
    videos.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id)));
}

/// Pick the result at a zero-based index
pub fn select<T>(results: &[T], index: usize) -> PlayerResult<&T> {
    results.get(index).ok_or(PlayerError::InvalidIndex(index + 1))
}
