//! Pipe-delimited catalog reader
//!
//! One video per line: `Title | id | #tag1, #tag2 | url`. Tags and url are
//! optional. Blank lines and lines starting with `//` are ignored.

use super::model::CatalogEntry;
use crate::model::Video;
use anyhow::{Context, Result};
use std::io::BufRead;

/// Parse a text catalog into videos, skipping malformed lines
pub fn parse_text<R: BufRead>(reader: R) -> Result<Vec<Video>> {
    let mut videos = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read catalog line {}", line_no + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }

        match parse_line(trimmed).and_then(CatalogEntry::into_video) {
            Some(video) => videos.push(video),
            None => log::warn!("Skipping malformed catalog line {}: {:?}", line_no + 1, line),
        }
    }

    log::debug!("Parsed {} videos from text catalog", videos.len());
    Ok(videos)
}

fn parse_line(line: &str) -> Option<CatalogEntry> {
    let fields: Vec<&str> = line.split('|').map(str::trim).collect();
    if fields.len() < 2 {
        return None;
    }

    let tags = fields
        .get(2)
        .map(|raw| raw.split(',').map(str::to_string).collect())
        .unwrap_or_default();

    Some(CatalogEntry {
        title: Some(fields[0].to_string()),
        id: Some(fields[1].to_string()),
        tags,
        url: fields.get(3).map(|u| u.to_string()),
    })
}
