//! Catalog loading
//!
//! Reads video metadata once at startup. Two formats are supported:
//! pipe-delimited text (`videos.txt`) and XML (`*.xml`).

mod model;
mod text;
mod xml;

pub use text::parse_text;
pub use xml::parse_xml;

use crate::model::VideoCatalog;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Load a catalog file, picking the reader by extension
pub fn load_catalog(path: &Path) -> Result<VideoCatalog> {
    log::info!("Loading video catalog from {:?}", path);

    let file =
        File::open(path).with_context(|| format!("Failed to open video catalog: {:?}", path))?;
    let reader = BufReader::new(file);

    let is_xml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"));
    let videos = if is_xml {
        parse_xml(reader)
    } else {
        parse_text(reader)
    }
    .with_context(|| format!("Failed to parse video catalog: {:?}", path))?;

    let mut catalog = VideoCatalog::new();
    for video in videos {
        let id = video.id.clone();
        if !catalog.add_video(video) {
            log::warn!("Duplicate video id {:?} in catalog, keeping the first", id);
        }
    }

    log::info!("Loaded catalog: {} videos", catalog.len());
    Ok(catalog)
}
