//! XML catalog reader
//!
//! ```xml
//! <catalog>
//!   <video id="amazing_cats_video_id">
//!     <title>Amazing Cats</title>
//!     <tag>#cat</tag>
//!     <tag>#animal</tag>
//!     <url>https://example.com/cats</url>
//!   </video>
//! </catalog>
//! ```

use super::model::CatalogEntry;
use crate::model::Video;
use anyhow::{bail, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::BufRead;

/// Parse an XML catalog and extract all videos
pub fn parse_xml<R: BufRead>(source: R) -> Result<Vec<Video>> {
    let mut reader = Reader::from_reader(source);
    reader.config_mut().trim_text(true);

    let mut videos = Vec::new();
    let mut current_entry: Option<CatalogEntry> = None;
    let mut current_element = String::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = e.name();
                match name.as_ref() {
                    b"video" => {
                        let mut entry = CatalogEntry::new();
                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == b"id" {
                                entry.id = attr.unescape_value().ok().map(|v| v.into_owned());
                            }
                        }
                        current_entry = Some(entry);
                    }
                    _ => {
                        if current_entry.is_some() {
                            current_element = String::from_utf8_lossy(name.as_ref()).to_string();
                        }
                    }
                }
            }

            Ok(Event::Text(e)) => {
                if let Some(ref mut entry) = current_entry {
                    let text = e.unescape().unwrap_or_default().to_string();

                    match current_element.as_str() {
                        "title" => entry.title = Some(text),
                        "tag" => entry.tags.push(text),
                        "url" => entry.url = Some(text),
                        // an <id> element is accepted when the attribute is absent
                        "id" if entry.id.is_none() => entry.id = Some(text),
                        _ => {}
                    }
                }
            }

            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"video" {
                    if let Some(entry) = current_entry.take() {
                        match entry.into_video() {
                            Some(video) => videos.push(video),
                            None => log::warn!(
                                "Skipping <video> without id near position {}",
                                reader.buffer_position()
                            ),
                        }
                    }
                }
                current_element.clear();
            }

            Ok(Event::Eof) => break,
            Err(e) => bail!(
                "XML parsing error at position {}: {}",
                reader.buffer_position(),
                e
            ),
            _ => {}
        }

        buf.clear();
    }

    log::debug!("Parsed {} videos from XML catalog", videos.len());
    Ok(videos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_videos() {
        let input = r#"<catalog>
            <video id="v1">
                <title>Amazing Cats</title>
                <tag>#cat</tag>
                <tag>#fun</tag>
                <url>https://example.com/v1</url>
            </video>
            <video>
                <id>v2</id>
                <title>Funny &amp; Dogs</title>
            </video>
        </catalog>"#;

        let videos = parse_xml(input.as_bytes()).unwrap();
        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0].id, "v1");
        assert_eq!(videos[0].tags, vec!["#cat".to_string(), "#fun".to_string()]);
        assert_eq!(videos[0].source_url, "https://example.com/v1");
        assert_eq!(videos[1].id, "v2");
        assert_eq!(videos[1].title, "Funny & Dogs");
    }

    #[test]
    fn test_video_without_id_is_skipped() {
        let input = "<catalog><video><title>Nameless</title></video></catalog>";
        let videos = parse_xml(input.as_bytes()).unwrap();
        assert!(videos.is_empty());
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        let input = "<catalog><video id=\"v1\"><title>Broken</video></catalog>";
        assert!(parse_xml(input.as_bytes()).is_err());
    }
}
