// Copyright (c) 2025, Imprint contributors
// SPDX-License-Identifier: BSD-3-Clause

//! RSS feed fetching and image extraction for the inspiration gallery.
//!
//! Feeds are fetched over plain HTTP and pull-parsed; each `<item>` is
//! mined for a usable image URL in three stages: `media:content`
//! elements ranked by their `width` attribute, then any child element
//! carrying a `url` attribute that looks like an image, then an `<img>`
//! tag inside the HTML description.

use crate::models::gallery::FeedImage;
use anyhow::{Context, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashSet;

/// Feeds scanned for gallery images.
pub const FEED_URLS: &[&str] =
    &["https://www.theguardian.com/news/series/ten-best-photographs-of-the-day/rss"];

/// Hard cap on items collected across all feeds.
const MAX_COLLECTED: usize = 20;
/// Number of entries actually shown in the gallery.
const MAX_RESULTS: usize = 12;

const TITLE_LIMIT: usize = 150;
const DESCRIPTION_LIMIT: usize = 200;

/// Fetch every configured feed and return a deduplicated, capped list of
/// extracted images. Feed-level failures are skipped, not fatal.
/// Blocking; run on a worker thread.
pub fn fetch_feed_images() -> Vec<FeedImage> {
    let mut collected = Vec::new();

    for feed_url in FEED_URLS {
        match fetch_feed(feed_url) {
            Ok(xml) => {
                let images = parse_feed(&xml, feed_url);
                log::info!("found {} images in {feed_url}", images.len());
                collected.extend(images);
            }
            Err(e) => {
                log::warn!("skipping feed {feed_url}: {e:#}");
                continue;
            }
        }
        if collected.len() >= MAX_COLLECTED {
            break;
        }
    }

    dedup_by_url(collected)
}

fn fetch_feed(url: &str) -> Result<String> {
    reqwest::blocking::get(url)
        .with_context(|| format!("failed to fetch {url}"))?
        .error_for_status()
        .with_context(|| format!("server rejected {url}"))?
        .text()
        .with_context(|| format!("failed to read body of {url}"))
}

/// Drop entries whose resolved image URL was already seen, keeping first
/// occurrences, and cap the result.
fn dedup_by_url(images: Vec<FeedImage>) -> Vec<FeedImage> {
    let mut seen = HashSet::new();
    let mut unique: Vec<FeedImage> = images
        .into_iter()
        .filter(|img| seen.insert(img.image_url.clone()))
        .collect();
    unique.truncate(MAX_RESULTS);
    unique
}

/// Which item child's text is currently being captured.
enum Field {
    None,
    Title,
    Description,
}

#[derive(Default)]
struct ItemDraft {
    title: String,
    description: String,
    /// `media:content` URLs with their advertised width.
    media: Vec<(String, u32)>,
    /// Any other child element carrying a `url` attribute.
    child_urls: Vec<String>,
}

impl ItemDraft {
    /// Resolve the best image URL per the three-stage fallback.
    fn image_url(&self) -> Option<String> {
        if let Some(first) = self.media.first() {
            // Keep the first entry on width ties
            let mut best = first;
            for candidate in &self.media[1..] {
                if candidate.1 > best.1 {
                    best = candidate;
                }
            }
            return Some(best.0.clone());
        }
        if let Some(url) = self.child_urls.iter().find(|u| looks_like_image_url(u)) {
            return Some(url.clone());
        }
        extract_description_img(&self.description)
    }
}

/// Parse one RSS document into gallery entries.
pub fn parse_feed(xml: &str, source_url: &str) -> Vec<FeedImage> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut images = Vec::new();
    let mut in_item = false;
    let mut field = Field::None;
    let mut draft = ItemDraft::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                let name = e.name();
                if name.as_ref() == b"item" {
                    in_item = true;
                    draft = ItemDraft::default();
                } else if in_item {
                    match name.as_ref() {
                        b"title" => field = Field::Title,
                        b"description" => field = Field::Description,
                        b"media:content" => {
                            let mut url = None;
                            let mut width = 0u32;
                            for attr in e.attributes().flatten() {
                                match attr.key.as_ref() {
                                    b"url" => url = attr.unescape_value().ok().map(String::from),
                                    b"width" => {
                                        width = attr
                                            .unescape_value()
                                            .ok()
                                            .and_then(|v| v.parse().ok())
                                            .unwrap_or(0)
                                    }
                                    _ => {}
                                }
                            }
                            if let Some(url) = url {
                                draft.media.push((url, width));
                            }
                        }
                        _ => {
                            // Generic fallback: remember any url attribute
                            for attr in e.attributes().flatten() {
                                if attr.key.as_ref() == b"url" {
                                    if let Ok(value) = attr.unescape_value() {
                                        draft.child_urls.push(value.into_owned());
                                    }
                                }
                            }
                        }
                    }
                }
            }
            Ok(Event::Text(t)) => {
                if in_item {
                    let text = t.unescape().unwrap_or_default();
                    match field {
                        Field::Title => draft.title.push_str(&text),
                        Field::Description => draft.description.push_str(&text),
                        Field::None => {}
                    }
                }
            }
            Ok(Event::CData(t)) => {
                if in_item {
                    let text = String::from_utf8_lossy(&t.into_inner()).into_owned();
                    match field {
                        Field::Title => draft.title.push_str(&text),
                        Field::Description => draft.description.push_str(&text),
                        Field::None => {}
                    }
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"item" => {
                    in_item = false;
                    if let Some(image_url) = draft.image_url() {
                        if !draft.title.is_empty() {
                            images.push(FeedImage {
                                title: truncate(&draft.title, TITLE_LIMIT),
                                description: clean_description(&draft.description),
                                image_url,
                                source_name: source_name(source_url).to_string(),
                            });
                        }
                    }
                }
                b"title" | b"description" => field = Field::None,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!("malformed feed from {source_url}: {e}");
                break;
            }
            Ok(_) => {}
        }
    }

    images
}

fn looks_like_image_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.contains("i.guim.co.uk")
        || [".jpg", ".jpeg", ".png", ".gif", ".webp"]
            .iter()
            .any(|ext| lower.contains(ext))
}

/// Pull the `src` (or `data-src`) of the first `<img>` tag out of an
/// HTML fragment. Descriptions are rarely well-formed XML, so this is a
/// plain scan rather than a parse.
fn extract_description_img(html: &str) -> Option<String> {
    let img_start = html.find("<img")?;
    let tag_end = html[img_start..].find('>')? + img_start;
    let tag = &html[img_start..tag_end];

    for attr in ["src", "data-src"] {
        if let Some(url) = attr_value(tag, attr) {
            return Some(url);
        }
    }
    None
}

fn attr_value(tag: &str, name: &str) -> Option<String> {
    let mut search = 0;
    while let Some(rel) = tag[search..].find(name) {
        let at = search + rel;
        // Reject substring hits like "data-src" when looking for "src"
        let preceded_ok = at == 0
            || tag[..at]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_whitespace());
        let rest = tag[at + name.len()..].trim_start();
        if preceded_ok {
            if let Some(rest) = rest.strip_prefix('=') {
                let rest = rest.trim_start();
                let quote = rest.chars().next()?;
                if quote == '"' || quote == '\'' {
                    let value = &rest[1..];
                    let end = value.find(quote)?;
                    let url = &value[..end];
                    if !url.is_empty() {
                        return Some(url.to_string());
                    }
                }
            }
        }
        search = at + name.len();
    }
    None
}

/// Strip tags, collapse whitespace, and truncate for the caption.
fn clean_description(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.len() > DESCRIPTION_LIMIT {
        format!("{}...", truncate(&collapsed, DESCRIPTION_LIMIT))
    } else {
        collapsed
    }
}

fn truncate(s: &str, limit: usize) -> String {
    s.char_indices()
        .take_while(|(i, _)| *i < limit)
        .map(|(_, c)| c)
        .collect()
}

fn source_name(url: &str) -> &'static str {
    if url.contains("theguardian.com") {
        "The Guardian"
    } else if url.contains("reuters.com") {
        "Reuters"
    } else if url.contains("theatlantic.com") {
        "The Atlantic"
    } else if url.contains("bbci.co.uk") {
        "BBC"
    } else if url.contains("nationalgeographic.com") {
        "National Geographic"
    } else {
        "News Source"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUARDIAN: &str = "https://www.theguardian.com/news/series/photos/rss";

    #[test]
    fn test_media_content_ranked_by_width() {
        let xml = r#"<rss><channel><item>
            <title>Morning light</title>
            <description>A pier at dawn</description>
            <media:content url="https://i.guim.co.uk/small.jpg" width="140"/>
            <media:content url="https://i.guim.co.uk/large.jpg" width="460"/>
        </item></channel></rss>"#;

        let images = parse_feed(xml, GUARDIAN);
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].image_url, "https://i.guim.co.uk/large.jpg");
        assert_eq!(images[0].title, "Morning light");
        assert_eq!(images[0].source_name, "The Guardian");
    }

    #[test]
    fn test_child_url_attribute_fallback() {
        let xml = r#"<rss><channel><item>
            <title>Harbour</title>
            <enclosure url="https://example.com/photo.jpeg" type="image/jpeg"/>
        </item></channel></rss>"#;

        let images = parse_feed(xml, "https://example.com/rss");
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].image_url, "https://example.com/photo.jpeg");
        assert_eq!(images[0].source_name, "News Source");
    }

    #[test]
    fn test_description_img_fallback() {
        let xml = r#"<rss><channel><item>
            <title>Old town</title>
            <description><![CDATA[<p>Caption</p><img src="https://example.com/town.png" alt=""/>]]></description>
        </item></channel></rss>"#;

        let images = parse_feed(xml, "https://example.com/rss");
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].image_url, "https://example.com/town.png");
        assert_eq!(images[0].description, "Caption");
    }

    #[test]
    fn test_item_without_image_is_skipped() {
        let xml = r#"<rss><channel><item>
            <title>Text only</title>
            <description>No picture here</description>
        </item></channel></rss>"#;

        assert!(parse_feed(xml, GUARDIAN).is_empty());
    }

    #[test]
    fn test_dedup_by_resolved_url() {
        let entry = |url: &str, title: &str| FeedImage {
            title: title.to_string(),
            description: String::new(),
            image_url: url.to_string(),
            source_name: "News Source".to_string(),
        };
        let images = dedup_by_url(vec![
            entry("https://example.com/a.jpg", "first"),
            entry("https://example.com/a.jpg", "duplicate"),
            entry("https://example.com/b.jpg", "second"),
        ]);
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].title, "first");
        assert_eq!(images[1].image_url, "https://example.com/b.jpg");
    }

    #[test]
    fn test_result_cap() {
        let images: Vec<FeedImage> = (0..30)
            .map(|i| FeedImage {
                title: format!("item {i}"),
                description: String::new(),
                image_url: format!("https://example.com/{i}.jpg"),
                source_name: "News Source".to_string(),
            })
            .collect();
        assert_eq!(dedup_by_url(images).len(), MAX_RESULTS);
    }

    #[test]
    fn test_clean_description_strips_tags_and_truncates() {
        let cleaned = clean_description("<p>A  <b>short</b>\n caption</p>");
        assert_eq!(cleaned, "A short caption");

        let long = format!("<p>{}</p>", "word ".repeat(100));
        let cleaned = clean_description(&long);
        assert!(cleaned.ends_with("..."));
        assert!(cleaned.len() <= DESCRIPTION_LIMIT + 3);
    }

    #[test]
    fn test_attr_value_ignores_data_src_when_scanning_src() {
        let tag = r#"<img data-src="https://example.com/lazy.png" src="https://example.com/real.png""#;
        assert_eq!(
            attr_value(tag, "src").as_deref(),
            Some("https://example.com/real.png")
        );
        assert_eq!(
            attr_value(tag, "data-src").as_deref(),
            Some("https://example.com/lazy.png")
        );
    }
}
