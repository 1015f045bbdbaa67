// src/analyze/media.rs
// =============================================================================
// This module inventories the media content of the page:
//
// - <video>/<audio> elements: reported with their source, failed when the
//   source is missing
// - <img> (and <e-img>) elements: alt text presence, inline data: URIs
//   noted and skipped, and for everything else a fetch of the image itself
//   to report its size and format
//
// The HTML scan happens first and produces plain structs; the image
// fetches happen afterwards. scraper's Html is not Send, so it must never
// be held across an .await point - separating "scan" from "fetch" keeps
// that boundary obvious.
//
// A failed image fetch marks that one image and moves on; media analysis
// never aborts the run.
// =============================================================================

use crate::fetch::ResolvedPage;
use crate::report::{Finding, Section, Status};
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;

// Long alt texts and filenames are truncated for the report
const DISPLAY_LIMIT: usize = 50;

struct AvItem {
    /// "video" or "audio"
    kind: String,
    src: Option<String>,
}

struct ImageItem {
    src: String,
    alt: Option<String>,
}

/// Media inventory with per-image size/format lookups
pub async fn media_section(page: &ResolvedPage, timeout: Duration) -> Section {
    let mut section = Section::new("SEO Media Analysis");
    let (av_items, images) = scan_media(&page.body);

    if av_items.is_empty() && images.is_empty() {
        section.push(Finding::neutral("Media", "No media elements found."));
        return section;
    }

    for item in &av_items {
        let label = if item.kind == "video" { "Video" } else { "Audio" };
        match &item.src {
            Some(src) => section.push(Finding::good(&format!("{} Source", label), src.clone())),
            None => section.push(Finding::fail(label, "No source found")),
        }
    }

    let client = match Client::builder().timeout(timeout).build() {
        Ok(client) => client,
        Err(e) => {
            section.push(Finding::fail("Media", format!("HTTP client error: {}", e)));
            return section;
        }
    };

    for image in &images {
        section.push(inspect_image(&client, page, image).await);
    }

    section
}

// Walks the document once and collects plain data, so nothing borrowed
// from the parse survives into the async fetches below
fn scan_media(html: &str) -> (Vec<AvItem>, Vec<ImageItem>) {
    let document = Html::parse_document(html);

    let av_selector = Selector::parse("video, audio").unwrap();
    let av_items = document
        .select(&av_selector)
        .map(|el| AvItem {
            kind: el.value().name().to_string(),
            src: el.value().attr("src").map(|s| s.to_string()),
        })
        .collect();

    // e-img is a custom element some frameworks emit for lazy images
    let img_selector = Selector::parse("img, e-img").unwrap();
    let images = document
        .select(&img_selector)
        .filter_map(|el| {
            el.value().attr("src").map(|src| ImageItem {
                src: src.to_string(),
                alt: el.value().attr("alt").map(|s| s.to_string()),
            })
        })
        .collect();

    (av_items, images)
}

async fn inspect_image(client: &Client, page: &ResolvedPage, image: &ImageItem) -> Finding {
    // Inline images carry their bytes in the src attribute; there is
    // nothing to fetch and the "filename" would be the whole payload
    if image.src.starts_with("data:") {
        return Finding::neutral("Image", "Inline image detected, no further analysis");
    }

    let name = display_name(&image.src);
    let alt = image
        .alt
        .as_deref()
        .filter(|a| !a.is_empty())
        .map(|a| truncate(a, DISPLAY_LIMIT));

    let absolute = match page.url.join(&image.src) {
        Ok(url) => url,
        Err(_) => {
            return Finding::fail("Image", format!("{}, unparseable source URL", name));
        }
    };

    match client.get(absolute.as_str()).send().await {
        Ok(response) => {
            let format = response
                .headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("Unknown")
                .to_string();
            let size_kb = match response.bytes().await {
                Ok(bytes) => bytes.len() as f64 / 1024.0,
                Err(_) => 0.0,
            };
            let status = if alt.is_some() {
                Status::Good
            } else {
                Status::Fail
            };
            Finding::from_parts(
                status,
                "Image",
                format!(
                    "Filename: {}, ALT: {}, Size: {:.2} KB, Format: {}",
                    name,
                    alt.as_deref().unwrap_or("NOT PROVIDED"),
                    size_kb,
                    format
                ),
            )
        }
        Err(e) => Finding::fail("Image", format!("{}, Error fetching image: {}", name, e)),
    }
}

// Last path segment of the source, without query or fragment, truncated
fn display_name(src: &str) -> String {
    let base = src.rsplit('/').next().unwrap_or(src);
    let base = base.split('?').next().unwrap_or(base);
    let base = base.split('#').next().unwrap_or(base);
    truncate(base, DISPLAY_LIMIT)
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let cut: String = text.chars().take(limit).collect();
        format!("{}...", cut)
    }
}
