// src/checker/html.rs
// =============================================================================
// This module extracts hyperlink targets from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Extraction is deliberately dumb: it returns the raw href strings in the
// order they appear in the document and nothing else. Resolving them
// against the page URL, filtering schemes, and classifying internal vs
// external all happen in the http submodule - keeping raw values around is
// what lets the report show mailto:/javascript: links as "unverified"
// instead of silently dropping them.
//
// Malformed markup is not an error: html5ever recovers and parses what it
// can, so a broken page just yields fewer links.
// =============================================================================

use scraper::{Html, Selector};

// Extracts all raw link targets from HTML content
//
// Parameters:
//   html: the HTML content to parse (borrowed as &str)
//
// Returns: Vec<String> of href attribute values in document order,
// duplicates included (the verifier deduplicates, the report does not)
//
// Example:
//   html = "<a href='/docs'>Docs</a><a href='mailto:x@y'>Mail</a>"
//   result = ["/docs", "mailto:x@y"]
pub fn extract_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    // Selector::parse returns Result, so we use .unwrap() which panics on
    // error. This is OK here because our selector is a constant and known
    // to be valid.
    let selector = Selector::parse("a[href]").unwrap();

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.to_string())
        .collect()
}
