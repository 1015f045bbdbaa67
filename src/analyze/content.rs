// src/analyze/content.rs
// =============================================================================
// This module reads the SEO-relevant content structure out of the page:
//
// - head_section: <title>, meta description, and canonical link from the
//   <head>, each judged against the character ranges search engines
//   actually display (title 50-60, description 150-160)
// - headings_section: every H1/H2/H3 in document order, with an H1 length
//   limit of 70 characters and explicit failures for "no H1" and
//   "more than one H1"
//
// Both are single-pass scans over the parsed document. No network.
// =============================================================================

use crate::fetch::ResolvedPage;
use crate::report::{Finding, Section, Status};
use scraper::{Html, Selector};

// SEO character count limits
const TITLE_LIMITS: (usize, usize) = (50, 60);
const DESCRIPTION_LIMITS: (usize, usize) = (150, 160);
const H1_LIMIT: usize = 70;

/// Title, meta description, and canonical link from the page head
pub fn head_section(page: &ResolvedPage) -> Section {
    let mut section = Section::new("SEO Header Analysis");
    let document = Html::parse_document(&page.body);

    let head_selector = Selector::parse("head").unwrap();
    if document.select(&head_selector).next().is_none() {
        section.push(Finding::fail("Header", "No <head> section found."));
        return section;
    }

    let title = select_text(&document, "head > title");
    section.push(judged(
        "Title",
        title.as_deref().unwrap_or(""),
        TITLE_LIMITS,
    ));

    let description = select_attr(&document, r#"head meta[name="description"]"#, "content");
    section.push(judged(
        "Description",
        description.as_deref().unwrap_or(""),
        DESCRIPTION_LIMITS,
    ));

    if let Some(canonical) = select_attr(&document, r#"head link[rel="canonical"]"#, "href") {
        section.push(Finding::good("Canonical", canonical));
    }

    section
}

/// H1/H2/H3 texts in document order
pub fn headings_section(page: &ResolvedPage) -> Section {
    let mut section = Section::new("SEO Content Analysis");
    let document = Html::parse_document(&page.body);

    let h1_selector = Selector::parse("h1").unwrap();
    let h1_count = document.select(&h1_selector).count();
    if h1_count == 0 {
        section.push(Finding::fail("Headings", "No H1 tag found."));
    }

    // One combined selector keeps the headings in document order instead
    // of listing all H1s, then all H2s, then all H3s
    let selector = Selector::parse("h1, h2, h3").unwrap();
    for element in document.select(&selector) {
        let name = element.value().name().to_uppercase();
        let text: String = element.text().collect::<String>().trim().to_string();

        let status = if name == "H1" {
            evaluate_length(&text, (1, H1_LIMIT))
        } else if text.is_empty() {
            Status::Fail
        } else {
            Status::Good
        };
        section.push(Finding::from_parts(status, &name, text));
    }

    if h1_count > 1 {
        section.push(Finding::fail("Headings", "Multiple H1 tags found."));
    }

    section
}

// Judges a head field against its optimal character range
fn judged(label: &str, content: &str, limits: (usize, usize)) -> Finding {
    Finding::from_parts(evaluate_length(content, limits), label, content.to_string())
}

// Empty content fails; in-range content is good; anything else is neutral
// (present but not the length search engines prefer)
fn evaluate_length(content: &str, (min, max): (usize, usize)) -> Status {
    if content.is_empty() {
        Status::Fail
    } else if (min..=max).contains(&content.chars().count()) {
        Status::Good
    } else {
        Status::Neutral
    }
}

fn select_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).unwrap();
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

fn select_attr(document: &Html, selector: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(selector).unwrap();
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(|s| s.to_string())
}
