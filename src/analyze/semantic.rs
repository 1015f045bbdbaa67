// src/analyze/semantic.rs
// =============================================================================
// This module answers "what is this page actually about":
//
// 1. Extract the visible text (text nodes, minus <script>/<style> content)
// 2. Detect the page language with whatlang
// 3. Drop the stopwords for that language
// 4. Report the ten most frequent remaining words
//
// The top-ten ordering is deterministic: by count descending, ties broken
// alphabetically, so the same page always produces the same keyword list.
// =============================================================================

use crate::analyze::stopwords::Stopwords;
use crate::fetch::ResolvedPage;
use crate::report::{Finding, Section};
use scraper::{Html, Selector};
use std::cmp::Reverse;
use std::collections::HashMap;

const TOP_KEYWORDS: usize = 10;

/// Language detection plus stopword-filtered keyword frequency
pub fn semantic_section(page: &ResolvedPage, stopwords: &Stopwords) -> Section {
    let mut section = Section::new("Semantic Analysis");

    let text = visible_text(&page.body);
    if text.is_empty() {
        section.push(Finding::fail("Semantic", "No text content found on the page."));
        return section;
    }

    let Some(info) = whatlang::detect(&text) else {
        section.push(Finding::fail("Language", "Could not detect the page language."));
        return section;
    };
    let lang = info.lang();
    section.push(Finding::good("Language", lang.eng_name()));

    let Some(table) = stopwords.for_lang(lang) else {
        section.push(Finding::fail(
            "Keywords",
            format!("No stopword list for {}, keyword analysis unavailable.", lang.eng_name()),
        ));
        return section;
    };

    let top = top_keywords(&text, table, TOP_KEYWORDS);
    if top.is_empty() {
        section.push(Finding::fail("Keywords", "No keywords left after filtering."));
        return section;
    }

    section.push(Finding::header("Top keywords"));
    for (word, count) in top {
        section.push(Finding::neutral("Keyword", format!("{} ({} occurrences)", word, count)));
    }
    section
}

// Text nodes under <body>, skipping script and style contents, joined
// with single spaces
fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let body_selector = Selector::parse("body").unwrap();
    let Some(body) = document.select(&body_selector).next() else {
        return String::new();
    };

    let mut parts: Vec<String> = Vec::new();
    for node in body.descendants() {
        if let Some(text) = node.value().as_text() {
            let parent = node
                .parent()
                .and_then(|p| p.value().as_element())
                .map(|e| e.name());
            if matches!(parent, Some("script") | Some("style")) {
                continue;
            }
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                parts.push(trimmed.to_string());
            }
        }
    }
    parts.join(" ")
}

fn top_keywords(
    text: &str,
    stopwords: &std::collections::HashSet<&'static str>,
    limit: usize,
) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let lowered = text.to_lowercase();
    for word in lowered.split(|c: char| !c.is_alphanumeric()) {
        // Single letters and bare numbers say nothing about the topic
        if word.chars().count() < 2 || word.chars().all(|c| c.is_numeric()) {
            continue;
        }
        if stopwords.contains(word) {
            continue;
        }
        *counts.entry(word.to_string()).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| (Reverse(a.1), &a.0).cmp(&(Reverse(b.1), &b.0)));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use url::Url;

    fn page_with(body: &str) -> ResolvedPage {
        ResolvedPage {
            url: Url::parse("https://example.com/").unwrap(),
            status: 200,
            body: body.to_string(),
            server: None,
            content_type: None,
            response_time: Duration::from_millis(1),
        }
    }

    fn english_page() -> ResolvedPage {
        page_with(
            "<html><body>\
             <h1>Coffee roasting guide</h1>\
             <p>Roasting coffee at home is rewarding. The roasting process \
             transforms green coffee beans, and every coffee lover should try \
             roasting beans at least once. Fresh beans make better coffee.</p>\
             <script>var coffee = 'not visible';</script>\
             </body></html>",
        )
    }

    #[test]
    fn test_detects_english_and_ranks_keywords() {
        let stopwords = Stopwords::load();
        let section = semantic_section(&english_page(), &stopwords);

        let language = section.findings.iter().find(|f| f.label == "Language").unwrap();
        assert_eq!(language.content, "English");

        let keywords: Vec<&str> = section
            .findings
            .iter()
            .filter(|f| f.label == "Keyword")
            .map(|f| f.content.as_str())
            .collect();
        assert!(keywords[0].starts_with("coffee"));
        assert!(keywords.iter().any(|k| k.starts_with("roasting")));
    }

    #[test]
    fn test_script_content_is_not_counted() {
        let text = visible_text(
            "<html><body><p>visible words</p><script>invisible()</script></body></html>",
        );
        assert!(text.contains("visible words"));
        assert!(!text.contains("invisible"));
    }

    #[test]
    fn test_empty_body_fails_cleanly() {
        let stopwords = Stopwords::load();
        let section = semantic_section(&page_with("<html><body></body></html>"), &stopwords);
        assert!(section.findings[0].content.contains("No text content"));
    }

    #[test]
    fn test_keyword_ties_break_alphabetically() {
        let stopwords = Stopwords::load();
        let table = stopwords.for_lang(whatlang::Lang::Eng).unwrap();
        let ranked = top_keywords("zebra apple zebra apple mango", table, 10);

        assert_eq!(ranked[0], ("apple".to_string(), 2));
        assert_eq!(ranked[1], ("zebra".to_string(), 2));
        assert_eq!(ranked[2], ("mango".to_string(), 1));
    }

    #[test]
    fn test_stopwords_and_numbers_are_filtered() {
        let stopwords = Stopwords::load();
        let table = stopwords.for_lang(whatlang::Lang::Eng).unwrap();
        let ranked = top_keywords("the the the 2024 x rust rust", table, 10);

        assert_eq!(ranked, vec![("rust".to_string(), 2)]);
    }
}
