// src/analyze/google.rs
// =============================================================================
// This module asks Google whether the target URL is in its index, using a
// plain `site:` search. Google serves the full results page only to
// browser-looking clients, so the request carries a desktop User-Agent.
//
// The check is a heuristic: "did not match any documents" in the results
// body means not indexed, any other 200 body counts as indexed, and a
// blocked or failed request is reported as such rather than guessed at.
// =============================================================================

use crate::report::{Finding, Section};
use reqwest::Client;
use std::time::Duration;
use url::Url;

const SEARCH_ENDPOINT: &str = "https://www.google.com/search";
const DESKTOP_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const NO_RESULTS_MARKER: &str = "did not match any documents";

/// Google index presence for the target URL
pub async fn google_section(target: &Url, timeout: Duration) -> Section {
    site_search(SEARCH_ENDPOINT, target, timeout).await
}

async fn site_search(endpoint: &str, target: &Url, timeout: Duration) -> Section {
    let mut section = Section::new("Google Search Analysis");

    let client = match Client::builder().timeout(timeout).build() {
        Ok(client) => client,
        Err(e) => {
            section.push(Finding::fail("Google", format!("HTTP client error: {}", e)));
            return section;
        }
    };

    let query = format!("site:{}", target);
    let result = client
        .get(endpoint)
        .query(&[("q", query.as_str())])
        .header("User-Agent", DESKTOP_UA)
        .send()
        .await;

    match result {
        Ok(response) => {
            let status = response.status().as_u16();
            match response.text().await {
                Ok(body) => section.push(judge_results(target, status, &body)),
                Err(e) => {
                    section.push(Finding::fail("Google", format!("Could not read results: {}", e)))
                }
            }
        }
        Err(e) => section.push(Finding::fail("Google", format!("Search request failed: {}", e))),
    }
    section
}

fn judge_results(target: &Url, status: u16, body: &str) -> Finding {
    if status != 200 {
        return Finding::fail(
            "Google",
            format!("Search returned status {}, cannot determine indexing.", status),
        );
    }
    if body.contains(NO_RESULTS_MARKER) {
        Finding::fail("Google", format!("{} is not indexed by Google.", target))
    } else {
        Finding::good("Google", format!("{} is indexed by Google.", target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Status;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn target() -> Url {
        Url::parse("https://example.com/").unwrap()
    }

    #[test]
    fn test_no_results_marker_means_not_indexed() {
        let finding = judge_results(&target(), 200, "Your search did not match any documents.");
        assert_eq!(finding.status, Status::Fail);
        assert!(finding.content.contains("not indexed"));
    }

    #[test]
    fn test_results_body_means_indexed() {
        let finding = judge_results(&target(), 200, "<div>About 1 result</div>");
        assert_eq!(finding.status, Status::Good);
    }

    #[test]
    fn test_blocked_request_is_reported_not_guessed() {
        let finding = judge_results(&target(), 429, "");
        assert_eq!(finding.status, Status::Fail);
        assert!(finding.content.contains("429"));
    }

    #[tokio::test]
    async fn test_site_search_sends_site_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "site:https://example.com/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("About 3 results"))
            .expect(1)
            .mount(&server)
            .await;

        let endpoint = format!("{}/search", server.uri());
        let section = site_search(&endpoint, &target(), Duration::from_secs(5)).await;

        assert_eq!(section.findings[0].status, Status::Good);
    }
}
