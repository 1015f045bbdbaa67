// src/checker/http.rs
// =============================================================================
// This module classifies the page's links and checks whether they are alive.
//
// Key functionality:
// - Resolves every raw href against the final page URL (relative,
//   scheme-relative, and absolute forms all work via Url::join)
// - Classifies http(s) links as Internal or External by comparing hosts
//   (case-insensitive, with a leading "www." stripped from both sides)
// - Keeps mailto:/javascript:/tel:/fragment links as a visible
//   "unsupported" category instead of dropping them
// - Verifies each DISTINCT target once: HEAD request first (lightweight,
//   no body), GET retry when the server rejects HEAD (405/501)
// - Runs checks concurrently with a bounded worker count, but fans results
//   out by target URL so the report keeps page-discovery order
//
// Failure policy: one link's timeout or connection error tags that link
// and nothing else. No retries, no backoff - this is a one-shot
// diagnostic, not a monitor.
//
// Rust concepts:
// - async/await: For concurrent network I/O
// - Enums with data: LinkTarget and CheckOutcome carry per-case payloads
// - Streams: buffer_unordered() for bounded concurrency
// =============================================================================

use futures::stream::{self, StreamExt};
use reqwest::Client;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use url::Url;

// Bounded worker count for link verification. Completion order varies;
// report order never does, because results are keyed by target URL.
const VERIFY_CONCURRENCY: usize = 16;

/// Internal = same host as the resolved page, External = anything else
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkScope {
    Internal,
    External,
}

/// Where a raw href points after normalization
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LinkTarget {
    /// An http(s) URL we can classify and verify
    Web { url: String, scope: LinkScope },
    /// mailto:, javascript:, tel:, data:, bare fragments, unparseable
    /// hrefs - reported but never fetched
    Unsupported { scheme: String },
}

/// What a verification attempt produced for one target URL
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum CheckOutcome {
    /// Got an HTTP response; the code speaks for itself
    Status { code: u16 },
    /// The check's own deadline expired
    Timeout,
    /// TLS/certificate failure
    SslError,
    /// Hostname did not resolve
    DnsError,
    /// TCP connection failed
    ConnectError,
    /// Anything else, with the error text
    Failed { detail: String },
}

impl CheckOutcome {
    /// 2xx and 3xx count as alive for the summary line
    pub fn is_ok(&self) -> bool {
        matches!(self, CheckOutcome::Status { code } if (200..400).contains(code))
    }
}

/// One hyperlink as found on the page, in discovery order.
///
/// `checked` is None when verification never ran for this link (links flag
/// off, or the target is unsupported) - a failed check is always an
/// explicit error variant, never a silent None.
#[derive(Debug, Clone, Serialize)]
pub struct PageLink {
    pub raw_href: String,
    pub target: LinkTarget,
    pub checked: Option<CheckOutcome>,
}

// Classifies raw hrefs against the resolved page's URL
//
// Pure function: no network, no state. Classification depends only on the
// link host and the page host, never on verification results, so running
// it twice over the same input gives identical scope tags.
pub fn classify_links(hrefs: &[String], final_url: &Url) -> Vec<PageLink> {
    hrefs
        .iter()
        .map(|raw| PageLink {
            raw_href: raw.clone(),
            target: classify_one(raw, final_url),
            checked: None,
        })
        .collect()
}

fn classify_one(raw: &str, final_url: &Url) -> LinkTarget {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return LinkTarget::Unsupported {
            scheme: "empty".to_string(),
        };
    }
    // A bare fragment navigates within the page; nothing to verify
    if trimmed.starts_with('#') {
        return LinkTarget::Unsupported {
            scheme: "fragment".to_string(),
        };
    }

    // Url::join handles absolute hrefs (replaces the base entirely),
    // scheme-relative ones (//host/path), and path-relative ones
    let mut resolved = match final_url.join(trimmed) {
        Ok(url) => url,
        Err(_) => {
            return LinkTarget::Unsupported {
                scheme: "invalid".to_string(),
            }
        }
    };

    match resolved.scheme() {
        "http" | "https" => {
            // The fragment is client-side only; two links differing just in
            // fragment are the same target
            resolved.set_fragment(None);
            let scope = if same_site(&resolved, final_url) {
                LinkScope::Internal
            } else {
                LinkScope::External
            };
            LinkTarget::Web {
                url: resolved.to_string(),
                scope,
            }
        }
        other => LinkTarget::Unsupported {
            scheme: other.to_string(),
        },
    }
}

// Host comparison for scope classification: case-insensitive, one leading
// "www." stripped from BOTH sides so www.example.com and example.com are
// the same site
fn same_site(link: &Url, page: &Url) -> bool {
    match (normalized_host(link), normalized_host(page)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn normalized_host(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_ascii_lowercase();
    Some(host.strip_prefix("www.").unwrap_or(&host).to_string())
}

// Verifies every distinct web target once and fans the results out
//
// A link repeated N times on the page costs one network call, and all N
// PageLink records end up with the same outcome. Unsupported targets are
// left untouched (checked stays None).
pub async fn verify_links(links: &mut [PageLink], timeout: Duration) {
    // Distinct targets, in first-seen order
    let mut seen = HashSet::new();
    let mut targets = Vec::new();
    for link in links.iter() {
        if let LinkTarget::Web { url, .. } = &link.target {
            if seen.insert(url.clone()) {
                targets.push(url.clone());
            }
        }
    }

    if targets.is_empty() {
        return;
    }

    // This client follows redirects: for liveness we want the status of
    // wherever the link ultimately lands
    let client = Client::builder()
        .timeout(timeout)
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .expect("Failed to create HTTP client");

    // One future per distinct target, at most VERIFY_CONCURRENCY in flight.
    // buffer_unordered yields results as they complete; keying them by URL
    // makes the completion order irrelevant.
    let futures = targets.into_iter().map(|url| {
        let client = client.clone();
        async move {
            let outcome = check_single(&client, &url).await;
            (url, outcome)
        }
    });

    let outcomes: HashMap<String, CheckOutcome> = stream::iter(futures)
        .buffer_unordered(VERIFY_CONCURRENCY)
        .collect()
        .await;

    for link in links.iter_mut() {
        if let LinkTarget::Web { url, .. } = &link.target {
            link.checked = outcomes.get(url).cloned();
        }
    }
}

// Checks a single target: HEAD first, GET if the server rejects HEAD
async fn check_single(client: &Client, url: &str) -> CheckOutcome {
    match client.head(url).send().await {
        Ok(response) => {
            let code = response.status().as_u16();
            // 405 Method Not Allowed / 501 Not Implemented usually mean
            // "no HEAD here"; the target may still be perfectly alive
            if code == 405 || code == 501 {
                match client.get(url).send().await {
                    Ok(response) => CheckOutcome::Status {
                        code: response.status().as_u16(),
                    },
                    Err(error) => categorize_error(error),
                }
            } else {
                CheckOutcome::Status { code }
            }
        }
        Err(error) => categorize_error(error),
    }
}

// Categorizes different error types from reqwest
//
// reqwest errors can happen for many reasons: network timeout, DNS
// resolution failure, SSL certificate issues, connection refused, ...
fn categorize_error(error: reqwest::Error) -> CheckOutcome {
    let error_string = error.to_string();

    if error.is_timeout() {
        CheckOutcome::Timeout
    } else if error.is_connect() {
        // Connection errors often mean DNS issues or host unreachable
        if error_string.contains("dns") {
            CheckOutcome::DnsError
        } else {
            CheckOutcome::ConnectError
        }
    } else if error_string.contains("certificate") || error_string.contains("ssl") {
        CheckOutcome::SslError
    } else {
        CheckOutcome::Failed {
            detail: error_string,
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why HEAD before GET?
//    - HEAD returns only headers, no body: cheap for us and the remote
//    - Some servers refuse HEAD outright, hence the 405/501 fallback
//
// 2. What is buffer_unordered?
//    - StreamExt::buffer_unordered(N) runs up to N futures concurrently
//    - Results arrive in completion order, which is why each future
//      returns its URL alongside the outcome
//
// 3. Why clone the client?
//    - Each async task needs its own handle to the client
//    - Client is cheap to clone (it's a reference counter internally)
//
// 4. Why &mut [PageLink] instead of returning a new Vec?
//    - The links were classified in page order; verification only fills
//      in the `checked` field, so mutating in place keeps that order
//      trivially intact
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn page(url: &str) -> Url {
        Url::parse(url).unwrap()
    }

    fn hrefs(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_classify_internal_and_external() {
        let final_url = page("http://b.example/");
        let links = classify_links(&hrefs(&["/about", "http://other.com/x"]), &final_url);

        assert_eq!(
            links[0].target,
            LinkTarget::Web {
                url: "http://b.example/about".to_string(),
                scope: LinkScope::Internal,
            }
        );
        assert_eq!(
            links[1].target,
            LinkTarget::Web {
                url: "http://other.com/x".to_string(),
                scope: LinkScope::External,
            }
        );
    }

    #[test]
    fn test_classify_www_and_case_are_normalized() {
        let final_url = page("https://www.Example.COM/page");
        let links = classify_links(
            &hrefs(&["https://example.com/a", "https://WWW.EXAMPLE.com/b"]),
            &final_url,
        );

        for link in &links {
            match &link.target {
                LinkTarget::Web { scope, .. } => assert_eq!(*scope, LinkScope::Internal),
                other => panic!("expected web link, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_classify_scheme_relative_href() {
        let final_url = page("https://example.com/");
        let links = classify_links(&hrefs(&["//cdn.example.net/lib.js"]), &final_url);

        assert_eq!(
            links[0].target,
            LinkTarget::Web {
                url: "https://cdn.example.net/lib.js".to_string(),
                scope: LinkScope::External,
            }
        );
    }

    #[test]
    fn test_classify_unsupported_schemes_are_kept() {
        let final_url = page("https://example.com/");
        let links = classify_links(
            &hrefs(&["mailto:x@y.z", "javascript:void(0)", "tel:+123", "#top", ""]),
            &final_url,
        );

        let schemes: Vec<&str> = links
            .iter()
            .map(|l| match &l.target {
                LinkTarget::Unsupported { scheme } => scheme.as_str(),
                other => panic!("expected unsupported, got {:?}", other),
            })
            .collect();
        assert_eq!(schemes, vec!["mailto", "javascript", "tel", "fragment", "empty"]);
    }

    #[test]
    fn test_classify_is_idempotent() {
        let final_url = page("https://example.com/deep/page");
        let raw = hrefs(&["/a", "../b", "https://other.org/", "mailto:x@y"]);
        let first = classify_links(&raw, &final_url);
        let second = classify_links(&raw, &final_url);

        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.target, b.target);
        }
    }

    #[test]
    fn test_fragment_is_stripped_from_web_targets() {
        let final_url = page("https://example.com/");
        let links = classify_links(&hrefs(&["/page#section", "/page#other"]), &final_url);

        // Both normalize to the same target URL
        match (&links[0].target, &links[1].target) {
            (LinkTarget::Web { url: a, .. }, LinkTarget::Web { url: b, .. }) => {
                assert_eq!(a, b);
                assert_eq!(a, "https://example.com/page");
            }
            other => panic!("expected two web links, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_verify_deduplicates_repeated_targets() {
        let server = MockServer::start().await;
        // expect(1): the mock server itself asserts the dedup property
        Mock::given(method("HEAD"))
            .and(path("/dup"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let final_url = page(&server.uri());
        let mut links = classify_links(&hrefs(&["/dup", "/dup", "/dup"]), &final_url);
        verify_links(&mut links, Duration::from_secs(5)).await;

        for link in &links {
            assert_eq!(link.checked, Some(CheckOutcome::Status { code: 200 }));
        }
    }

    #[tokio::test]
    async fn test_verify_falls_back_to_get_on_405() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/no-head"))
            .respond_with(ResponseTemplate::new(405))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/no-head"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let final_url = page(&server.uri());
        let mut links = classify_links(&hrefs(&["/no-head"]), &final_url);
        verify_links(&mut links, Duration::from_secs(5)).await;

        assert_eq!(links[0].checked, Some(CheckOutcome::Status { code: 200 }));
    }

    #[tokio::test]
    async fn test_verify_reports_broken_links() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let final_url = page(&server.uri());
        let mut links = classify_links(&hrefs(&["/gone"]), &final_url);
        verify_links(&mut links, Duration::from_secs(5)).await;

        assert_eq!(links[0].checked, Some(CheckOutcome::Status { code: 404 }));
        assert!(!links[0].checked.as_ref().unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_one_timeout_does_not_affect_siblings() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/slow"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;
        Mock::given(method("HEAD"))
            .and(path("/fast"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let final_url = page(&server.uri());
        let mut links = classify_links(&hrefs(&["/slow", "/fast"]), &final_url);
        verify_links(&mut links, Duration::from_millis(200)).await;

        assert_eq!(links[0].checked, Some(CheckOutcome::Timeout));
        assert_eq!(links[1].checked, Some(CheckOutcome::Status { code: 200 }));
    }

    #[tokio::test]
    async fn test_unsupported_links_are_never_checked() {
        let final_url = page("https://example.com/");
        let mut links = classify_links(&hrefs(&["mailto:x@y.z"]), &final_url);
        verify_links(&mut links, Duration::from_secs(1)).await;

        assert_eq!(links[0].checked, None);
    }
}
