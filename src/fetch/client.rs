// src/fetch/client.rs
// =============================================================================
// This module makes single HTTP GET requests and reports what happened in a
// form the redirect resolver can reason about.
//
// Key functionality:
// - One GET per call, with a per-request timeout
// - Redirects are NOT followed here: the resolver owns the hop loop, so the
//   client is built with redirect::Policy::none()
// - Failures come back as a typed enum (Timeout vs Network), because the
//   resolver reports those two cases differently
//
// Rust concepts:
// - Result<T, E> with a custom error enum
// - std::fmt::Display to make the error printable
// =============================================================================

use reqwest::Client;
use std::fmt;
use std::time::{Duration, Instant};
use url::Url;

/// What a single fetch produced: the status line plus the handful of
/// headers and the body the rest of the tool cares about.
#[derive(Debug)]
pub struct FetchResponse {
    pub status: u16,
    /// Raw Location header, present on redirect responses
    pub location: Option<String>,
    /// Server header, used by the report
    pub server: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
    /// Wall-clock time for this one request
    pub response_time: Duration,
}

impl FetchResponse {
    /// A response the resolver should chase: 3xx with a Location header.
    /// A 3xx without Location has nowhere to go and counts as terminal.
    pub fn is_followable_redirect(&self) -> bool {
        (300..400).contains(&self.status) && self.location.is_some()
    }
}

/// Why a fetch failed. The resolver maps Timeout and Network to different
/// report outcomes, so they must stay distinguishable here.
#[derive(Debug)]
pub enum FetchError {
    /// The per-request deadline expired
    Timeout,
    /// Everything else: connection refused, DNS failure, TLS failure, ...
    Network(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Timeout => write!(f, "request timed out"),
            FetchError::Network(detail) => write!(f, "network error: {}", detail),
        }
    }
}

/// Wraps a reqwest client configured for manual redirect handling.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        // redirect::Policy::none() hands every 3xx back to us untouched;
        // the resolver decides whether and where to hop next.
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { client })
    }

    /// Perform one GET. Never retries: a failure here is final and the
    /// caller reports it.
    pub async fn fetch(&self, url: &Url) -> Result<FetchResponse, FetchError> {
        let start = Instant::now();

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(categorize_error)?;

        let status = response.status().as_u16();
        let location = header_value(&response, "location");
        let server = header_value(&response, "server");
        let content_type = header_value(&response, "content-type");

        // Reading the body can also time out (the deadline covers the
        // whole request), so it goes through the same error mapping.
        let body = response.text().await.map_err(categorize_error)?;

        Ok(FetchResponse {
            status,
            location,
            server,
            content_type,
            body,
            response_time: start.elapsed(),
        })
    }
}

// Pulls a single header out as an owned String, if present and valid UTF-8
fn header_value(response: &reqwest::Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

// Splits reqwest's one error type into the two cases the resolver needs
fn categorize_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Network(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_does_not_follow_redirects() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(301).insert_header("location", "/elsewhere"))
            .mount(&server)
            .await;

        let fetcher = Fetcher::new(Duration::from_secs(5)).unwrap();
        let url = Url::parse(&server.uri()).unwrap();
        let response = fetcher.fetch(&url).await.unwrap();

        assert_eq!(response.status, 301);
        assert_eq!(response.location.as_deref(), Some("/elsewhere"));
        assert!(response.is_followable_redirect());
    }

    #[tokio::test]
    async fn test_fetch_returns_body_and_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("server", "nginx")
                    .insert_header("content-type", "text/html")
                    .set_body_string("<html></html>"),
            )
            .mount(&server)
            .await;

        let fetcher = Fetcher::new(Duration::from_secs(5)).unwrap();
        let url = Url::parse(&server.uri()).unwrap();
        let response = fetcher.fetch(&url).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.server.as_deref(), Some("nginx"));
        assert_eq!(response.body, "<html></html>");
        assert!(!response.is_followable_redirect());
    }

    #[tokio::test]
    async fn test_fetch_timeout_is_typed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200).set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let fetcher = Fetcher::new(Duration::from_millis(100)).unwrap();
        let url = Url::parse(&server.uri()).unwrap();

        match fetcher.fetch(&url).await {
            Err(FetchError::Timeout) => {}
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_network_error() {
        // Port 9 (discard) is virtually never listening on test machines
        let fetcher = Fetcher::new(Duration::from_secs(2)).unwrap();
        let url = Url::parse("http://127.0.0.1:9/").unwrap();

        match fetcher.fetch(&url).await {
            Err(FetchError::Network(_)) => {}
            other => panic!("expected network error, got {:?}", other),
        }
    }
}
