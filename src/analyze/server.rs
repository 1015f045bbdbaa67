// src/analyze/server.rs
// =============================================================================
// This module checks server-level facts about the target site, before the
// page itself is even fetched:
//
// - /sitemap.xml and /robots.txt presence at the site origin
// - TLS certificate validity (a verified HTTPS request either succeeds or
//   fails with a certificate error)
// - Server IP, looked up through Google's DNS-over-HTTPS JSON API
// - The Server response header, when the site sends one
//
// Every check degrades to a finding; a missing sitemap or an offline DNS
// resolver never aborts the run.
// =============================================================================

use crate::report::{Finding, Section};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

const DNS_RESOLVER: &str = "https://dns.google/resolve";

/// Sitemap, robots.txt, TLS, IP, and server software for the target site
pub async fn server_section(target: &Url, timeout: Duration) -> Section {
    let mut section = Section::new("Server Analysis");

    let client = match Client::builder().timeout(timeout).build() {
        Ok(client) => client,
        Err(e) => {
            section.push(Finding::fail("Server", format!("HTTP client error: {}", e)));
            return section;
        }
    };

    let origin = target.origin().ascii_serialization();

    section.push(probe_well_known(&client, &origin, "sitemap.xml", "Sitemap").await);
    section.push(probe_well_known(&client, &origin, "robots.txt", "Robots.txt").await);
    section.push(check_tls(&client, target).await);

    if let Some(host) = target.host_str() {
        section.push(lookup_ip(&client, host).await);
    }

    section.push(server_header(&client, target).await);
    section
}

// GET {origin}/{file}: a 200 proves it exists, anything else does not
async fn probe_well_known(client: &Client, origin: &str, file: &str, label: &str) -> Finding {
    let url = format!("{}/{}", origin, file);
    match client.get(&url).send().await {
        Ok(response) if response.status().as_u16() == 200 => {
            Finding::good(label, format!("Found at {}", url))
        }
        Ok(response) => Finding::fail(
            label,
            format!("Not found (status {})", response.status().as_u16()),
        ),
        Err(e) => Finding::fail(label, format!("Request failed: {}", e)),
    }
}

// reqwest verifies certificates by default, so a successful HTTPS request
// is itself the proof of a valid chain
async fn check_tls(client: &Client, target: &Url) -> Finding {
    if target.scheme() != "https" {
        return Finding::fail("SSL Certificate", "Site does not use HTTPS.");
    }
    match client.get(target.as_str()).send().await {
        Ok(_) => Finding::good("SSL Certificate", "Certificate is valid."),
        Err(e) => Finding::fail("SSL Certificate", format!("Certificate check failed: {}", e)),
    }
}

async fn lookup_ip(client: &Client, host: &str) -> Finding {
    let result = client
        .get(DNS_RESOLVER)
        .query(&[("name", host), ("type", "A")])
        .send()
        .await;

    match result {
        Ok(response) => match response.json::<Value>().await {
            Ok(answer) => match first_answer(&answer) {
                Some(ip) => Finding::good("Server IP", ip),
                None => Finding::fail("Server IP", format!("No A record for {}", host)),
            },
            Err(e) => Finding::fail("Server IP", format!("Bad resolver response: {}", e)),
        },
        Err(e) => Finding::fail("Server IP", format!("DNS lookup failed: {}", e)),
    }
}

// Pulls Answer[0].data out of a DNS-over-HTTPS JSON response
fn first_answer(response: &Value) -> Option<String> {
    response
        .get("Answer")?
        .get(0)?
        .get("data")?
        .as_str()
        .map(|s| s.to_string())
}

async fn server_header(client: &Client, target: &Url) -> Finding {
    match client.head(target.as_str()).send().await {
        Ok(response) => {
            let server = response
                .headers()
                .get("server")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("Not disclosed");
            Finding::neutral("Server software", server.to_string())
        }
        Err(e) => Finding::fail("Server software", format!("Request failed: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Status;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_sitemap_found_is_good() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sitemap.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<urlset/>"))
            .mount(&server)
            .await;

        let client = Client::new();
        let finding = probe_well_known(&client, &server.uri(), "sitemap.xml", "Sitemap").await;
        assert_eq!(finding.status, Status::Good);
        assert!(finding.content.contains("/sitemap.xml"));
    }

    #[tokio::test]
    async fn test_missing_robots_is_fail_with_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = Client::new();
        let finding = probe_well_known(&client, &server.uri(), "robots.txt", "Robots.txt").await;
        assert_eq!(finding.status, Status::Fail);
        assert!(finding.content.contains("404"));
    }

    #[tokio::test]
    async fn test_plain_http_fails_tls_check_without_network() {
        let client = Client::new();
        let url = Url::parse("http://example.com/").unwrap();
        let finding = check_tls(&client, &url).await;
        assert_eq!(finding.status, Status::Fail);
        assert!(finding.content.contains("HTTPS"));
    }

    #[tokio::test]
    async fn test_server_header_reported_neutral() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).insert_header("server", "caddy"))
            .mount(&server)
            .await;

        let client = Client::new();
        let url = Url::parse(&server.uri()).unwrap();
        let finding = server_header(&client, &url).await;
        assert_eq!(finding.status, Status::Neutral);
        assert_eq!(finding.content, "caddy");
    }

    #[test]
    fn test_first_answer_parses_doh_response() {
        let response = json!({
            "Status": 0,
            "Answer": [
                { "name": "example.com.", "type": 1, "data": "93.184.216.34" }
            ]
        });
        assert_eq!(first_answer(&response).as_deref(), Some("93.184.216.34"));

        let empty = json!({ "Status": 3 });
        assert!(first_answer(&empty).is_none());
    }
}
