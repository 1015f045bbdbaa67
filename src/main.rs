// src/main.rs
// =============================================================================
// seo-scout: fetch one web page and print an SEO report for it.
//
// The run is a straight pipeline:
// 1. Parse the CLI flags
// 2. Server-level checks against the target origin (they work even when
//    the page itself is broken)
// 3. Resolve the URL through its redirect chain to a terminal page
// 4. Run each requested analyzer over that page
// 5. Render the report, as colored text or JSON
//
// Sections appear in a fixed order; sections the user did not ask for are
// printed as explicit "skipped" markers so the report shape is stable.
//
// Exit codes:
//   0 - report produced
//   1 - the target URL could not be resolved to a page
//   2 - unexpected internal error
//
// Rust concepts:
// - #[tokio::main]: sets up the async runtime around main
// - Destructuring: pulling hops and outcome out of the Resolution struct
// - std::process::exit with an explicit code for scripting
// =============================================================================

mod analyze;
mod checker;
mod cli;
mod fetch;
mod report;

use crate::analyze::stopwords::Stopwords;
use crate::cli::Cli;
use crate::fetch::{Fetcher, Outcome, Resolution, Resolver};
use crate::report::{
    links_section, performance_section, redirects_section, status_section, Report,
};
use anyhow::Result;
use clap::Parser;
use std::time::{Duration, Instant};
use url::Url;

#[tokio::main]
async fn main() {
    let code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Unexpected error: {:#}", e);
            2
        }
    };
    std::process::exit(code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    let target = match parse_target(&cli.url) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("Could not resolve {}: not a valid URL ({})", cli.url, e);
            return Ok(1);
        }
    };

    let timeout = Duration::from_secs(cli.timeout);
    let link_timeout = Duration::from_secs(cli.link_timeout);
    let stopwords = Stopwords::load();
    let mut report = Report::new();

    // Origin-level checks run before page resolution: a broken page does
    // not stop us from reporting on robots.txt or the certificate.
    if cli.server_enabled() {
        report.add(analyze::server::server_section(&target, timeout).await);
    } else {
        report.skip("Server Analysis");
    }

    let fetcher = Fetcher::new(timeout)?;
    let resolver = Resolver::new(fetcher, cli.hop_budget());

    let started = Instant::now();
    let Resolution {
        original_url,
        hops,
        outcome,
    } = resolver.resolve(&target).await;
    let total_elapsed = started.elapsed();

    let page = match outcome {
        Outcome::Resolved(page) => page,
        Outcome::TooManyRedirects => {
            return abort_unresolved(
                report,
                &cli,
                format!(
                    "Could not resolve {}: gave up after {} redirect hops.",
                    original_url,
                    hops.len()
                ),
            );
        }
        Outcome::Cycle { repeated } => {
            return abort_unresolved(
                report,
                &cli,
                format!(
                    "Could not resolve {}: redirect loop back to {}.",
                    original_url, repeated
                ),
            );
        }
        Outcome::NetworkError { detail } => {
            return abort_unresolved(
                report,
                &cli,
                format!("Could not resolve {}: {}", original_url, detail),
            );
        }
        Outcome::Timeout => {
            return abort_unresolved(
                report,
                &cli,
                format!("Could not resolve {}: request timed out.", original_url),
            );
        }
    };

    report.add(performance_section(&page, total_elapsed));
    report.add(redirects_section(&hops, &page));
    report.add(status_section(&page));

    if cli.google_enabled() {
        report.add(analyze::google::google_section(&target, timeout).await);
    } else {
        report.skip("Google Search Analysis");
    }

    // Head analysis always runs: title and description are the minimum
    // any SEO report has to say about a page.
    report.add(analyze::content::head_section(&page));

    if cli.content_enabled() {
        report.add(analyze::content::headings_section(&page));
    } else {
        report.skip("SEO Content Analysis");
    }

    if cli.semantic_enabled() {
        report.add(analyze::semantic::semantic_section(&page, &stopwords));
    } else {
        report.skip("Semantic Analysis");
    }

    if cli.media_enabled() {
        report.add(analyze::media::media_section(&page, timeout).await);
    } else {
        report.skip("SEO Media Analysis");
    }

    if cli.links_enabled() {
        let hrefs = checker::extract_links(&page.body);
        let mut links = checker::classify_links(&hrefs, &page.url);
        checker::verify_links(&mut links, link_timeout).await;
        report.add(links_section(&links));
    } else {
        report.skip("Link Analysis");
    }

    println!("{}", render(&report, &cli)?);
    Ok(0)
}

// A bare hostname like "example.com" is accepted and upgraded to https
fn parse_target(raw: &str) -> Result<Url, url::ParseError> {
    match Url::parse(raw) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("https://{}", raw)),
        Err(e) => Err(e),
    }
}

// The page never resolved: print whatever the report already holds (the
// server section may have run), then the failure itself on stderr.
fn abort_unresolved(report: Report, cli: &Cli, message: String) -> Result<i32> {
    let rendered = render(&report, cli)?;
    if !rendered.trim().is_empty() {
        println!("{}", rendered);
    }
    eprintln!("{}", message);
    Ok(1)
}

fn render(report: &Report, cli: &Cli) -> Result<String> {
    if cli.json {
        Ok(report.to_json()?)
    } else {
        Ok(report.render())
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does main() not return Result?
//    - We want explicit exit codes (0/1/2) for scripting
//    - Returning Result from main prints the error but always exits 1
//    - So run() returns the code and main() passes it to process::exit
//
// 2. Why destructure Resolution instead of using resolution.hops etc.?
//    - The match on `outcome` consumes it; destructuring up front moves
//      all three fields out in one step and avoids borrow juggling
//
// 3. Why is "skipped" printed at all?
//    - So a report always has the same section slots in the same order
//    - An operator comparing two runs can see what was off, not guess
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target_accepts_full_urls() {
        let url = parse_target("https://example.com/page").unwrap();
        assert_eq!(url.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_parse_target_upgrades_bare_hostnames() {
        let url = parse_target("example.com").unwrap();
        assert_eq!(url.as_str(), "https://example.com/");
    }

    #[test]
    fn test_parse_target_rejects_garbage() {
        assert!(parse_target("http://").is_err());
    }
}
