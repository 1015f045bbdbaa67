// src/fetch/resolver.rs
// =============================================================================
// This module follows a URL through its redirect chain to a terminal page.
//
// How it works:
// 1. Fetch the current URL (one GET, no automatic redirects)
// 2. If the response is not a followable redirect, we're done: Resolved
// 3. Otherwise normalize the Location target against the current URL,
//    record the hop, and loop - unless the target was already visited
//    (Cycle) or the hop budget is exhausted (TooManyRedirects)
//
// Two hard guarantees:
// - Bounded termination: never more than max_hops hops, ever
// - Cycle safety: a HashSet of visited URLs catches both self-redirects
//   and longer loops within one hop of the repeat
//
// A hop budget of 0 selects single-fetch mode: the first response is
// terminal even when it is a 3xx. That is a mode, not an error - the
// report simply shows the redirect status and the original URL.
//
// Rust concepts:
// - HashSet: To track visited URLs (O(1) lookup)
// - Enums with data: Outcome carries different payloads per variant
// - loop + early return: The hop loop has four distinct exits
// =============================================================================

use crate::fetch::client::{FetchError, Fetcher};
use serde::Serialize;
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// One request/response pair in the redirect chain
#[derive(Debug, Clone, Serialize)]
pub struct Hop {
    pub url: String,
    pub status: u16,
}

/// The terminal page the chain landed on, with everything the analyzers
/// downstream need: final URL, status, body, and a little metadata.
#[derive(Debug)]
pub struct ResolvedPage {
    pub url: Url,
    pub status: u16,
    pub body: String,
    pub server: Option<String>,
    pub content_type: Option<String>,
    /// Response time of the terminal fetch only (not the whole chain)
    pub response_time: Duration,
}

/// How resolution ended. Exactly one of these per run.
#[derive(Debug)]
pub enum Outcome {
    /// Reached a non-redirect response (2xx/4xx/5xx, or a 3xx in
    /// single-fetch mode / without a Location header)
    Resolved(ResolvedPage),
    /// The chain kept redirecting past the hop budget
    TooManyRedirects,
    /// The chain pointed back at a URL we already fetched
    Cycle { repeated: String },
    /// A fetch failed outright (connection refused, DNS, TLS, ...)
    NetworkError { detail: String },
    /// A fetch hit its deadline
    Timeout,
}

/// Everything the resolver learned about one starting URL.
#[derive(Debug)]
pub struct Resolution {
    pub original_url: String,
    /// Redirect responses in the order they were taken; the terminal
    /// response is NOT in here, it lives in the outcome
    pub hops: Vec<Hop>,
    pub outcome: Outcome,
}

pub struct Resolver {
    fetcher: Fetcher,
    max_hops: usize,
}

impl Resolver {
    pub fn new(fetcher: Fetcher, max_hops: usize) -> Self {
        Self { fetcher, max_hops }
    }

    /// Follow `start` to a terminal outcome. Never retries a failed fetch;
    /// a single network error ends resolution and is reported as such.
    pub async fn resolve(&self, start: &Url) -> Resolution {
        let mut hops: Vec<Hop> = Vec::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut current = start.clone();

        visited.insert(current.to_string());

        loop {
            let response = match self.fetcher.fetch(&current).await {
                Ok(response) => response,
                Err(FetchError::Timeout) => {
                    return Resolution {
                        original_url: start.to_string(),
                        hops,
                        outcome: Outcome::Timeout,
                    };
                }
                Err(FetchError::Network(detail)) => {
                    return Resolution {
                        original_url: start.to_string(),
                        hops,
                        outcome: Outcome::NetworkError { detail },
                    };
                }
            };

            // Terminal response? Either it isn't a redirect at all, or we
            // are in single-fetch mode and report the redirect as-is.
            if !response.is_followable_redirect() || self.max_hops == 0 {
                return Resolution {
                    original_url: start.to_string(),
                    hops,
                    outcome: Outcome::Resolved(ResolvedPage {
                        url: current,
                        status: response.status,
                        body: response.body,
                        server: response.server,
                        content_type: response.content_type,
                        response_time: response.response_time,
                    }),
                };
            }

            // is_followable_redirect() guarantees the header is present
            let location = response.location.as_deref().unwrap_or_default();

            // Resolve relative Location values against the current URL;
            // scheme and host carry over unless the header changes them
            let next = match current.join(location) {
                Ok(next) => next,
                Err(_) => {
                    // A Location we cannot parse is a dead end, not a crash
                    return Resolution {
                        original_url: start.to_string(),
                        hops,
                        outcome: Outcome::NetworkError {
                            detail: format!("unparseable Location header: {}", location),
                        },
                    };
                }
            };

            // Hop budget check comes before recording the hop, so a chain
            // that is cut off shows exactly max_hops entries
            if hops.len() == self.max_hops {
                return Resolution {
                    original_url: start.to_string(),
                    hops,
                    outcome: Outcome::TooManyRedirects,
                };
            }

            hops.push(Hop {
                url: current.to_string(),
                status: response.status,
            });

            // Full-cycle guard: any previously fetched URL ends the chain.
            // This also catches a page redirecting to itself.
            if !visited.insert(next.to_string()) {
                return Resolution {
                    original_url: start.to_string(),
                    hops,
                    outcome: Outcome::Cycle {
                        repeated: next.to_string(),
                    },
                };
            }

            current = next;
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why not let reqwest follow redirects?
//    - reqwest's built-in policy either follows silently or errors out
//    - We need the full hop sequence for the report, plus our own cycle
//      and budget rules, so the loop lives here
//
// 2. What does visited.insert() return?
//    - true if the value was newly added, false if it was already there
//    - That makes "record and check" a single call
//
// 3. Why clone the starting Url?
//    - `current` changes every hop; the caller keeps the original
//    - Url is a small owned struct, cloning it once is negligible
// -----------------------------------------------------------------------------
