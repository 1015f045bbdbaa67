// src/fetch/mod.rs
// =============================================================================
// This module owns everything between "a URL string" and "a resolved page".
//
// Submodules:
// - client: Makes a single HTTP GET and returns a typed response or failure
// - resolver: Follows redirect chains hop by hop, bounded and cycle-safe
//
// This file (mod.rs) is the module root - it re-exports the public API so
// the rest of the application can write `fetch::Resolver` instead of
// `fetch::resolver::Resolver`.
// =============================================================================

mod client;
mod resolver;

pub use client::{FetchError, FetchResponse, Fetcher};
pub use resolver::{Hop, Outcome, Resolution, ResolvedPage, Resolver};
