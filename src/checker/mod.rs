// src/checker/mod.rs
// =============================================================================
// This module contains all link handling for the resolved page.
//
// Submodules:
// - html: Extracts raw hyperlink targets from the page markup
// - http: Classifies links as internal/external and verifies them over HTTP
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
// =============================================================================

mod html;
mod http;

pub use html::extract_links;
pub use http::{classify_links, verify_links, CheckOutcome, LinkScope, LinkTarget, PageLink};
