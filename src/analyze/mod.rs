// src/analyze/mod.rs
// =============================================================================
// This module holds the report-section analyzers. Each one consumes the
// resolved page (or, for the server and Google checks, the target URL)
// and produces exactly one report Section; none of them can fail the run.
//
// Submodules:
// - content: <head> fields and H1/H2/H3 heading structure
// - media: video, audio, and image inventory
// - server: sitemap, robots.txt, TLS, server IP and software
// - semantic: language detection + stopword-filtered keyword frequency
// - stopwords: the compiled-in stopword tables semantic relies on
// - google: search-index presence check
// =============================================================================

pub mod content;
pub mod google;
pub mod media;
pub mod semantic;
pub mod server;
pub mod stopwords;
