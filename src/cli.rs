// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// The tool analyzes exactly one URL per run, so there are no subcommands:
// just the required --url plus one boolean flag per report section and a
// few tunables for the redirect resolver and the link checker.
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Derive macros: Automatically generate code for our types
// - Methods on structs: Small helpers that interpret the parsed flags
// =============================================================================

use clap::Parser;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "seo-scout",
    version = "0.1.0",
    about = "Retrieve SEO-relevant data for a specific URL",
    long_about = "seo-scout fetches a single web page, follows its redirects if asked, \
                  and prints a human-readable SEO report: content structure, media, \
                  internal/external links, server posture, semantic keywords, and \
                  Google index presence."
)]
pub struct Cli {
    /// The URL to retrieve SEO-relevant data for
    ///
    /// Required. Everything else in the report derives from this one page.
    #[arg(long)]
    pub url: String,

    /// Follow redirects until there are no more
    ///
    /// Without this flag the tool performs a single fetch and reports the
    /// initial response as-is, even if it is a redirect.
    #[arg(short = 'f', long)]
    pub follow: bool,

    /// Analyze media content (video, audio, images) on the page
    #[arg(short = 'm', long)]
    pub media: bool,

    /// Output all internal and external links on the page, with status checks
    #[arg(short = 'l', long)]
    pub links: bool,

    /// Check for sitemap, robots.txt, SSL certificate status, and server info
    #[arg(short = 's', long)]
    pub server: bool,

    /// Check if the URL is indexed by Google
    #[arg(short = 'g', long)]
    pub google: bool,

    /// Output heading tags (H1, H2, H3) from the page
    #[arg(short = 'c', long)]
    pub content: bool,

    /// Perform semantic keyword analysis on the page content
    #[arg(short = 'e', long)]
    pub semantic: bool,

    /// Run all checks and outputs (equivalent to setting every flag above)
    #[arg(short = 'a', long)]
    pub all: bool,

    /// Maximum number of redirect hops to follow in --follow mode
    #[arg(long, default_value_t = 10)]
    pub max_hops: usize,

    /// Per-request timeout for fetching the page, in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Per-request timeout for individual link checks, in seconds
    ///
    /// Independent of --timeout: a slow page should not slow down link
    /// verification, and vice versa.
    #[arg(long, default_value_t = 5)]
    pub link_timeout: u64,

    /// Output the report as JSON instead of the colored text format
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    // Each section flag is also implied by --all.
    // These helpers keep the "or all" logic in one place instead of
    // scattering `cli.media || cli.all` through main.

    pub fn follow_enabled(&self) -> bool {
        self.follow || self.all
    }

    pub fn media_enabled(&self) -> bool {
        self.media || self.all
    }

    pub fn links_enabled(&self) -> bool {
        self.links || self.all
    }

    pub fn server_enabled(&self) -> bool {
        self.server || self.all
    }

    pub fn google_enabled(&self) -> bool {
        self.google || self.all
    }

    pub fn content_enabled(&self) -> bool {
        self.content || self.all
    }

    pub fn semantic_enabled(&self) -> bool {
        self.semantic || self.all
    }

    /// Redirect hop budget for the resolver: 0 means "single fetch, report
    /// whatever comes back", anything else is the follow-mode ceiling.
    pub fn hop_budget(&self) -> usize {
        if self.follow_enabled() {
            self.max_hops
        } else {
            0
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why flags instead of subcommands?
//    - The tool does one thing: analyze a single URL
//    - Flags toggle which report sections get produced
//    - Subcommands would add a layer with only one member
//
// 2. What does #[arg(short = 'f', long)] do?
//    - Generates both -f and --follow for the field named `follow`
//    - clap derives the long name from the field name automatically
//
// 3. What is default_value_t?
//    - Supplies a default when the flag is absent
//    - The _t suffix means "typed value" (here usize/u64, not a string)
//
// 4. Why the *_enabled() helper methods?
//    - --all implies every section flag
//    - Resolving that in one place keeps main.rs free of repeated `|| all`
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let cli = Cli::try_parse_from(["seo-scout", "--url", "https://example.com"]).unwrap();
        assert_eq!(cli.url, "https://example.com");
        assert!(!cli.follow_enabled());
        assert!(!cli.links_enabled());
        assert_eq!(cli.hop_budget(), 0);
    }

    #[test]
    fn test_url_is_required() {
        assert!(Cli::try_parse_from(["seo-scout", "-a"]).is_err());
    }

    #[test]
    fn test_all_implies_every_section() {
        let cli = Cli::try_parse_from(["seo-scout", "--url", "https://example.com", "-a"]).unwrap();
        assert!(cli.follow_enabled());
        assert!(cli.media_enabled());
        assert!(cli.links_enabled());
        assert!(cli.server_enabled());
        assert!(cli.google_enabled());
        assert!(cli.content_enabled());
        assert!(cli.semantic_enabled());
    }

    #[test]
    fn test_follow_sets_hop_budget() {
        let cli =
            Cli::try_parse_from(["seo-scout", "--url", "https://example.com", "-f"]).unwrap();
        assert_eq!(cli.hop_budget(), 10);

        let cli = Cli::try_parse_from([
            "seo-scout",
            "--url",
            "https://example.com",
            "-f",
            "--max-hops",
            "3",
        ])
        .unwrap();
        assert_eq!(cli.hop_budget(), 3);
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from([
            "seo-scout",
            "--url",
            "https://example.com",
            "-l",
            "-c",
            "-e",
        ])
        .unwrap();
        assert!(cli.links_enabled());
        assert!(cli.content_enabled());
        assert!(cli.semantic_enabled());
        assert!(!cli.media_enabled());
    }
}
