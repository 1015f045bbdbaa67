// src/report.rs
// =============================================================================
// This module assembles and renders the final report.
//
// The model is deliberately dumb data:
// - A Finding is one line: a status symbol, a label, and content
// - A Section is a titled list of findings
// - A Report is the ordered list of section entries, where an entry is
//   either a produced section, an explicit "skipped" marker (flag not
//   set), or a "missing" warning (requested but nothing came back)
//
// No network and no parsing happen here - analyzers produce Sections
// independently and the report only aggregates them, in the order they
// were registered. That order is fixed by main.rs, so two runs with the
// same flags always print sections in the same sequence.
//
// Two output modes: colored plain text (the default) and JSON (--json),
// both rendered from the same entries.
// =============================================================================

use crate::checker::{CheckOutcome, LinkScope, LinkTarget, PageLink};
use crate::fetch::{Hop, ResolvedPage};
use colored::Colorize;
use serde::Serialize;
use std::time::Duration;

/// Judgment attached to one finding, drives the status symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Good,
    Neutral,
    Fail,
    /// A sub-heading inside a section (e.g. "Internal links")
    Header,
}

/// One line of the report
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub status: Status,
    pub label: String,
    pub content: String,
}

impl Finding {
    pub fn good(label: &str, content: impl Into<String>) -> Self {
        Self::new(Status::Good, label, content)
    }

    pub fn neutral(label: &str, content: impl Into<String>) -> Self {
        Self::new(Status::Neutral, label, content)
    }

    pub fn fail(label: &str, content: impl Into<String>) -> Self {
        Self::new(Status::Fail, label, content)
    }

    pub fn header(label: &str) -> Self {
        Self::new(Status::Header, label, "")
    }

    /// For callers that compute the status themselves
    pub fn from_parts(status: Status, label: &str, content: impl Into<String>) -> Self {
        Self::new(status, label, content)
    }

    fn new(status: Status, label: &str, content: impl Into<String>) -> Self {
        Self {
            status,
            label: label.to_string(),
            content: content.into(),
        }
    }
}

/// A titled group of findings, produced by exactly one analyzer
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub title: String,
    pub findings: Vec<Finding>,
}

impl Section {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            findings: Vec::new(),
        }
    }

    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
enum Entry {
    Produced(Section),
    Skipped { title: String },
    Missing { title: String },
}

/// The whole report, sections in registration order
#[derive(Debug, Default, Serialize)]
pub struct Report {
    entries: Vec<Entry>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a produced section. An empty section downgrades to a
    /// missing-section warning so the operator can tell "ran, found
    /// nothing to say" apart from "never ran".
    pub fn add(&mut self, section: Section) {
        if section.findings.is_empty() {
            self.entries.push(Entry::Missing {
                title: section.title,
            });
        } else {
            self.entries.push(Entry::Produced(section));
        }
    }

    /// Register a section the user did not ask for
    pub fn skip(&mut self, title: &str) {
        self.entries.push(Entry::Skipped {
            title: title.to_string(),
        });
    }

    /// Colored plain-text rendering
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            match entry {
                Entry::Produced(section) => {
                    out.push('\n');
                    out.push_str(&format!(
                        "{}\n",
                        format!(">>> {} >>>", section.title).blue()
                    ));
                    for finding in &section.findings {
                        out.push_str(&render_finding(finding));
                    }
                }
                Entry::Skipped { title } => {
                    out.push_str(&format!(
                        "{}\n",
                        format!("  {}: skipped (flag not set)", title).dimmed()
                    ));
                }
                Entry::Missing { title } => {
                    out.push_str(&format!(
                        "{} {}\n",
                        "■".red(),
                        format!("{}: requested but produced no output", title)
                    ));
                }
            }
        }
        out
    }

    /// JSON rendering for --json
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.entries)
    }
}

fn render_finding(finding: &Finding) -> String {
    let symbol = match finding.status {
        Status::Good => "●".green().to_string(),
        Status::Neutral => "●".white().to_string(),
        Status::Fail => "■".red().to_string(),
        Status::Header => ">".blue().to_string(),
    };
    let colon = if finding.content.is_empty() { "" } else { ":" };
    format!(
        "{} {}{} {}\n",
        symbol,
        finding.label.bright_cyan(),
        colon,
        finding.content
    )
}

// ---------------------------------------------------------------------------
// Section builders for the pipeline's own data. Analyzer sections live next
// to their analyzers; these three belong to the fetch/checker types, which
// the report module already depends on.
// ---------------------------------------------------------------------------

/// Timing and size of the resolved fetch
pub fn performance_section(page: &ResolvedPage, total_elapsed: Duration) -> Section {
    let mut section = Section::new("Performance");
    section.push(Finding::good(
        "Initial response time",
        format!("{:.3} seconds", page.response_time.as_secs_f64()),
    ));
    section.push(Finding::good(
        "Total load time",
        format!("{:.2} seconds", total_elapsed.as_secs_f64()),
    ));
    section.push(Finding::good(
        "Page size",
        format!("{:.2} KB", page.body.len() as f64 / 1024.0),
    ));
    section
}

/// The hop sequence and where it ended up
pub fn redirects_section(hops: &[Hop], page: &ResolvedPage) -> Section {
    let mut section = Section::new("Redirects");
    if hops.is_empty() {
        section.push(Finding::neutral("Redirect history", "No redirects found."));
    } else {
        for (i, hop) in hops.iter().enumerate() {
            section.push(Finding::neutral(
                &format!("Step {}", i + 1),
                format!("{} (Status Code: {})", hop.url, hop.status),
            ));
        }
        section.push(Finding::good(
            "Final URL",
            format!("{} (Status Code: {})", page.url, page.status),
        ));
    }
    section
}

/// Terminal status of the resolved page
pub fn status_section(page: &ResolvedPage) -> Section {
    let mut section = Section::new("Status Code");
    let status = if page.status == 200 {
        Status::Good
    } else {
        Status::Fail
    };
    section.push(Finding::new(
        status,
        "Status Code",
        page.status.to_string(),
    ));
    section
}

/// Classified and verified links, grouped internal / external / unverified,
/// each group in page-discovery order
pub fn links_section(links: &[PageLink]) -> Section {
    let mut section = Section::new("Link Analysis");

    if links.is_empty() {
        section.push(Finding::neutral("Links", "No links found on the page."));
        return section;
    }

    section.push(Finding::header("Internal links"));
    push_scope_group(&mut section, links, LinkScope::Internal);

    section.push(Finding::header("External links"));
    push_scope_group(&mut section, links, LinkScope::External);

    let unsupported: Vec<&PageLink> = links
        .iter()
        .filter(|l| matches!(l.target, LinkTarget::Unsupported { .. }))
        .collect();
    if !unsupported.is_empty() {
        section.push(Finding::header("Unverified links"));
        for link in unsupported {
            if let LinkTarget::Unsupported { scheme } = &link.target {
                section.push(Finding::neutral(
                    "Link",
                    format!("{} ({} link, not verified)", link.raw_href, scheme),
                ));
            }
        }
    }

    section
}

fn push_scope_group(section: &mut Section, links: &[PageLink], scope: LinkScope) {
    for link in links {
        if let LinkTarget::Web {
            url,
            scope: link_scope,
        } = &link.target
        {
            if *link_scope != scope {
                continue;
            }
            let scope_tag = match scope {
                LinkScope::Internal => "internal",
                LinkScope::External => "external",
            };
            match &link.checked {
                Some(CheckOutcome::Status { code }) => {
                    let status = match code {
                        200..=299 => Status::Good,
                        300..=399 => Status::Neutral,
                        _ => Status::Fail,
                    };
                    section.push(Finding::new(
                        status,
                        "Link",
                        format!("Status: {}, URL: {} [{}]", code, url, scope_tag),
                    ));
                }
                Some(error) => {
                    section.push(Finding::fail(
                        "Link",
                        format!("{}, URL: {} [{}]", error_tag(error), url, scope_tag),
                    ));
                }
                None => {
                    section.push(Finding::neutral(
                        "Link",
                        format!("Not checked, URL: {} [{}]", url, scope_tag),
                    ));
                }
            }
        }
    }
}

fn error_tag(outcome: &CheckOutcome) -> String {
    match outcome {
        CheckOutcome::Timeout => "Timed out".to_string(),
        CheckOutcome::SslError => "SSL error".to_string(),
        CheckOutcome::DnsError => "DNS error".to_string(),
        CheckOutcome::ConnectError => "Connection failed".to_string(),
        CheckOutcome::Failed { detail } => format!("Error: {}", detail),
        CheckOutcome::Status { code } => format!("Status: {}", code),
    }
}
