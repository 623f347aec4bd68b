//! Helpers for presenting backend-generated enrichment text.
//!
//! The advice and disease-info endpoints return lightly formatted markdown: a
//! numbered list of bold section headers (`1. **Causes**: ...`) with inline
//! `**bold**` runs inside the content.

use std::sync::LazyLock;

use regex::Regex;

static SECTION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\s\*\*[A-Za-z ]+\*\*:").expect("valid section header regex"));

static BOLD_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*.*?\*\*").expect("valid bold run regex"));

static LINE_NUMBERING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\d+\.\s+").expect("valid line numbering regex"));

/// One block of enrichment text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// The raw header including its number and bold markers, e.g.
    /// `1. **Introduction**:`. `None` for text that precedes the first header.
    pub title: Option<String>,
    pub content: String,
}

impl Section {
    /// The header words without numbering, markers or the trailing colon.
    #[must_use]
    pub fn heading(&self) -> Option<String> {
        self.title
            .as_deref()
            .map(|t| strip_markdown(t).trim().trim_end_matches(':').trim().to_string())
    }
}

/// A run of text that is either plain or bold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
}

/// Splits enrichment text into sections on numbered bold headers.
///
/// Whitespace-only fragments are dropped. Text before the first header, or
/// text with no headers at all, becomes an untitled section.
#[must_use]
pub fn parse_sections(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut cursor = 0;
    let mut pending_title: Option<String> = None;

    for header in SECTION_HEADER.find_iter(text) {
        push_section(&mut sections, pending_title.take(), &text[cursor..header.start()]);
        pending_title = Some(header.as_str().trim().to_string());
        cursor = header.end();
    }
    push_section(&mut sections, pending_title, &text[cursor..]);

    sections
}

fn push_section(sections: &mut Vec<Section>, title: Option<String>, body: &str) {
    let content = body.trim();
    if title.is_none() && content.is_empty() {
        return;
    }
    sections.push(Section {
        title,
        content: content.to_string(),
    });
}

/// Splits `text` into plain and bold spans on `**...**` runs.
#[must_use]
pub fn formatted_spans(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut cursor = 0;
    for run in BOLD_RUN.find_iter(text) {
        if run.start() > cursor {
            spans.push(Span {
                text: text[cursor..run.start()].to_string(),
                bold: false,
            });
        }
        let inner = &run.as_str()[2..run.as_str().len() - 2];
        if !inner.is_empty() {
            spans.push(Span {
                text: inner.to_string(),
                bold: true,
            });
        }
        cursor = run.end();
    }
    if cursor < text.len() {
        spans.push(Span {
            text: text[cursor..].to_string(),
            bold: false,
        });
    }
    spans
}

/// Removes `*` emphasis markers and leading `N. ` numbering from every line.
#[must_use]
pub fn strip_markdown(text: &str) -> String {
    let without_stars = text.replace('*', "");
    LINE_NUMBERING.replace_all(&without_stars, "").into_owned()
}
