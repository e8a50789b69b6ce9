//! Structural repair of raw narrative text.
//!
//! Research narratives arrive as markdown-like prose where headings and
//! lists are often run together without the blank lines a block renderer
//! needs to tell them apart. `repair_structure` inserts those blank lines.
//!
//! The repair works on whole lines in two steps:
//!
//! 1. Every heading marker (`#`×1–6 then a space or tab) that appears
//!    mid-line, and is not the tail of a longer `#` run, starts a new line.
//! 2. Between two adjacent non-blank lines a blank line is inserted when
//!    either is a heading, or exactly one of them is a list item.
//!
//! Output lines are never rewritten after they are produced, and step 2
//! leaves no adjacent pair that would trigger it again, so the repair is
//! idempotent.

use std::sync::LazyLock;

use regex::Regex;

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{1,6}[ \t]").expect("valid regex"));

static LIST_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[-*+]|\d+\.)[ \t]").expect("valid regex"));

/// Classification of one line for the blank-line rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Blank,
    Heading,
    ListItem,
    Text,
}

fn classify(line: &str) -> LineKind {
    if line.trim().is_empty() {
        LineKind::Blank
    } else if HEADING_RE.is_match(line) {
        LineKind::Heading
    } else if LIST_ITEM_RE.is_match(line) {
        LineKind::ListItem
    } else {
        LineKind::Text
    }
}

/// Insert the blank lines a block renderer needs between headings, lists
/// and prose.
///
/// Trailing newlines are preserved; empty input yields empty output.
pub fn repair_structure(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let lines: Vec<&str> = text.split('\n').flat_map(split_headings).collect();

    let mut out: Vec<&str> = Vec::with_capacity(lines.len() + lines.len() / 2);
    let mut previous = LineKind::Blank;
    for line in lines {
        let kind = classify(line);
        if needs_blank_between(previous, kind) {
            out.push("");
        }
        out.push(line);
        previous = kind;
    }

    out.join("\n")
}

fn needs_blank_between(above: LineKind, below: LineKind) -> bool {
    use LineKind::*;
    match (above, below) {
        (Blank, _) | (_, Blank) => false,
        (Heading, _) | (_, Heading) => true,
        (ListItem, ListItem) => false,
        (ListItem, _) | (_, ListItem) => true,
        (Text, Text) => false,
    }
}

/// Split one line at every mid-line heading marker.
///
/// Text before a marker keeps its leading whitespace but loses trailing
/// whitespace; if nothing but whitespace precedes the first marker, that
/// piece is dropped so the heading starts the line.
fn split_headings(line: &str) -> Vec<&str> {
    let bytes = line.as_bytes();
    let mut cuts: Vec<usize> = Vec::new();
    for i in 1..bytes.len() {
        if bytes[i] == b'#' && bytes[i - 1] != b'#' && HEADING_RE.is_match(&line[i..]) {
            cuts.push(i);
        }
    }

    if cuts.is_empty() {
        return vec![line];
    }

    let mut pieces = Vec::with_capacity(cuts.len() + 1);
    let head = line[..cuts[0]].trim_end();
    if !head.is_empty() {
        pieces.push(head);
    }
    for (n, &start) in cuts.iter().enumerate() {
        let end = cuts.get(n + 1).copied().unwrap_or(line.len());
        let piece = &line[start..end];
        pieces.push(if end == line.len() { piece } else { piece.trim_end() });
    }
    pieces
}
