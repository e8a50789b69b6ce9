//! A minimal block renderer for repaired narratives.
//!
//! `BlockRenderer` stands in for a full markdown renderer. It understands
//! exactly the block structure `repair_structure` produces:
//!
//! - chunks are separated by blank lines;
//! - a chunk whose first line is `#`×1–6 plus a space is a heading; any
//!   further lines of that chunk are rendered as the following chunk;
//! - a chunk whose first line is a list item is a list, and non-item lines
//!   continue the previous item;
//! - anything else is a paragraph whose single line breaks become `<br>`.
//!
//! Text is HTML-escaped; `**strong**` is the only inline markup recognized.

use std::sync::LazyLock;

use regex::Regex;

use formulary_core::traits::NarrativeRenderer;

use crate::document::{escape_html, RenderedBlock, RenderedDocument};

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})[ \t]+(.*?)[ \t]*$").expect("valid regex"));

static LIST_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:([-*+])|(\d+)\.)[ \t]+(.*)$").expect("valid regex"));

static STRONG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid regex"));

/// Renders repaired narrative text into a `RenderedDocument`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockRenderer;

impl NarrativeRenderer for BlockRenderer {
    type Document = RenderedDocument;

    fn render(&self, text: &str) -> RenderedDocument {
        let mut blocks = Vec::new();
        let mut chunk: Vec<&str> = Vec::new();

        for line in text.lines() {
            if line.trim().is_empty() {
                render_chunk(&chunk, &mut blocks);
                chunk.clear();
            } else {
                chunk.push(line);
            }
        }
        render_chunk(&chunk, &mut blocks);

        RenderedDocument::new(blocks)
    }
}

fn render_chunk(lines: &[&str], blocks: &mut Vec<RenderedBlock>) {
    let Some(first) = lines.first() else {
        return;
    };

    if let Some(caps) = HEADING_RE.captures(first) {
        let level = caps[1].len() as u8;
        blocks.push(RenderedBlock::Heading {
            level,
            inner: inline(&caps[2]),
        });
        render_chunk(&lines[1..], blocks);
        return;
    }

    if let Some(caps) = LIST_ITEM_RE.captures(first) {
        let ordered = caps.get(2).is_some();
        let mut items: Vec<String> = Vec::new();
        for line in lines {
            match LIST_ITEM_RE.captures(line) {
                Some(item) => items.push(item[3].trim().to_string()),
                None => {
                    if let Some(last) = items.last_mut() {
                        last.push(' ');
                        last.push_str(line.trim());
                    }
                }
            }
        }
        let inner = items
            .iter()
            .map(|item| format!("<li>{}</li>", inline(item)))
            .collect::<String>();
        blocks.push(RenderedBlock::List { ordered, inner });
        return;
    }

    let inner = lines
        .iter()
        .map(|line| inline(line.trim()))
        .collect::<Vec<_>>()
        .join("<br>");
    blocks.push(RenderedBlock::Paragraph { inner });
}

fn inline(text: &str) -> String {
    STRONG_RE
        .replace_all(&escape_html(text), "<strong>$1</strong>")
        .into_owned()
}
