//! Checklist consolidation over a rendered content tree.
//!
//! Narratives list their evidence categories as checklist glyphs (`☑`
//! checked, `☐` unchecked) scattered across a marker heading and the blocks
//! that follow it. `consolidate_checklists` gathers them into one
//! `EvidenceChecklist` and splices it into the tree in place of the marker
//! block.
//!
//! The scan visits paragraphs and headings of level 1–4 in document order;
//! other blocks are invisible to it. After the marker block it collects
//! every block that carries a glyph, and stops at the first heading without
//! a glyph or at the first glyph-free block once collection has begun.
//! Mutation happens only after the scan: one replacement, then one removal
//! pass.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use formulary_core::traits::{ChecklistItem, ContentBlock, ContentTree, EvidenceChecklist};

pub const CHECKED_GLYPH: char = '☑';
pub const UNCHECKED_GLYPH: char = '☐';

/// The marker phrase used when configuration does not name one.
pub const DEFAULT_CHECKLIST_MARKER: &str = "Evidence Categories Present:";

static LINE_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n|<br\s*/?>").expect("valid regex"));

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// Consolidate the checklist that follows `marker`, if there is one.
///
/// Returns the checklist that was spliced in, or `None` when no block
/// contains the marker or no glyph was found; in both cases the tree is left
/// untouched.
pub fn consolidate_checklists<T: ContentTree>(tree: &mut T, marker: &str) -> Option<EvidenceChecklist> {
    let (header, items, doomed) = {
        let blocks = tree.blocks();
        let mut scannable = blocks
            .iter()
            .enumerate()
            .filter(|(_, block)| block.kind().is_scannable());

        let (header, header_block) = scannable
            .by_ref()
            .find(|(_, block)| block_text(block.inner_markup()).contains(marker))?;

        let mut items = extract_items(header_block.inner_markup());
        let mut doomed: Vec<usize> = Vec::new();

        for (index, block) in scannable {
            let has_glyph = contains_glyph(&block_text(block.inner_markup()));
            if block.kind().is_heading() && !has_glyph {
                break;
            }
            if has_glyph {
                items.extend(extract_items(block.inner_markup()));
                doomed.push(index);
            } else if !doomed.is_empty() {
                break;
            }
        }

        (header, items, doomed)
    };

    if items.is_empty() {
        debug!(marker = %marker, "marker found but no checklist glyphs; leaving tree unchanged");
        return None;
    }

    let checklist = EvidenceChecklist {
        heading: marker.to_string(),
        items,
    };

    debug!(
        header_index = header,
        items = checklist.items.len(),
        checked = checklist.checked_count(),
        removed_blocks = doomed.len(),
        "checklist consolidated"
    );

    tree.replace_with_checklist(header, &checklist);
    tree.remove_blocks(&doomed);
    Some(checklist)
}

/// Visible text of inner markup: tags dropped, line breaks kept as `\n`,
/// basic entities decoded.
pub fn block_text(markup: &str) -> String {
    plain_lines(markup).join("\n")
}

fn plain_lines(markup: &str) -> Vec<String> {
    LINE_BREAK_RE
        .split(markup)
        .map(|line| decode_entities(&TAG_RE.replace_all(line, "")))
        .collect()
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn contains_glyph(text: &str) -> bool {
    text.contains(CHECKED_GLYPH) || text.contains(UNCHECKED_GLYPH)
}

/// Items on every line of `markup`, in order.
fn extract_items(markup: &str) -> Vec<ChecklistItem> {
    plain_lines(markup)
        .iter()
        .flat_map(|line| line_items(line))
        .collect()
}

/// One item per glyph on `line`. The label runs from the glyph to the next
/// glyph or the end of the line. Text before the first glyph is not part of
/// any item, and glyphs with an empty label are skipped.
fn line_items(line: &str) -> Vec<ChecklistItem> {
    let glyphs: Vec<(usize, char)> = line
        .char_indices()
        .filter(|(_, c)| *c == CHECKED_GLYPH || *c == UNCHECKED_GLYPH)
        .collect();

    glyphs
        .iter()
        .enumerate()
        .filter_map(|(n, &(start, glyph))| {
            let label_start = start + glyph.len_utf8();
            let label_end = glyphs.get(n + 1).map(|&(next, _)| next).unwrap_or(line.len());
            let label = line[label_start..label_end].trim();
            (!label.is_empty()).then(|| ChecklistItem {
                checked: glyph == CHECKED_GLYPH,
                label: label.to_string(),
            })
        })
        .collect()
}
