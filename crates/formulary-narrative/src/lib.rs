//! # formulary-narrative
//!
//! Normalization of research narratives for display.
//!
//! Two independent stages:
//!
//! - **Structural repair** ([`repair_structure`]) runs on raw text before
//!   rendering and inserts the blank lines a block renderer needs.
//! - **Checklist consolidation** ([`consolidate_checklists`]) runs on the
//!   rendered tree and splices scattered `☑`/`☐` lines into one structured
//!   checklist block.
//!
//! [`prepare_narrative`] chains them around any [`NarrativeRenderer`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use formulary_narrative::{prepare_narrative, BlockRenderer, DEFAULT_CHECKLIST_MARKER};
//!
//! let prepared = prepare_narrative(raw, &BlockRenderer, DEFAULT_CHECKLIST_MARKER);
//! println!("{}", prepared.document.to_markup());
//! ```

pub mod checklist;
pub mod document;
pub mod render;
pub mod repair;

pub use checklist::{block_text, consolidate_checklists, DEFAULT_CHECKLIST_MARKER};
pub use document::{escape_html, RenderedBlock, RenderedDocument};
pub use render::BlockRenderer;
pub use repair::repair_structure;

use formulary_core::traits::{EvidenceChecklist, NarrativeRenderer};

/// A narrative after repair, rendering and checklist consolidation.
#[derive(Debug, Clone)]
pub struct PreparedNarrative<D> {
    pub document: D,
    /// The checklist spliced into `document`, if any.
    pub checklist: Option<EvidenceChecklist>,
}

/// Repair `raw`, render it with `renderer`, then consolidate the checklist
/// that follows `marker`.
pub fn prepare_narrative<R: NarrativeRenderer>(
    raw: &str,
    renderer: &R,
    marker: &str,
) -> PreparedNarrative<R::Document> {
    let repaired = repair_structure(raw);
    let mut document = renderer.render(&repaired);
    let checklist = consolidate_checklists(&mut document, marker);
    PreparedNarrative { document, checklist }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use formulary_core::traits::{BlockKind, ChecklistItem, ContentBlock, ContentTree, NarrativeRenderer};

    use super::*;

    const MARKER: &str = DEFAULT_CHECKLIST_MARKER;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn heading(level: u8, inner: &str) -> RenderedBlock {
        RenderedBlock::Heading {
            level,
            inner: inner.to_string(),
        }
    }

    fn para(inner: &str) -> RenderedBlock {
        RenderedBlock::Paragraph {
            inner: inner.to_string(),
        }
    }

    fn item(checked: bool, label: &str) -> ChecklistItem {
        ChecklistItem {
            checked,
            label: label.to_string(),
        }
    }

    // ── 1. consolidation over a hand-built tree ───────────────────────────────

    #[test]
    fn marker_heading_and_following_paragraph_are_consolidated() {
        let mut doc = RenderedDocument::new(vec![
            heading(3, "Evidence Categories Present: ☑Category One ☐Category Two"),
            para("☑Category Three"),
            para("This paragraph has no checklist."),
        ]);

        let checklist = consolidate_checklists(&mut doc, MARKER).unwrap();

        assert_eq!(
            checklist.items,
            vec![
                item(true, "Category One"),
                item(false, "Category Two"),
                item(true, "Category Three"),
            ]
        );
        assert_eq!(doc.blocks.len(), 2);
        assert!(matches!(doc.blocks[0], RenderedBlock::Checklist { .. }));
        assert_eq!(doc.blocks[1], para("This paragraph has no checklist."));
    }

    #[test]
    fn no_marker_is_a_no_op() {
        let original = RenderedDocument::new(vec![heading(2, "Summary"), para("☑ Stray glyph")]);
        let mut doc = original.clone();
        assert!(consolidate_checklists(&mut doc, MARKER).is_none());
        assert_eq!(doc, original);
    }

    #[test]
    fn marker_without_glyphs_is_a_no_op() {
        let original = RenderedDocument::new(vec![para("Evidence Categories Present:"), para("None.")]);
        let mut doc = original.clone();
        assert!(consolidate_checklists(&mut doc, MARKER).is_none());
        assert_eq!(doc, original);
    }

    #[test]
    fn heading_without_glyph_ends_the_section() {
        let mut doc = RenderedDocument::new(vec![
            para("Evidence Categories Present:<br>☑ Clinical trials"),
            heading(2, "Mechanism"),
            para("☐ Not part of the checklist"),
        ]);
        let checklist = consolidate_checklists(&mut doc, MARKER).unwrap();
        assert_eq!(checklist.items, vec![item(true, "Clinical trials")]);
        assert_eq!(doc.blocks.len(), 3);
        assert_eq!(doc.blocks[2], para("☐ Not part of the checklist"));
    }

    #[test]
    fn glyph_free_block_before_any_glyph_block_is_skipped() {
        let mut doc = RenderedDocument::new(vec![
            heading(3, "Evidence Categories Present:"),
            para("The following categories were reviewed."),
            para("☑ Observational<br>☐ Traditional use"),
            para("Closing remarks."),
        ]);
        let checklist = consolidate_checklists(&mut doc, MARKER).unwrap();
        assert_eq!(
            checklist.items,
            vec![item(true, "Observational"), item(false, "Traditional use")]
        );
        assert_eq!(doc.blocks.len(), 3);
        assert_eq!(doc.blocks[1], para("The following categories were reviewed."));
        assert_eq!(doc.blocks[2], para("Closing remarks."));
    }

    #[test]
    fn non_scannable_blocks_are_invisible_to_the_scan() {
        let mut doc = RenderedDocument::new(vec![
            heading(4, "Evidence Categories Present:"),
            para("☑ One"),
            RenderedBlock::List {
                ordered: false,
                inner: "<li>bullet</li>".to_string(),
            },
            para("☐ Two"),
            heading(5, "Deep heading"),
            para("☑ Three"),
        ]);
        let checklist = consolidate_checklists(&mut doc, MARKER).unwrap();
        let labels: Vec<&str> = checklist.items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["One", "Two", "Three"]);
        assert_eq!(doc.blocks.len(), 3);
        assert_eq!(doc.blocks[1].kind(), BlockKind::Other);
        assert_eq!(doc.blocks[2].kind(), BlockKind::Heading(5));
    }

    #[test]
    fn checklist_markup_distinguishes_checked_items() {
        let mut doc = RenderedDocument::new(vec![para("Evidence Categories Present: ☑ A &amp; B ☐ C")]);
        consolidate_checklists(&mut doc, MARKER).unwrap();
        let markup = doc.to_markup();
        assert!(markup.starts_with("<div class=\"evidence-categories-box\"><h4>Evidence Categories Present:</h4><ul>"));
        assert!(markup.contains("<span class=\"checkbox-checked\">✓</span><span class=\"checklist-label\">A &amp; B</span>"));
        assert!(markup.contains("<span class=\"checkbox-unchecked\"></span>"));
        assert_eq!(doc.checklist().unwrap().checked_count(), 1);
    }

    // ── 2. renderer ───────────────────────────────────────────────────────────

    #[test]
    fn renderer_produces_heading_paragraph_and_list_blocks() {
        let doc = BlockRenderer.render("# Title\n\nLine one\nLine **two**\n\n1. first\n2. second\n   more\n\n<script>");
        assert_eq!(doc.blocks.len(), 4);
        assert_eq!(doc.blocks[0], heading(1, "Title"));
        assert_eq!(doc.blocks[1], para("Line one<br>Line <strong>two</strong>"));
        assert_eq!(
            doc.blocks[2],
            RenderedBlock::List {
                ordered: true,
                inner: "<li>first</li><li>second more</li>".to_string()
            }
        );
        assert_eq!(doc.blocks[3], para("&lt;script&gt;"));
    }

    #[test]
    fn heading_chunk_continuation_renders_as_next_block() {
        let doc = BlockRenderer.render("## Heading\nbody directly below");
        assert_eq!(doc.blocks, vec![heading(2, "Heading"), para("body directly below")]);
    }

    // ── 3. full pipeline ──────────────────────────────────────────────────────

    #[test]
    fn prepare_narrative_repairs_renders_and_consolidates() {
        let raw = "# Report ## Evidence Categories Present: ☑Category One ☐Category Two\n\
                   ☑Category Three\n\
                   \n\
                   Plain closing paragraph.";
        let prepared = prepare_narrative(raw, &BlockRenderer, MARKER);

        let checklist = prepared.checklist.unwrap();
        assert_eq!(checklist.items.len(), 3);
        assert_eq!(checklist.items[2], item(true, "Category Three"));

        let blocks = prepared.document.blocks();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0], heading(1, "Report"));
        assert!(matches!(blocks[1], RenderedBlock::Checklist { .. }));
        assert_eq!(blocks[2], para("Plain closing paragraph."));
    }

    mod proptest_tests {
        use proptest::prelude::*;

        use super::*;

        fn line() -> impl Strategy<Value = String> {
            prop_oneof![
                Just("Evidence Categories Present:".to_string()),
                Just("## Section".to_string()),
                Just("plain prose".to_string()),
                "[☑☐]?[a-z ]{0,12}",
                "([☑☐][a-z]{1,6} ?){1,3}",
            ]
        }

        fn narrative() -> impl Strategy<Value = String> {
            prop::collection::vec(line(), 0..12).prop_map(|lines| lines.join("\n"))
        }

        proptest! {
            #[test]
            fn consolidation_is_deterministic(text in narrative()) {
                let first = prepare_narrative(&text, &BlockRenderer, MARKER);
                let second = prepare_narrative(&text, &BlockRenderer, MARKER);
                prop_assert_eq!(&first.checklist, &second.checklist);
                prop_assert_eq!(first.document, second.document);
            }

            #[test]
            fn consolidation_never_adds_blocks(text in narrative()) {
                let rendered = BlockRenderer.render(&repair_structure(&text));
                let before = rendered.blocks().len();
                let mut doc = rendered.clone();
                let result = consolidate_checklists(&mut doc, MARKER);
                prop_assert!(doc.blocks().len() <= before);
                if result.is_none() {
                    prop_assert_eq!(doc, rendered);
                }
            }
        }
    }
}
