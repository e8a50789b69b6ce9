//! Seam trait definitions for the formulary engine.
//!
//! These traits mark every boundary the engine does not own:
//!
//! - `ResourceStore`: the asynchronous data store the three resources come from
//! - `ContentBlock`: one block-level node of a rendered narrative
//! - `ContentTree`: an ordered sequence of blocks supporting replace and remove
//! - `NarrativeRenderer`: the external `render(text) -> markup` step
//!
//! Checklist consolidation is written against `ContentTree` only, so any tree
//! library that can expose these capabilities can be plugged in.

use std::future::Future;

use serde::{Deserialize, Serialize};

use formulary_contracts::{
    error::FormularyResult,
    resource::{FetchedResource, ResourceKind},
};

// ── Data store ───────────────────────────────────────────────────────────────

/// A source of raw JSON resources.
///
/// Implementations perform one plain fetch per call and never cache; the
/// session's `ResourceSlot`s guarantee each resource is requested at most
/// once per successful load.
pub trait ResourceStore: Send + Sync {
    /// Fetch the raw body of `kind`.
    ///
    /// A transport failure, a missing resource, or a non-success status must
    /// surface as `FormularyError::ResourceUnavailable`.
    fn fetch(
        &self,
        kind: ResourceKind,
    ) -> impl Future<Output = FormularyResult<FetchedResource>> + Send;
}

// ── Rendered content ─────────────────────────────────────────────────────────

/// The structural kind of a rendered block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// `h1`..`h6`; the level is 1-based.
    Heading(u8),
    Paragraph,
    /// Lists, preformatted text and anything else the consolidation pass
    /// must not treat as checklist content.
    Other,
}

impl BlockKind {
    /// Return true if this is a heading of any level.
    pub fn is_heading(&self) -> bool {
        matches!(self, BlockKind::Heading(_))
    }

    /// Return true for the block kinds the consolidation pass scans.
    ///
    /// Only paragraphs and headings of level 1–4 are candidates.
    pub fn is_scannable(&self) -> bool {
        match self {
            BlockKind::Paragraph => true,
            BlockKind::Heading(level) => (1..=4).contains(level),
            BlockKind::Other => false,
        }
    }
}

/// Read access to one block-level node.
pub trait ContentBlock {
    fn kind(&self) -> BlockKind;

    /// The inner markup of the block: text with inline tags and `<br>` line
    /// breaks, without the block's own enclosing tag.
    fn inner_markup(&self) -> &str;
}

/// One consolidated checklist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub checked: bool,
    /// Item text with the glyph removed and surrounding whitespace trimmed.
    pub label: String,
}

/// The structured block that replaces scattered checklist glyph lines.
///
/// Items are in encounter order; they are never sorted or deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceChecklist {
    /// The marker phrase, restated as the block header.
    pub heading: String,
    pub items: Vec<ChecklistItem>,
}

impl EvidenceChecklist {
    pub fn checked_count(&self) -> usize {
        self.items.iter().filter(|item| item.checked).count()
    }
}

/// An ordered sequence of block nodes with the two mutations the checklist
/// consolidation pass needs.
pub trait ContentTree {
    type Block: ContentBlock;

    /// Top-level blocks in document order.
    fn blocks(&self) -> &[Self::Block];

    /// Replace the block at `index` with a rendered checklist.
    ///
    /// Out-of-range indices are ignored.
    fn replace_with_checklist(&mut self, index: usize, checklist: &EvidenceChecklist);

    /// Remove every block whose index is in `indices`.
    ///
    /// Indices refer to positions before any removal; duplicates and
    /// out-of-range indices are ignored.
    fn remove_blocks(&mut self, indices: &[usize]);
}

/// The external markdown-style renderer.
///
/// Must be a pure function of its input.
pub trait NarrativeRenderer {
    type Document: ContentTree;

    fn render(&self, text: &str) -> Self::Document;
}
