//! A flat rendered-document tree.
//!
//! `RenderedDocument` is the block sequence `BlockRenderer` produces and the
//! concrete `ContentTree` the dashboard runs checklist consolidation over.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use formulary_core::traits::{BlockKind, ContentBlock, ContentTree, EvidenceChecklist};

/// One top-level block. `inner` is markup without the enclosing tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "block", rename_all = "snake_case")]
pub enum RenderedBlock {
    Heading { level: u8, inner: String },
    Paragraph { inner: String },
    List { ordered: bool, inner: String },
    Checklist { checklist: EvidenceChecklist, inner: String },
}

impl RenderedBlock {
    pub fn checklist(checklist: &EvidenceChecklist) -> Self {
        let mut inner = format!("<h4>{}</h4><ul>", escape_html(&checklist.heading));
        for item in &checklist.items {
            let (mark, class) = if item.checked {
                ("<span class=\"checkbox-checked\">✓</span>", "checklist-label")
            } else {
                ("<span class=\"checkbox-unchecked\"></span>", "checklist-label muted")
            };
            inner.push_str(&format!(
                "<li>{}<span class=\"{}\">{}</span></li>",
                mark,
                class,
                escape_html(&item.label)
            ));
        }
        inner.push_str("</ul>");

        RenderedBlock::Checklist {
            checklist: checklist.clone(),
            inner,
        }
    }

    /// The block with its enclosing tag.
    pub fn to_markup(&self) -> String {
        match self {
            RenderedBlock::Heading { level, inner } => format!("<h{level}>{inner}</h{level}>"),
            RenderedBlock::Paragraph { inner } => format!("<p>{inner}</p>"),
            RenderedBlock::List { ordered: true, inner } => format!("<ol>{inner}</ol>"),
            RenderedBlock::List { ordered: false, inner } => format!("<ul>{inner}</ul>"),
            RenderedBlock::Checklist { inner, .. } => {
                format!("<div class=\"evidence-categories-box\">{inner}</div>")
            }
        }
    }
}

impl ContentBlock for RenderedBlock {
    fn kind(&self) -> BlockKind {
        match self {
            RenderedBlock::Heading { level, .. } => BlockKind::Heading(*level),
            RenderedBlock::Paragraph { .. } => BlockKind::Paragraph,
            RenderedBlock::List { .. } | RenderedBlock::Checklist { .. } => BlockKind::Other,
        }
    }

    fn inner_markup(&self) -> &str {
        match self {
            RenderedBlock::Heading { inner, .. }
            | RenderedBlock::Paragraph { inner }
            | RenderedBlock::List { inner, .. }
            | RenderedBlock::Checklist { inner, .. } => inner,
        }
    }
}

/// An ordered sequence of rendered blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedDocument {
    pub blocks: Vec<RenderedBlock>,
}

impl RenderedDocument {
    pub fn new(blocks: Vec<RenderedBlock>) -> Self {
        Self { blocks }
    }

    pub fn to_markup(&self) -> String {
        self.blocks
            .iter()
            .map(RenderedBlock::to_markup)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The consolidated checklist, if the document holds one.
    pub fn checklist(&self) -> Option<&EvidenceChecklist> {
        self.blocks.iter().find_map(|block| match block {
            RenderedBlock::Checklist { checklist, .. } => Some(checklist),
            _ => None,
        })
    }
}

impl ContentTree for RenderedDocument {
    type Block = RenderedBlock;

    fn blocks(&self) -> &[RenderedBlock] {
        &self.blocks
    }

    fn replace_with_checklist(&mut self, index: usize, checklist: &EvidenceChecklist) {
        if let Some(slot) = self.blocks.get_mut(index) {
            *slot = RenderedBlock::checklist(checklist);
        }
    }

    fn remove_blocks(&mut self, indices: &[usize]) {
        let doomed: HashSet<usize> = indices.iter().copied().collect();
        let mut index = 0;
        self.blocks.retain(|_| {
            let keep = !doomed.contains(&index);
            index += 1;
            keep
        });
    }
}

/// Escape the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
