//! Mapping-confidence resolution.
//!
//! `resolve` turns a `MappingType` and its optional notes into everything a
//! view needs to annotate a primary-taxonomy code: a badge glyph, an
//! explanation line, a tooltip, a confidence level, and a tone for the code
//! pill. It is pure and total: every `MappingType`, including the `Unknown`
//! fallback arm, produces a value.
//!
//! `mapping_summary` builds the compact mapping panel shown next to a code:
//! a short label with its confidence level, any related taxonomy codes cited
//! in the notes, and a truncated notes preview.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use formulary_contracts::mapping::MappingType;

/// Notes previews are cut to this many characters.
pub const NOTES_PREVIEW_CHARS: usize = 60;

/// A full level-5 code: letter, 2 digits, 2 letters, 2 digits (`N02BE01`).
static RELATED_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]\d{2}[A-Z]{2}\d{2}").expect("valid regex"));

// ── Types ────────────────────────────────────────────────────────────────────

/// Qualitative trust in a primary-taxonomy assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    /// Exact, corrected, or unannotated mappings.
    High,
    /// Name variants, and substances only found inside combination products.
    Medium,
    /// Category-level approximation.
    Low,
    /// The taxonomy has no entry for this substance.
    None,
    /// The tag was not recognized.
    Unknown,
}

/// Visual treatment of the code pill next to a medication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CodeTone {
    Plain,
    Approximation,
    NotInTaxonomy,
    Combination,
}

/// The rendered annotation for one mapping.
///
/// High-confidence mappings carry no badge, explanation, or tooltip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Confidence {
    pub level: ConfidenceLevel,
    pub badge: Option<&'static str>,
    pub explanation: Option<String>,
    pub tooltip: Option<String>,
    pub tone: CodeTone,
}

impl Confidence {
    fn high() -> Self {
        Self {
            level: ConfidenceLevel::High,
            badge: None,
            explanation: None,
            tooltip: None,
            tone: CodeTone::Plain,
        }
    }

    /// Return true if a view should render any annotation at all.
    pub fn is_annotated(&self) -> bool {
        self.badge.is_some()
    }
}

// ── Resolver ─────────────────────────────────────────────────────────────────

/// Resolve the annotation for `mapping_type`.
///
/// Blank `notes` count as absent and fall back to the case's default sentence.
pub fn resolve(mapping_type: &MappingType, notes: Option<&str>) -> Confidence {
    let notes = notes.map(str::trim).filter(|n| !n.is_empty());
    let line = |badge: &str, heading: &str, default: &str| {
        format!("{} {}: {}", badge, heading, notes.unwrap_or(default))
    };

    match mapping_type {
        MappingType::Absent | MappingType::Exact | MappingType::CorrectedDirectMatch => {
            Confidence::high()
        }

        MappingType::NameVariant => Confidence {
            level: ConfidenceLevel::Medium,
            badge: Some("※"),
            explanation: Some(line(
                "※",
                "Name Variant",
                "US/FDA name differs from WHO international name",
            )),
            tooltip: Some(
                "Name Variant: US/FDA name differs from WHO international name, but the WHO \
                 code and category are clinically accurate."
                    .to_string(),
            ),
            tone: CodeTone::Plain,
        },

        MappingType::Approximation => Confidence {
            level: ConfidenceLevel::Low,
            badge: Some("⚠"),
            explanation: Some(line(
                "⚠",
                "Approximation",
                "Mapped to category level; specific substance code may not exist",
            )),
            tooltip: Some(
                "Category-Level Mapping: This medication is mapped to a general therapeutic \
                 category. A specific WHO substance code may not exist."
                    .to_string(),
            ),
            tone: CodeTone::Approximation,
        },

        MappingType::CombinationComponent => Confidence {
            level: ConfidenceLevel::Medium,
            badge: Some("C"),
            explanation: Some(line(
                "C",
                "Combination Component",
                "Used only in combination products",
            )),
            tooltip: Some(
                "Combination Component: This substance is used only as a component in \
                 combination products."
                    .to_string(),
            ),
            tone: CodeTone::Combination,
        },

        MappingType::NotInWho => Confidence {
            level: ConfidenceLevel::None,
            badge: Some("⊘"),
            explanation: Some(line(
                "⊘",
                "Not in WHO",
                "Not found in WHO ATC classification system",
            )),
            tooltip: Some(
                "Not in WHO Database: This medication is not found in the WHO ATC \
                 classification system (may be discontinued or regional)."
                    .to_string(),
            ),
            tone: CodeTone::NotInTaxonomy,
        },

        MappingType::Unknown(tag) => Confidence {
            level: ConfidenceLevel::Unknown,
            badge: Some("?"),
            explanation: Some(line(
                "?",
                &format!("Unknown ({})", tag),
                "Mapping information unavailable",
            )),
            tooltip: Some(format!(
                "Unknown Mapping: {}",
                notes.unwrap_or("Mapping information unavailable")
            )),
            tone: CodeTone::Plain,
        },
    }
}

// ── Mapping summary ──────────────────────────────────────────────────────────

/// The compact mapping panel for one medication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingSummary {
    pub label: String,
    /// Same level `resolve` assigns, so panels can be tallied by confidence.
    pub level: ConfidenceLevel,
    pub hint: &'static str,
    /// Full taxonomy codes cited in the notes, in order of appearance.
    pub related_codes: Vec<String>,
    /// At most `NOTES_PREVIEW_CHARS` characters, with `...` appended when cut.
    pub notes_preview: Option<String>,
}

/// Build the mapping panel, or `None` when no mapping was attempted.
pub fn mapping_summary(mapping_type: &MappingType, notes: Option<&str>) -> Option<MappingSummary> {
    let (label, hint) = match mapping_type {
        MappingType::Absent => return None,
        MappingType::NotInWho => ("Not in WHO".to_string(), "Too new, discontinued, or not therapeutic"),
        MappingType::CombinationComponent => ("Combination Only".to_string(), "Only exists in combinations"),
        MappingType::NameVariant => ("Name Variant".to_string(), "Listed under different name in WHO"),
        MappingType::Approximation => ("Approximation".to_string(), "Closest code identified"),
        MappingType::CorrectedDirectMatch => ("Direct Match".to_string(), "Exact match found"),
        MappingType::Exact => ("Exact Match".to_string(), "Exact match in WHO"),
        MappingType::Unknown(tag) => (tag.replace('_', " "), ""),
    };

    let notes = notes.filter(|n| !n.is_empty());

    let related_codes = notes
        .map(|text| {
            RELATED_CODE_RE
                .find_iter(text)
                .map(|m| m.as_str().to_string())
                .collect()
        })
        .unwrap_or_default();

    let notes_preview = notes.map(|text| {
        let mut preview: String = text.chars().take(NOTES_PREVIEW_CHARS).collect();
        if text.chars().count() > NOTES_PREVIEW_CHARS {
            preview.push_str("...");
        }
        preview
    });

    Some(MappingSummary {
        label,
        level: resolve(mapping_type, notes).level,
        hint,
        related_codes,
        notes_preview,
    })
}
