//! Medication records and their taxonomy references.
//!
//! `MedicationRecord` is one row of the browsable snapshot. The wire format
//! is the flat object the data generator emits (`level4_code`,
//! `ahfs_category`, `who_mapping_type`, …); it is converted into the typed
//! form once, at load time, so the invariants below hold for every record a
//! caller can observe:
//!
//! - `primary_taxonomy` is either absent or has a non-empty leaf code and
//!   leaf name;
//! - ancestor levels 1–3 may be absent independently.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::mapping::MappingType;

// ── Status ───────────────────────────────────────────────────────────────────

/// Formulary status of a medication.
///
/// The four statuses the dashboard groups by have a fixed display rank.
/// `NeedsReview` is what the data generator writes for a missing status;
/// anything else is kept verbatim in `Unrecognized`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Status {
    Allowed,
    TargetForModernization,
    NotAllowed,
    Discontinued,
    NeedsReview,
    Unrecognized(String),
}

impl Status {
    /// The statuses with a fixed display position, in display order.
    pub const DISPLAY_ORDER: [Status; 4] = [
        Status::Allowed,
        Status::TargetForModernization,
        Status::NotAllowed,
        Status::Discontinued,
    ];

    /// Parse a wire tag. Never fails.
    pub fn parse(tag: &str) -> Self {
        match tag.trim() {
            "ALLOWED" => Status::Allowed,
            "TARGET_FOR_MODERNIZATION" => Status::TargetForModernization,
            "NOT_ALLOWED" => Status::NotAllowed,
            "DISCONTINUED" => Status::Discontinued,
            "" | "NEEDS_REVIEW" => Status::NeedsReview,
            other => {
                warn!(tag = %other, "unrecognized status tag");
                Status::Unrecognized(other.to_string())
            }
        }
    }

    /// The wire tag, e.g. `"TARGET_FOR_MODERNIZATION"`.
    pub fn as_tag(&self) -> &str {
        match self {
            Status::Allowed => "ALLOWED",
            Status::TargetForModernization => "TARGET_FOR_MODERNIZATION",
            Status::NotAllowed => "NOT_ALLOWED",
            Status::Discontinued => "DISCONTINUED",
            Status::NeedsReview => "NEEDS_REVIEW",
            Status::Unrecognized(raw) => raw.as_str(),
        }
    }

    /// Human label: the tag with underscores replaced by spaces.
    pub fn label(&self) -> String {
        self.as_tag().replace('_', " ")
    }

    /// Position in `DISPLAY_ORDER`, or `None` for statuses without one.
    pub fn display_rank(&self) -> Option<usize> {
        Self::DISPLAY_ORDER.iter().position(|s| s == self)
    }
}

impl From<Option<String>> for Status {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(tag) => Status::parse(&tag),
            None => Status::NeedsReview,
        }
    }
}

impl From<Status> for String {
    fn from(value: Status) -> Self {
        value.as_tag().to_string()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

// ── Primary taxonomy ─────────────────────────────────────────────────────────

/// One code/name pair in the primary taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxonomyNode {
    pub code: String,
    pub name: String,
}

/// A reference into the 4-level primary taxonomy.
///
/// Construct via `PrimaryTaxonomy::from_levels` so the leaf invariant holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryTaxonomy {
    /// Level 4: the grouping key.
    pub leaf: TaxonomyNode,
    pub level1: Option<TaxonomyNode>,
    pub level2: Option<TaxonomyNode>,
    pub level3: Option<TaxonomyNode>,
}

impl PrimaryTaxonomy {
    /// Build from the flat wire levels.
    ///
    /// Returns `None` unless the leaf has both a non-empty code and name.
    /// Ancestors only need a code; their names default to empty.
    pub fn from_levels(levels: TaxonomyLevels) -> Option<Self> {
        let leaf_code = non_empty(levels.level4_code.clone());
        let leaf_name = non_empty(levels.level4_name.clone());

        let leaf = match (leaf_code, leaf_name) {
            (Some(code), Some(name)) => TaxonomyNode { code, name },
            (None, None) => return None,
            (code, name) => {
                debug!(?code, ?name, "partial leaf taxonomy reference treated as absent");
                return None;
            }
        };

        let [level1, level2, level3] = levels.ancestors();
        Some(Self {
            leaf,
            level1,
            level2,
            level3,
        })
    }

    /// Ancestors then leaf, broadest first, skipping absent levels.
    pub fn path(&self) -> impl Iterator<Item = &TaxonomyNode> {
        [self.level1.as_ref(), self.level2.as_ref(), self.level3.as_ref(), Some(&self.leaf)]
            .into_iter()
            .flatten()
    }
}

/// The flat `levelN_code` / `levelN_name` wire fields.
///
/// Shared by every resource that embeds a taxonomy reference; flattened
/// into the surrounding object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyLevels {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level1_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level1_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level2_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level2_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level3_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level3_name: Option<String>,
    #[serde(default)]
    pub level4_code: Option<String>,
    #[serde(default)]
    pub level4_name: Option<String>,
}

impl TaxonomyLevels {
    /// Levels 1–3, each present only when its code is non-empty.
    pub fn ancestors(&self) -> [Option<TaxonomyNode>; 3] {
        let node = |code: &Option<String>, name: &Option<String>| {
            non_empty(code.clone()).map(|code| TaxonomyNode {
                code,
                name: name.clone().unwrap_or_default(),
            })
        };
        [
            node(&self.level1_code, &self.level1_name),
            node(&self.level2_code, &self.level2_name),
            node(&self.level3_code, &self.level3_name),
        ]
    }
}

impl From<Option<&PrimaryTaxonomy>> for TaxonomyLevels {
    fn from(value: Option<&PrimaryTaxonomy>) -> Self {
        let Some(taxonomy) = value else {
            return Self::default();
        };
        let split = |node: &Option<TaxonomyNode>| match node {
            Some(n) => (Some(n.code.clone()), Some(n.name.clone())),
            None => (None, None),
        };
        let (level1_code, level1_name) = split(&taxonomy.level1);
        let (level2_code, level2_name) = split(&taxonomy.level2);
        let (level3_code, level3_name) = split(&taxonomy.level3);
        Self {
            level1_code,
            level1_name,
            level2_code,
            level2_name,
            level3_code,
            level3_name,
            level4_code: Some(taxonomy.leaf.code.clone()),
            level4_name: Some(taxonomy.leaf.name.clone()),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

// ── Secondary taxonomy ───────────────────────────────────────────────────────

/// A parsed secondary-taxonomy category.
///
/// The stored value is the compound string `"<code> - <name>"`; filters and
/// drill-downs work on the bare `name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SecondaryCategory {
    pub code: String,
    pub name: String,
}

impl SecondaryCategory {
    /// Split a compound `"<code> - <name>"` string.
    ///
    /// The name is the second `" - "` segment; any further segments are
    /// ignored. A string without the separator is all name.
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw.split(" - ");
        let first = parts.next().unwrap_or_default().trim();
        match parts.next() {
            Some(name) => Self {
                code: first.to_string(),
                name: name.trim().to_string(),
            },
            None => Self {
                code: String::new(),
                name: first.to_string(),
            },
        }
    }
}

// ── MedicationRecord ─────────────────────────────────────────────────────────

/// One row of the medication snapshot.
///
/// Records are immutable once loaded; every derived view is recomputed from
/// the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "MedicationWire", into = "MedicationWire")]
pub struct MedicationRecord {
    /// Stable identity used for detail lookups.
    pub id: i64,
    pub name: String,
    pub status: Status,
    /// Independent of `status`.
    pub topical_only: bool,
    pub primary_taxonomy: Option<PrimaryTaxonomy>,
    pub mapping_type: MappingType,
    pub mapping_notes: Option<String>,
    /// Compound `"<code> - <name>"` string.
    pub secondary_category: Option<String>,
}

impl MedicationRecord {
    /// The level-4 leaf code, if classified.
    pub fn leaf_code(&self) -> Option<&str> {
        self.primary_taxonomy.as_ref().map(|t| t.leaf.code.as_str())
    }

    /// The level-4 leaf name, if classified.
    pub fn leaf_name(&self) -> Option<&str> {
        self.primary_taxonomy.as_ref().map(|t| t.leaf.name.as_str())
    }

    pub fn secondary(&self) -> Option<SecondaryCategory> {
        self.secondary_category.as_deref().map(SecondaryCategory::parse)
    }
}

/// Flat wire shape of a medication snapshot entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MedicationWire {
    id: i64,
    name: String,
    status: Status,
    #[serde(default)]
    topical_only: bool,
    #[serde(flatten)]
    levels: TaxonomyLevels,
    #[serde(default)]
    ahfs_category: Option<String>,
    #[serde(default)]
    who_mapping_type: MappingType,
    #[serde(default)]
    who_mapping_notes: Option<String>,
}

impl From<MedicationWire> for MedicationRecord {
    fn from(wire: MedicationWire) -> Self {
        Self {
            id: wire.id,
            name: wire.name,
            status: wire.status,
            topical_only: wire.topical_only,
            primary_taxonomy: PrimaryTaxonomy::from_levels(wire.levels),
            mapping_type: wire.who_mapping_type,
            mapping_notes: non_empty(wire.who_mapping_notes),
            secondary_category: non_empty(wire.ahfs_category),
        }
    }
}

impl From<MedicationRecord> for MedicationWire {
    fn from(record: MedicationRecord) -> Self {
        Self {
            levels: TaxonomyLevels::from(record.primary_taxonomy.as_ref()),
            id: record.id,
            name: record.name,
            status: record.status,
            topical_only: record.topical_only,
            ahfs_category: record.secondary_category,
            who_mapping_type: record.mapping_type,
            who_mapping_notes: record.mapping_notes,
        }
    }
}
