//! Primary-taxonomy mapping provenance.
//!
//! `MappingType` records how a medication's primary-taxonomy code was
//! assigned. The wire value is a free-form string (or null); it is parsed
//! once at load time into a closed enumeration with an explicit fallback arm
//! for values outside the known set.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Confidence/provenance tag for a primary-taxonomy assignment.
///
/// Serialized as the snake_case wire tag; `Absent` round-trips as JSON
/// `null` and `Unknown` keeps the raw tag it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum MappingType {
    /// Direct code match.
    Exact,
    /// Match found after a manual correction.
    CorrectedDirectMatch,
    /// Code and category correct; the display name differs from the taxonomy's.
    NameVariant,
    /// Mapped to a category-level entry; no precise leaf code is claimed.
    Approximation,
    /// Substance appears only as an ingredient in combination products.
    CombinationComponent,
    /// No taxonomy entry exists for this substance.
    NotInWho,
    /// No mapping was attempted.
    #[default]
    Absent,
    /// A tag value outside the known set, kept verbatim.
    Unknown(String),
}

impl MappingType {
    /// Parse a wire tag. Never fails: unknown values land in `Unknown`.
    pub fn parse(tag: &str) -> Self {
        match tag.trim() {
            "" => MappingType::Absent,
            "exact" => MappingType::Exact,
            "corrected_direct_match" => MappingType::CorrectedDirectMatch,
            "name_variant" => MappingType::NameVariant,
            "approximation" => MappingType::Approximation,
            "combination_component" => MappingType::CombinationComponent,
            "not_in_who" => MappingType::NotInWho,
            other => {
                warn!(tag = %other, "unrecognized mapping tag; using unknown fallback");
                MappingType::Unknown(other.to_string())
            }
        }
    }

    /// The wire tag, or `None` for `Absent`.
    pub fn as_tag(&self) -> Option<&str> {
        match self {
            MappingType::Exact => Some("exact"),
            MappingType::CorrectedDirectMatch => Some("corrected_direct_match"),
            MappingType::NameVariant => Some("name_variant"),
            MappingType::Approximation => Some("approximation"),
            MappingType::CombinationComponent => Some("combination_component"),
            MappingType::NotInWho => Some("not_in_who"),
            MappingType::Absent => None,
            MappingType::Unknown(raw) => Some(raw.as_str()),
        }
    }
}

impl From<Option<String>> for MappingType {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(tag) => MappingType::parse(&tag),
            None => MappingType::Absent,
        }
    }
}

impl From<MappingType> for Option<String> {
    fn from(value: MappingType) -> Self {
        value.as_tag().map(str::to_string)
    }
}

impl fmt::Display for MappingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag().unwrap_or("absent"))
    }
}
