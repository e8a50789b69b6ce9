//! Full per-medication detail.
//!
//! The full-detail resource is an object keyed by the stringified medication
//! id. It is fetched lazily on the first detail request.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    mapping::MappingType,
    medication::{PrimaryTaxonomy, Status, TaxonomyLevels},
    natural::NaturalConnectionFlags,
};

/// The full-detail resource: stringified id → detail.
pub type DetailMap = HashMap<String, MedicationDetail>;

/// Everything the detail view shows for one medication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "DetailWire", into = "DetailWire")]
pub struct MedicationDetail {
    pub id: i64,
    pub name: String,
    pub status: Status,
    pub topical_only: bool,
    pub rationale: Option<String>,
    pub primary_taxonomy: Option<PrimaryTaxonomy>,
    pub secondary_category: Option<String>,
    pub mapping_type: MappingType,
    pub mapping_notes: Option<String>,
    pub natural_connection: NaturalConnectionFlags,
    pub full_report: Option<String>,
}

impl MedicationDetail {
    pub fn has_narrative(&self) -> bool {
        self.full_report
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DetailWire {
    id: i64,
    name: String,
    status: Status,
    #[serde(default)]
    topical_only: bool,
    #[serde(default)]
    rationale: Option<String>,
    #[serde(default)]
    classification: TaxonomyLevels,
    #[serde(default)]
    ahfs_category: Option<String>,
    #[serde(default)]
    who_mapping_type: MappingType,
    #[serde(default)]
    who_mapping_notes: Option<String>,
    #[serde(default)]
    natural_connection: NaturalConnectionFlags,
    #[serde(default)]
    full_report: Option<String>,
}

impl From<DetailWire> for MedicationDetail {
    fn from(wire: DetailWire) -> Self {
        let text = |value: Option<String>| value.filter(|s| !s.trim().is_empty());
        Self {
            id: wire.id,
            name: wire.name,
            status: wire.status,
            topical_only: wire.topical_only,
            rationale: text(wire.rationale),
            primary_taxonomy: PrimaryTaxonomy::from_levels(wire.classification),
            secondary_category: text(wire.ahfs_category),
            mapping_type: wire.who_mapping_type,
            mapping_notes: text(wire.who_mapping_notes),
            natural_connection: wire.natural_connection,
            full_report: text(wire.full_report),
        }
    }
}

impl From<MedicationDetail> for DetailWire {
    fn from(detail: MedicationDetail) -> Self {
        Self {
            classification: TaxonomyLevels::from(detail.primary_taxonomy.as_ref()),
            id: detail.id,
            name: detail.name,
            status: detail.status,
            topical_only: detail.topical_only,
            rationale: detail.rationale,
            ahfs_category: detail.secondary_category,
            who_mapping_type: detail.mapping_type,
            who_mapping_notes: detail.mapping_notes,
            natural_connection: detail.natural_connection,
            full_report: detail.full_report,
        }
    }
}
