//! Category research reports.
//!
//! One `CategoryReport` per primary-taxonomy leaf, keyed by leaf code in the
//! category-report resource. Reports are loaded once and never mutated.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    medication::{TaxonomyLevels, TaxonomyNode},
    natural::{CategoryProfile, NaturalConnectionFlags},
};

/// The category-report resource: leaf code → report.
///
/// When the source object repeats a key, the last entry wins.
pub type CategoryReportMap = BTreeMap<String, CategoryReport>;

/// Research narrative and hierarchy metadata for one taxonomy leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CategoryReportWire", into = "CategoryReportWire")]
pub struct CategoryReport {
    pub leaf_code: String,
    pub leaf_name: String,
    pub level1: Option<TaxonomyNode>,
    pub level2: Option<TaxonomyNode>,
    pub level3: Option<TaxonomyNode>,
    pub category_status: Option<String>,
    pub category_description: Option<String>,
    pub therapeutic_purpose: Option<String>,
    pub common_mechanisms: Option<String>,
    pub typical_clinical_uses: Option<String>,
    pub natural_alternatives_notes: Option<String>,
    pub naturopathic_considerations: Option<String>,
    pub safety_considerations: Option<String>,
    pub typical_naturopathic_applications: Option<String>,
    /// The count stored by the data generator; views recompute their own.
    pub stored_medication_count: Option<u32>,
    pub profile: CategoryProfile,
    pub natural_connection: NaturalConnectionFlags,
    pub full_report: Option<String>,
}

impl CategoryReport {
    /// True when the report carries narrative text worth rendering.
    pub fn has_narrative(&self) -> bool {
        self.full_report
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty())
    }

    /// Ancestors then leaf, broadest first, skipping absent levels.
    pub fn hierarchy(&self) -> Vec<TaxonomyNode> {
        let leaf = TaxonomyNode {
            code: self.leaf_code.clone(),
            name: self.leaf_name.clone(),
        };
        [self.level1.clone(), self.level2.clone(), self.level3.clone(), Some(leaf)]
            .into_iter()
            .flatten()
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CategoryReportWire {
    #[serde(flatten)]
    levels: TaxonomyLevels,
    #[serde(default, rename = "medication_count")]
    stored_medication_count: Option<u32>,
    #[serde(default)]
    category_status: Option<String>,
    #[serde(default)]
    category_description: Option<String>,
    #[serde(default)]
    therapeutic_purpose: Option<String>,
    #[serde(default)]
    common_mechanisms: Option<String>,
    #[serde(default)]
    typical_clinical_uses: Option<String>,
    #[serde(default)]
    natural_alternatives_notes: Option<String>,
    #[serde(default)]
    naturopathic_considerations: Option<String>,
    #[serde(default)]
    safety_considerations: Option<String>,
    #[serde(default)]
    typical_naturopathic_applications: Option<String>,
    #[serde(flatten)]
    profile: CategoryProfile,
    #[serde(default)]
    natural_connection: NaturalConnectionFlags,
    #[serde(default)]
    full_report: Option<String>,
}

impl From<CategoryReportWire> for CategoryReport {
    fn from(wire: CategoryReportWire) -> Self {
        let leaf_code = wire.levels.level4_code.clone().unwrap_or_default();
        let leaf_name = wire.levels.level4_name.clone().unwrap_or_default();

        let [level1, level2, level3] = wire.levels.ancestors();

        let text = |value: Option<String>| value.filter(|s| !s.trim().is_empty());

        Self {
            leaf_code,
            leaf_name,
            level1,
            level2,
            level3,
            category_status: text(wire.category_status),
            category_description: text(wire.category_description),
            therapeutic_purpose: text(wire.therapeutic_purpose),
            common_mechanisms: text(wire.common_mechanisms),
            typical_clinical_uses: text(wire.typical_clinical_uses),
            natural_alternatives_notes: text(wire.natural_alternatives_notes),
            naturopathic_considerations: text(wire.naturopathic_considerations),
            safety_considerations: text(wire.safety_considerations),
            typical_naturopathic_applications: text(wire.typical_naturopathic_applications),
            stored_medication_count: wire.stored_medication_count,
            profile: wire.profile,
            natural_connection: wire.natural_connection,
            full_report: text(wire.full_report),
        }
    }
}

impl From<CategoryReport> for CategoryReportWire {
    fn from(report: CategoryReport) -> Self {
        let split = |node: Option<TaxonomyNode>| match node {
            Some(n) => (Some(n.code), Some(n.name)),
            None => (None, None),
        };
        let (level1_code, level1_name) = split(report.level1);
        let (level2_code, level2_name) = split(report.level2);
        let (level3_code, level3_name) = split(report.level3);

        Self {
            levels: TaxonomyLevels {
                level1_code,
                level1_name,
                level2_code,
                level2_name,
                level3_code,
                level3_name,
                level4_code: Some(report.leaf_code),
                level4_name: Some(report.leaf_name),
            },
            stored_medication_count: report.stored_medication_count,
            category_status: report.category_status,
            category_description: report.category_description,
            therapeutic_purpose: report.therapeutic_purpose,
            common_mechanisms: report.common_mechanisms,
            typical_clinical_uses: report.typical_clinical_uses,
            natural_alternatives_notes: report.natural_alternatives_notes,
            naturopathic_considerations: report.naturopathic_considerations,
            safety_considerations: report.safety_considerations,
            typical_naturopathic_applications: report.typical_naturopathic_applications,
            profile: report.profile,
            natural_connection: report.natural_connection,
            full_report: report.full_report,
        }
    }
}
