//! Fixture resources for the demo scenarios and session tests.
//!
//! The bodies mirror the wire format of the published dashboard resources.
//! All records are fictional.
//!
//! Shape of the data set:
//!
//! - 9 medications; 3 share leaf `N02BE` (anilides), 2 share `M01AE`
//!   (propionic acid derivatives), 1 sits in `A11CC` which has no category
//!   report, 1 has no taxonomy at all.
//! - Every mapping tag appears at least once, plus one unrecognized tag.
//! - `M01AE` has a report without narrative; `N02BE` and `B03AA` have full
//!   reports, and the `N02BE` narrative carries an evidence checklist.

use serde_json::{json, Value};

use formulary_contracts::resource::ResourceKind;
use formulary_store::InMemoryStore;

// ── Medication snapshot ───────────────────────────────────────────────────────

pub fn medications() -> Value {
    json!([
        {
            "id": 101, "name": "Paracetamol", "status": "ALLOWED", "topical_only": false,
            "level1_code": "N", "level1_name": "NERVOUS SYSTEM",
            "level2_code": "N02", "level2_name": "ANALGESICS",
            "level3_code": "N02B", "level3_name": "OTHER ANALGESICS AND ANTIPYRETICS",
            "level4_code": "N02BE", "level4_name": "Anilides",
            "ahfs_category": "28:08.92 - Analgesics and Antipyretics, Miscellaneous",
            "who_mapping_type": "exact"
        },
        {
            "id": 102, "name": "propacetamol", "status": "TARGET_FOR_MODERNIZATION", "topical_only": false,
            "level1_code": "N", "level1_name": "NERVOUS SYSTEM",
            "level2_code": "N02", "level2_name": "ANALGESICS",
            "level3_code": "N02B", "level3_name": "OTHER ANALGESICS AND ANTIPYRETICS",
            "level4_code": "N02BE", "level4_name": "Anilides",
            "ahfs_category": "28:08.92 - Analgesics and Antipyretics, Miscellaneous",
            "who_mapping_type": "name_variant",
            "who_mapping_notes": "Listed as a prodrug of paracetamol (N02BE01)."
        },
        {
            "id": 103, "name": "Acetaminophen with caffeine", "status": "ALLOWED", "topical_only": false,
            "level1_code": "N", "level1_name": "NERVOUS SYSTEM",
            "level2_code": "N02", "level2_name": "ANALGESICS",
            "level3_code": "N02B", "level3_name": "OTHER ANALGESICS AND ANTIPYRETICS",
            "level4_code": "N02BE", "level4_name": "Anilides",
            "ahfs_category": "28:08.92 - Analgesics and Antipyretics, Miscellaneous",
            "who_mapping_type": "combination_component",
            "who_mapping_notes": "Combination product; paracetamol component classified under N02BE51, caffeine under N06BC01."
        },
        {
            "id": 201, "name": "Ibuprofen", "status": "ALLOWED", "topical_only": false,
            "level1_code": "M", "level1_name": "MUSCULO-SKELETAL SYSTEM",
            "level2_code": "M01", "level2_name": "ANTIINFLAMMATORY AND ANTIRHEUMATIC PRODUCTS",
            "level3_code": "M01A", "level3_name": "ANTIINFLAMMATORY AND ANTIRHEUMATIC PRODUCTS, NON-STEROIDS",
            "level4_code": "M01AE", "level4_name": "Propionic acid derivatives",
            "ahfs_category": "28:08.04.92 - Nonsteroidal Anti-inflammatory Agents, Other",
            "who_mapping_type": "corrected_direct_match",
            "who_mapping_notes": "Source listed M01AB; corrected to M01AE01."
        },
        {
            "id": 202, "name": "ketoprofen gel", "status": "NOT_ALLOWED", "topical_only": true,
            "level1_code": "M", "level1_name": "MUSCULO-SKELETAL SYSTEM",
            "level2_code": "M01", "level2_name": "ANTIINFLAMMATORY AND ANTIRHEUMATIC PRODUCTS",
            "level3_code": "M01A", "level3_name": "ANTIINFLAMMATORY AND ANTIRHEUMATIC PRODUCTS, NON-STEROIDS",
            "level4_code": "M01AE", "level4_name": "Propionic acid derivatives",
            "ahfs_category": "84:08 - Anti-inflammatory Agents",
            "who_mapping_type": "approximation",
            "who_mapping_notes": "Topical form is closest to M02AA10 but systemic code used for grouping."
        },
        {
            "id": 301, "name": "Ferrous sulfate", "status": "DISCONTINUED", "topical_only": false,
            "level1_code": "B", "level1_name": "BLOOD AND BLOOD FORMING ORGANS",
            "level2_code": "B03", "level2_name": "ANTIANEMIC PREPARATIONS",
            "level3_code": "B03A", "level3_name": "IRON PREPARATIONS",
            "level4_code": "B03AA", "level4_name": "Iron bivalent, oral preparations",
            "ahfs_category": "20:04.04 - Iron Preparations"
        },
        {
            "id": 401, "name": "Cholecalciferol", "status": "ALLOWED", "topical_only": false,
            "level1_code": "A", "level1_name": "ALIMENTARY TRACT AND METABOLISM",
            "level4_code": "A11CC", "level4_name": "Vitamin D and analogues",
            "ahfs_category": "88:16 - Vitamin D",
            "who_mapping_type": "provisional",
            "who_mapping_notes": "Awaiting committee review."
        },
        {
            "id": 501, "name": "Zinc oxide paste", "status": "NEEDS_REVIEW", "topical_only": true,
            "ahfs_category": "84:24.12 - Protectants",
            "who_mapping_type": "not_in_who",
            "who_mapping_notes": "Barrier preparation without an ATC assignment."
        },
        {
            "id": 502, "name": "aloe vera gel", "status": null, "topical_only": true,
            "ahfs_category": "84:24.12 - Protectants"
        }
    ])
}

// ── Full-detail map ───────────────────────────────────────────────────────────

pub fn details() -> Value {
    json!({
        "101": {
            "id": 101, "name": "Paracetamol", "status": "ALLOWED", "topical_only": false,
            "rationale": "First-line analgesic with a long safety record.",
            "classification": {
                "level1_code": "N", "level1_name": "NERVOUS SYSTEM",
                "level4_code": "N02BE", "level4_name": "Anilides"
            },
            "ahfs_category": "28:08.92 - Analgesics and Antipyretics, Miscellaneous",
            "who_mapping_type": "exact",
            "natural_connection": {
                "works_natural_pathways": true
            },
            "full_report": "# Paracetamol ## Natural Connection\nActs centrally on prostaglandin synthesis.\n- Reduces fever\n- Relieves mild pain\n## Evidence Categories Present: ☑Mechanistic studies ☐Traditional use\n☑Clinical trials\n\nReviewed by the formulary committee."
        },
        "201": {
            "id": 201, "name": "Ibuprofen", "status": "ALLOWED", "topical_only": false,
            "rationale": "Standard NSAID.",
            "classification": {
                "level4_code": "M01AE", "level4_name": "Propionic acid derivatives"
            },
            "who_mapping_type": "corrected_direct_match",
            "who_mapping_notes": "Source listed M01AB; corrected to M01AE01.",
            "full_report": ""
        },
        "501": {
            "id": 501, "name": "Zinc oxide paste", "status": "NEEDS_REVIEW", "topical_only": true,
            "who_mapping_type": "not_in_who",
            "natural_connection": {
                "direct_natural_source": true
            }
        }
    })
}

// ── Category-report map ───────────────────────────────────────────────────────

pub fn category_reports() -> Value {
    json!({
        "N02BE": {
            "level1_code": "N", "level1_name": "NERVOUS SYSTEM",
            "level2_code": "N02", "level2_name": "ANALGESICS",
            "level3_code": "N02B", "level3_name": "OTHER ANALGESICS AND ANTIPYRETICS",
            "level4_code": "N02BE", "level4_name": "Anilides",
            "medication_count": 2,
            "category_status": "ALLOWED",
            "therapeutic_purpose": "Analgesia and antipyresis.",
            "mixed_natural_synthetic": true,
            "natural_connection": { "works_natural_pathways": true },
            "full_report": "## Category Overview\nAnilides are centrally acting analgesics.\n### Evidence Categories Present:\n☑ Pharmacological studies\n☐ Ethnobotanical records\n\n☑ Systematic reviews\n\nSee individual medication reports for dosing."
        },
        "M01AE": {
            "level4_code": "M01AE", "level4_name": "Propionic acid derivatives",
            "category_status": "ALLOWED",
            "predominantly_synthetic": true,
            "full_report": "   "
        },
        "B03AA": {
            "level1_code": "B", "level1_name": "BLOOD AND BLOOD FORMING ORGANS",
            "level4_code": "B03AA", "level4_name": "Iron bivalent, oral preparations",
            "category_status": "DISCONTINUED",
            "predominantly_natural": true,
            "natural_therapies_available": true,
            "natural_connection": { "endogenous_compound": true },
            "full_report": "# Iron Preparations\nIron is an essential mineral. Dietary sources are preferred where adequate."
        },
        "R05CB": {
            "level4_code": "R05CB", "level4_name": "Mucolytics",
            "category_status": "NOT_ALLOWED",
            "full_report": "## Mucolytics\nNo medications in the current snapshot."
        }
    })
}

/// An `InMemoryStore` serving all three fixture resources.
pub fn fixture_store() -> InMemoryStore {
    InMemoryStore::new()
        .with_json(ResourceKind::Medications, &medications())
        .with_json(ResourceKind::Details, &details())
        .with_json(ResourceKind::CategoryReports, &category_reports())
}
