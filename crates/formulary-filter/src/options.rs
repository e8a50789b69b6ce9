//! Dropdown option derivation.
//!
//! The selectable values of the primary and secondary facets are derived
//! from the loaded snapshot, so a facet can never offer a value that matches
//! nothing.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use formulary_contracts::medication::MedicationRecord;

/// One selectable facet value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    /// The value passed back into the facet.
    pub value: String,
    /// What the dropdown shows.
    pub label: String,
}

/// Distinct leaf codes, sorted by code, labelled `"<code> - <name>"`.
///
/// If records disagree on the name for one code, the first one seen wins.
pub fn primary_filter_options(records: &[MedicationRecord]) -> Vec<FilterOption> {
    let mut by_code: BTreeMap<&str, &str> = BTreeMap::new();
    for taxonomy in records.iter().filter_map(|r| r.primary_taxonomy.as_ref()) {
        by_code
            .entry(taxonomy.leaf.code.as_str())
            .or_insert(taxonomy.leaf.name.as_str());
    }

    by_code
        .into_iter()
        .map(|(code, name)| FilterOption {
            value: code.to_string(),
            label: format!("{} - {}", code, name),
        })
        .collect()
}

/// Distinct secondary category names, sorted case-insensitively.
///
/// The value is the bare name, the same string the secondary facet matches
/// by containment.
pub fn secondary_filter_options(records: &[MedicationRecord]) -> Vec<FilterOption> {
    let distinct: HashSet<String> = records
        .iter()
        .filter_map(|r| r.secondary())
        .map(|category| category.name)
        .filter(|name| !name.is_empty())
        .collect();

    let mut names: Vec<String> = distinct.into_iter().collect();
    names.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)));

    names
        .into_iter()
        .map(|name| FilterOption {
            value: name.clone(),
            label: name,
        })
        .collect()
}
