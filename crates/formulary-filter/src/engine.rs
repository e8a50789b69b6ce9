//! Conjunctive filter evaluation.
//!
//! Evaluation algorithm, per record:
//!
//! 1. Status facet: exact equality against `status`.
//! 2. Primary facet: exact equality against the leaf code. A record without
//!    a primary taxonomy fails an active primary facet.
//! 3. Secondary facet: substring containment of the facet value within the
//!    compound `"<code> - <name>"` string. A record without a secondary
//!    category fails an active secondary facet.
//!
//! The record passes when every active facet passes. Facets are plain values
//! and every evaluation starts from them alone, so nothing carries over from
//! one filter invocation to the next.

use serde::{Deserialize, Serialize};
use tracing::debug;

use formulary_contracts::medication::{MedicationRecord, Status};

use crate::facet::Facet;

/// The three independent facets of the medication listing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterFacets {
    pub status: Facet<Status>,
    pub primary_code: Facet<String>,
    pub secondary_label: Facet<String>,
}

impl FilterFacets {
    /// No restriction on any facet.
    pub fn all() -> Self {
        Self::default()
    }

    /// Build facets from raw dropdown values.
    ///
    /// `sentinel` and empty strings mean "no restriction" for that facet.
    pub fn from_raw(status: &str, primary_code: &str, secondary_label: &str, sentinel: &str) -> Self {
        Self {
            status: Facet::parse_status(status, sentinel),
            primary_code: Facet::parse(primary_code, sentinel),
            secondary_label: Facet::parse(secondary_label, sentinel),
        }
    }

    /// Return true if `record` passes every active facet.
    pub fn matches(&self, record: &MedicationRecord) -> bool {
        let status_ok = self.status.allows(|wanted| record.status == *wanted);

        let primary_ok = self
            .primary_code
            .allows(|wanted| record.leaf_code() == Some(wanted.as_str()));

        let secondary_ok = self.secondary_label.allows(|wanted| {
            record
                .secondary_category
                .as_deref()
                .is_some_and(|compound| compound.contains(wanted.as_str()))
        });

        status_ok && primary_ok && secondary_ok
    }

    /// Number of facets that restrict the result.
    pub fn active_count(&self) -> usize {
        [
            !self.status.is_all(),
            !self.primary_code.is_all(),
            !self.secondary_label.is_all(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }
}

/// Compose the three facets into one predicate over medication records.
///
/// Total: never fails, for any combination of facet values.
pub fn build_predicate(
    status: Facet<Status>,
    primary_code: Facet<String>,
    secondary_label: Facet<String>,
) -> impl Fn(&MedicationRecord) -> bool {
    let facets = FilterFacets {
        status,
        primary_code,
        secondary_label,
    };
    move |record| facets.matches(record)
}

/// Apply `facets` to the full snapshot, preserving snapshot order.
pub fn filter_view<'a>(
    records: &'a [MedicationRecord],
    facets: &FilterFacets,
) -> Vec<&'a MedicationRecord> {
    let matched: Vec<&MedicationRecord> =
        records.iter().filter(|record| facets.matches(record)).collect();

    debug!(
        total = records.len(),
        matched = matched.len(),
        active_facets = facets.active_count(),
        "filter applied"
    );

    matched
}
