//! Category aggregation and status grouping.
//!
//! Records reference category reports by primary-taxonomy leaf code. Either
//! side may exist without the other, so every drill-down here degrades to a
//! plain grouped medication list instead of failing.
//!
//! Grouping rule, used by every view:
//!
//! 1. Groups follow `Status::DISPLAY_ORDER`; statuses with no records are
//!    omitted. Statuses outside that order follow it, ordered by tag.
//! 2. Within a group, records sort by name ignoring case and diacritics
//!    (`Ésomeprazole` sorts with `esomeprazole`), ties broken by the
//!    lowercased name, then plain string order, then id.

use std::{cmp::Ordering, collections::{BTreeMap, HashMap}};

use serde::Serialize;
use tracing::{debug, warn};
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use formulary_contracts::{
    category::{CategoryReport, CategoryReportMap},
    medication::{MedicationRecord, SecondaryCategory, Status},
};
use formulary_filter::{filter_view, Facet, FilterFacets};

// ── Views ────────────────────────────────────────────────────────────────────

/// A category report enriched with the live medication count.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryView<'a> {
    pub report: &'a CategoryReport,
    /// Records in the snapshot whose leaf code equals the report's.
    pub medication_count: usize,
}

/// All records of one status, in display order.
#[derive(Debug, Clone, Serialize)]
pub struct StatusGroup<'a> {
    pub status: Status,
    pub records: Vec<&'a MedicationRecord>,
}

/// Why a category drill-down fell back to the plain list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// No report is keyed by this leaf code.
    MissingReport,
    /// A report exists but has no narrative text.
    MissingNarrative,
    /// The report resource could not be loaded.
    ReportsUnavailable,
}

/// The result of drilling into one primary-taxonomy leaf.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CategoryDrilldown<'a> {
    Report {
        view: CategoryView<'a>,
        groups: Vec<StatusGroup<'a>>,
    },
    MedicationList {
        leaf_code: String,
        leaf_name: String,
        medication_count: usize,
        groups: Vec<StatusGroup<'a>>,
        reason: FallbackReason,
    },
}

impl CategoryDrilldown<'_> {
    pub fn groups(&self) -> &[StatusGroup<'_>] {
        match self {
            CategoryDrilldown::Report { groups, .. } => groups,
            CategoryDrilldown::MedicationList { groups, .. } => groups,
        }
    }

    pub fn medication_count(&self) -> usize {
        match self {
            CategoryDrilldown::Report { view, .. } => view.medication_count,
            CategoryDrilldown::MedicationList { medication_count, .. } => *medication_count,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, CategoryDrilldown::MedicationList { .. })
    }
}

/// The result of drilling into one secondary-taxonomy category.
#[derive(Debug, Clone, Serialize)]
pub struct SecondaryDrilldown<'a> {
    /// The bare category name matched by containment.
    pub label: String,
    pub medication_count: usize,
    pub groups: Vec<StatusGroup<'a>>,
}

// ── Aggregation ──────────────────────────────────────────────────────────────

/// Enrich every report with its medication count, in leaf-code order.
pub fn aggregate<'a>(
    records: &[MedicationRecord],
    reports: &'a CategoryReportMap,
) -> Vec<CategoryView<'a>> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for code in records.iter().filter_map(MedicationRecord::leaf_code) {
        *counts.entry(code).or_default() += 1;
    }

    let views: Vec<CategoryView<'a>> = reports
        .values()
        .map(|report| CategoryView {
            report,
            medication_count: counts.get(report.leaf_code.as_str()).copied().unwrap_or(0),
        })
        .collect();

    debug!(
        categories = views.len(),
        records = records.len(),
        "category view aggregated"
    );
    views
}

/// Group `records` by status using the display rule in the module docs.
pub fn group_by_status<'a, I>(records: I) -> Vec<StatusGroup<'a>>
where
    I: IntoIterator<Item = &'a MedicationRecord>,
{
    let mut by_status: BTreeMap<(usize, String), StatusGroup<'a>> = BTreeMap::new();
    for record in records {
        let rank = record
            .status
            .display_rank()
            .unwrap_or(Status::DISPLAY_ORDER.len());
        by_status
            .entry((rank, record.status.as_tag().to_string()))
            .or_insert_with(|| StatusGroup {
                status: record.status.clone(),
                records: Vec::new(),
            })
            .records
            .push(record);
    }

    by_status
        .into_values()
        .map(|mut group| {
            group.records.sort_by(|a, b| compare_names(a, b));
            group
        })
        .collect()
}

fn compare_names(a: &MedicationRecord, b: &MedicationRecord) -> Ordering {
    collation_key(&a.name)
        .cmp(&collation_key(&b.name))
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}

/// Primary sort key for a name: NFKD with combining marks dropped, lowercased.
pub fn collation_key(name: &str) -> String {
    name.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

// ── Drill-downs ──────────────────────────────────────────────────────────────

/// Drill into one leaf code.
///
/// Returns the report view when a report with narrative text exists;
/// otherwise the plain list built from the records carrying `leaf_code`.
/// Pass `reports = None` when the report resource failed to load.
pub fn category_drilldown<'a>(
    leaf_code: &str,
    records: &'a [MedicationRecord],
    reports: Option<&'a CategoryReportMap>,
) -> CategoryDrilldown<'a> {
    let members: Vec<&'a MedicationRecord> = records
        .iter()
        .filter(|r| r.leaf_code() == Some(leaf_code))
        .collect();

    let report = reports.and_then(|map| map.get(leaf_code));
    let reason = match (reports, report) {
        (Some(_), Some(report)) if report.has_narrative() => {
            return CategoryDrilldown::Report {
                view: CategoryView {
                    report,
                    medication_count: members.len(),
                },
                groups: group_by_status(members),
            };
        }
        (Some(_), Some(_)) => FallbackReason::MissingNarrative,
        (Some(_), None) => FallbackReason::MissingReport,
        (None, _) => FallbackReason::ReportsUnavailable,
    };

    warn!(
        leaf_code = %leaf_code,
        reason = ?reason,
        medications = members.len(),
        "category report unavailable; falling back to medication list"
    );

    let leaf_name = report
        .map(|r| r.leaf_name.clone())
        .or_else(|| members.iter().find_map(|r| r.leaf_name().map(str::to_string)))
        .unwrap_or_default();

    CategoryDrilldown::MedicationList {
        leaf_code: leaf_code.to_string(),
        leaf_name,
        medication_count: members.len(),
        groups: group_by_status(members),
        reason,
    }
}

/// Drill into one secondary-taxonomy category.
///
/// `category` may be the compound `"<code> - <name>"` string or the bare
/// name; either way the bare name is matched by containment, exactly as the
/// secondary filter facet does.
pub fn secondary_drilldown<'a>(category: &str, records: &'a [MedicationRecord]) -> SecondaryDrilldown<'a> {
    let label = SecondaryCategory::parse(category).name;
    let facets = FilterFacets {
        secondary_label: Facet::Only(label.clone()),
        ..FilterFacets::all()
    };
    let members = filter_view(records, &facets);

    SecondaryDrilldown {
        label,
        medication_count: members.len(),
        groups: group_by_status(members),
    }
}
