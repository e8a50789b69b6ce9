//! `DashboardSession`: the consumer-facing dashboard operations over one
//! session's lazily loaded resources.
//!
//! A session owns a `ResourceStore` and one `ResourceSlot` per resource. The
//! medication snapshot is loaded on the first operation that needs records;
//! the detail map and the category-report map are loaded on the first detail
//! or category request. Each resource is fetched at most once per session
//! once a fetch has succeeded.
//!
//! Failure handling per resource:
//!
//! - Medication snapshot: every operation that needs records returns the
//!   `ResourceUnavailable` error.
//! - Detail map: `medication_detail` returns the error; nothing else is
//!   affected.
//! - Category-report map: `category_report` and `category_view` return the
//!   error, while `category_drilldown` degrades to the plain medication list.

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use formulary_classify::{
    aggregate, category_drilldown, mapping_summary, resolve, secondary_drilldown, CategoryDrilldown,
    CategoryView, Confidence, MappingSummary, SecondaryDrilldown,
};
use formulary_contracts::{
    category::{CategoryReport, CategoryReportMap},
    detail::{DetailMap, MedicationDetail},
    error::{FormularyError, FormularyResult},
    medication::MedicationRecord,
    resource::{ResourceKind, SessionId},
};
use formulary_core::{
    traits::{ContentTree, EvidenceChecklist, ResourceStore},
    Loaded, ResourceSlot, SlotStatus,
};
use formulary_filter::{
    filter_view, primary_filter_options, secondary_filter_options, FilterFacets, FilterOption,
};
use formulary_narrative::{
    consolidate_checklists, prepare_narrative, repair_structure, BlockRenderer, PreparedNarrative,
    RenderedDocument,
};

use crate::config::DashboardConfig;

/// Options for the primary and secondary filter dropdowns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptions {
    pub primary: Vec<FilterOption>,
    pub secondary: Vec<FilterOption>,
}

/// One dashboard session over a `ResourceStore`.
pub struct DashboardSession<S: ResourceStore> {
    id: SessionId,
    store: S,
    config: DashboardConfig,
    medications: ResourceSlot<Vec<MedicationRecord>>,
    details: ResourceSlot<DetailMap>,
    reports: ResourceSlot<CategoryReportMap>,
}

impl<S: ResourceStore> DashboardSession<S> {
    pub fn new(store: S, config: DashboardConfig) -> Self {
        let id = SessionId::new();
        info!(session_id = %id, "dashboard session started");
        Self {
            id,
            store,
            config,
            medications: ResourceSlot::new(ResourceKind::Medications),
            details: ResourceSlot::new(ResourceKind::Details),
            reports: ResourceSlot::new(ResourceKind::CategoryReports),
        }
    }

    /// A session using the default configuration.
    pub fn with_defaults(store: S) -> Self {
        Self::new(store, DashboardConfig::default())
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ── Resource loading ──────────────────────────────────────────────────────

    /// Fetch, decode and memoize the resource behind `slot`.
    async fn load<'a, T, F>(&'a self, slot: &'a ResourceSlot<T>, entries: F) -> FormularyResult<&'a Loaded<T>>
    where
        T: DeserializeOwned,
        F: FnOnce(&T) -> usize,
    {
        let kind = slot.kind();
        slot.get_or_load(|| async move {
            let fetched = self.store.fetch(kind).await.inspect_err(|e| {
                warn!(session_id = %self.id, resource = %kind, error = %e, "resource fetch failed");
            })?;

            let value: T = serde_json::from_slice(&fetched.body).map_err(|e| {
                warn!(session_id = %self.id, resource = %kind, error = %e, "resource body rejected");
                FormularyError::ResourceUnavailable {
                    resource: kind,
                    reason: format!("malformed {} body: {}", kind, e),
                }
            })?;

            let entries = entries(&value);
            info!(
                session_id = %self.id,
                resource = %kind,
                entries,
                fingerprint = %fetched.fingerprint,
                "resource loaded"
            );

            Ok(Loaded {
                value,
                entries,
                fingerprint: fetched.fingerprint,
                fetched_at: fetched.fetched_at,
            })
        })
        .await
    }

    /// The medication snapshot. A failure here is fatal to every listing view.
    pub async fn load_medications(&self) -> FormularyResult<&[MedicationRecord]> {
        let loaded = self.load(&self.medications, Vec::len).await?;
        Ok(&loaded.value)
    }

    async fn load_details(&self) -> FormularyResult<&DetailMap> {
        Ok(&self.load(&self.details, |map: &DetailMap| map.len()).await?.value)
    }

    async fn load_reports(&self) -> FormularyResult<&CategoryReportMap> {
        Ok(&self.load(&self.reports, |map: &CategoryReportMap| map.len()).await?.value)
    }

    /// State of every resource slot, in load order.
    pub fn resource_status(&self) -> Vec<SlotStatus> {
        vec![
            self.medications.status(),
            self.details.status(),
            self.reports.status(),
        ]
    }

    // ── Lookups ───────────────────────────────────────────────────────────────

    /// Full detail for one medication.
    ///
    /// Returns `RecordNotFound` when the loaded detail map has no entry for
    /// `id`, and `ResourceUnavailable` when the map cannot be loaded.
    pub async fn medication_detail(&self, id: i64) -> FormularyResult<&MedicationDetail> {
        let details = self.load_details().await?;
        details.get(&id.to_string()).ok_or_else(|| {
            warn!(session_id = %self.id, medication_id = id, "medication detail not found");
            FormularyError::medication_not_found(id)
        })
    }

    /// The category report keyed by `leaf_code`, if one exists.
    pub async fn category_report(&self, leaf_code: &str) -> FormularyResult<Option<&CategoryReport>> {
        Ok(self.load_reports().await?.get(leaf_code))
    }

    // ── Filtering ─────────────────────────────────────────────────────────────

    /// Records matching all three raw facet values, in snapshot order.
    ///
    /// Each facet is either the configured all-sentinel (or empty) or the
    /// value to match.
    pub async fn filter_view(
        &self,
        status: &str,
        primary_code: &str,
        secondary_label: &str,
    ) -> FormularyResult<Vec<&MedicationRecord>> {
        let records = self.load_medications().await?;
        let facets = FilterFacets::from_raw(
            status,
            primary_code,
            secondary_label,
            &self.config.filters.all_sentinel,
        );
        Ok(filter_view(records, &facets))
    }

    pub async fn filter_options(&self) -> FormularyResult<FilterOptions> {
        let records = self.load_medications().await?;
        Ok(FilterOptions {
            primary: primary_filter_options(records),
            secondary: secondary_filter_options(records),
        })
    }

    // ── Categories ────────────────────────────────────────────────────────────

    /// Every category report with its live medication count.
    pub async fn category_view(&self) -> FormularyResult<Vec<CategoryView<'_>>> {
        let records = self.load_medications().await?;
        let reports = self.load_reports().await?;
        Ok(aggregate(records, reports))
    }

    /// Drill into one primary-taxonomy leaf.
    ///
    /// Only a snapshot failure is an error. A missing report, a report without
    /// narrative, or a failed report fetch all yield the medication list.
    pub async fn category_drilldown(&self, leaf_code: &str) -> FormularyResult<CategoryDrilldown<'_>> {
        let records = self.load_medications().await?;
        let reports = self.load_reports().await.ok();
        Ok(category_drilldown(leaf_code, records, reports))
    }

    /// Drill into one secondary-taxonomy category.
    pub async fn secondary_drilldown(&self, category: &str) -> FormularyResult<SecondaryDrilldown<'_>> {
        let records = self.load_medications().await?;
        Ok(secondary_drilldown(category, records))
    }

    // ── Classification confidence ─────────────────────────────────────────────

    pub fn confidence(&self, record: &MedicationRecord) -> Confidence {
        resolve(&record.mapping_type, record.mapping_notes.as_deref())
    }

    pub fn mapping_summary(&self, record: &MedicationRecord) -> Option<MappingSummary> {
        mapping_summary(&record.mapping_type, record.mapping_notes.as_deref())
    }

    // ── Narratives ────────────────────────────────────────────────────────────

    /// Structural repair of a raw narrative, ready for a renderer.
    pub fn normalize_for_display(&self, raw: &str) -> String {
        repair_structure(raw)
    }

    /// Consolidate the evidence checklist in an already rendered tree.
    pub fn consolidate_checklists<T: ContentTree>(&self, tree: &mut T) -> Option<EvidenceChecklist> {
        consolidate_checklists(tree, &self.config.narrative.checklist_marker)
    }

    /// Repair, render and consolidate a raw narrative.
    pub fn prepare_narrative(&self, raw: &str) -> PreparedNarrative<RenderedDocument> {
        prepare_narrative(raw, &BlockRenderer, &self.config.narrative.checklist_marker)
    }

    /// The prepared research narrative of one medication, if it has one.
    pub async fn medication_narrative(
        &self,
        id: i64,
    ) -> FormularyResult<Option<PreparedNarrative<RenderedDocument>>> {
        let detail = self.medication_detail(id).await?;
        Ok(detail
            .full_report
            .as_deref()
            .filter(|_| detail.has_narrative())
            .map(|raw| self.prepare_narrative(raw)))
    }

    /// The prepared narrative of one category report, if it has one.
    pub async fn category_narrative(
        &self,
        leaf_code: &str,
    ) -> FormularyResult<Option<PreparedNarrative<RenderedDocument>>> {
        let report = self.load_reports().await?.get(leaf_code).ok_or_else(|| {
            FormularyError::category_not_found(leaf_code)
        })?;
        Ok(report
            .full_report
            .as_deref()
            .filter(|_| report.has_narrative())
            .map(|raw| self.prepare_narrative(raw)))
    }
}
