//! # formulary-dashboard
//!
//! Session-level dashboard operations for the formulary engine.
//!
//! A [`DashboardSession`] wires the filter engine, the confidence resolver,
//! the category aggregator and the narrative normalizer over three lazily
//! loaded resources served by any `ResourceStore`:
//!
//! 1. **Medication snapshot**: loaded on first use; every listing operation
//!    depends on it.
//! 2. **Full-detail map**: loaded on the first detail request.
//! 3. **Category-report map**: loaded on the first category request; when
//!    unavailable, category drill-downs fall back to the plain list.
//!
//! Configuration comes from TOML ([`DashboardConfig`]). [`fixtures`] holds
//! fictional resource bodies used by the demo scenarios and tests.

pub mod config;
pub mod fixtures;
pub mod scenarios;
pub mod session;

pub use config::DashboardConfig;
pub use session::{DashboardSession, FilterOptions};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use formulary_classify::{CategoryDrilldown, CodeTone, ConfidenceLevel, FallbackReason};
    use formulary_contracts::{
        error::FormularyError,
        medication::Status,
        resource::ResourceKind,
    };
    use formulary_core::SlotState;
    use formulary_store::{fingerprint, InMemoryStore};

    use super::*;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn session() -> (DashboardSession<InMemoryStore>, InMemoryStore) {
        let store = fixtures::fixture_store();
        (DashboardSession::with_defaults(store.clone()), store)
    }

    fn ids(records: &[&formulary_contracts::medication::MedicationRecord]) -> Vec<i64> {
        records.iter().map(|r| r.id).collect()
    }

    // ── 1. Lazy loading ───────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_snapshot_is_fetched_once_per_session() {
        let (session, store) = session();

        session.filter_view("all", "all", "all").await.unwrap();
        session.filter_view("ALLOWED", "all", "all").await.unwrap();
        session.category_drilldown("N02BE").await.unwrap();

        assert_eq!(store.fetch_count(ResourceKind::Medications), 1);
        assert_eq!(store.fetch_count(ResourceKind::CategoryReports), 1);
        assert_eq!(store.fetch_count(ResourceKind::Details), 0, "details stay unloaded");
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_one_fetch() {
        let store = fixtures::fixture_store().with_latency(Duration::from_millis(20));
        let session = DashboardSession::with_defaults(store.clone());

        let probe = async {
            tokio::task::yield_now().await;
            session.resource_status()[0].state
        };
        let (first, second, observed) = tokio::join!(
            session.category_drilldown("N02BE"),
            session.category_drilldown("B03AA"),
            probe,
        );

        assert_eq!(observed, SlotState::InFlight);
        assert_eq!(first.unwrap().medication_count(), 3);
        assert_eq!(second.unwrap().medication_count(), 1);
        assert_eq!(store.fetch_count(ResourceKind::Medications), 1);
        assert_eq!(store.fetch_count(ResourceKind::CategoryReports), 1);
    }

    #[tokio::test]
    async fn test_resource_status_reports_fingerprint_and_entries() {
        let (session, _store) = session();
        assert!(session
            .resource_status()
            .iter()
            .all(|s| s.state == SlotState::Empty && s.fingerprint.is_none()));

        session.load_medications().await.unwrap();

        let status = session.resource_status();
        let body = serde_json::to_vec(&fixtures::medications()).unwrap();
        assert_eq!(status[0].resource, ResourceKind::Medications);
        assert_eq!(status[0].state, SlotState::Ready);
        assert_eq!(status[0].entries, Some(9));
        assert_eq!(status[0].fingerprint.as_deref(), Some(fingerprint(&body).as_str()));
        assert_eq!(status[1].state, SlotState::Empty);
        assert_eq!(status[2].state, SlotState::Empty);
    }

    // ── 2. Failure handling ───────────────────────────────────────────────────

    #[tokio::test]
    async fn test_snapshot_failure_is_fatal_to_listing_views() {
        let store = InMemoryStore::new();
        let session = DashboardSession::with_defaults(store);

        match session.filter_view("all", "all", "all").await {
            Err(FormularyError::ResourceUnavailable { resource, .. }) => {
                assert_eq!(resource, ResourceKind::Medications);
            }
            other => panic!("expected ResourceUnavailable, got {:?}", other),
        }
        assert!(session.category_drilldown("N02BE").await.is_err());
    }

    #[tokio::test]
    async fn test_detail_failure_is_retried_and_leaves_session_usable() {
        let (session, store) = session();
        store.fail(ResourceKind::Details, "status 503");

        let err = session.medication_detail(101).await.unwrap_err();
        assert!(matches!(err, FormularyError::ResourceUnavailable { .. }));
        assert_eq!(session.resource_status()[1].state, SlotState::Empty);

        // The rest of the session is unaffected.
        assert_eq!(session.filter_view("all", "all", "all").await.unwrap().len(), 9);

        store.clear_failure(ResourceKind::Details);
        let detail = session.medication_detail(101).await.unwrap();
        assert_eq!(detail.name, "Paracetamol");
        assert_eq!(store.fetch_count(ResourceKind::Details), 2);
    }

    #[tokio::test]
    async fn test_unknown_medication_id_is_not_found() {
        let (session, _store) = session();
        match session.medication_detail(999).await {
            Err(FormularyError::RecordNotFound { kind, key }) => {
                assert_eq!(kind, "medication");
                assert_eq!(key, "999");
            }
            other => panic!("expected RecordNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_unavailable() {
        let store = InMemoryStore::new().with_body(ResourceKind::Medications, "{\"not\": \"an array\"}");
        let session = DashboardSession::with_defaults(store);

        match session.load_medications().await {
            Err(FormularyError::ResourceUnavailable { resource, reason }) => {
                assert_eq!(resource, ResourceKind::Medications);
                assert!(reason.starts_with("malformed"), "reason: {reason}");
            }
            other => panic!("expected ResourceUnavailable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_reports_failure_degrades_drilldown_to_list() {
        let (session, store) = session();
        store.fail(ResourceKind::CategoryReports, "timeout");

        let drilldown = session.category_drilldown("N02BE").await.unwrap();
        match drilldown {
            CategoryDrilldown::MedicationList {
                leaf_name,
                medication_count,
                reason,
                ..
            } => {
                assert_eq!(leaf_name, "Anilides");
                assert_eq!(medication_count, 3);
                assert_eq!(reason, FallbackReason::ReportsUnavailable);
            }
            other => panic!("expected MedicationList, got {:?}", other),
        }
        assert!(session.category_view().await.is_err());
        assert!(session.category_report("N02BE").await.is_err());
    }

    // ── 3. Filtering ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_filter_view_conjunction() {
        let (session, _store) = session();

        let allowed = session.filter_view("ALLOWED", "all", "all").await.unwrap();
        assert_eq!(ids(&allowed), vec![101, 103, 201, 401]);

        let allowed_anilides = session.filter_view("ALLOWED", "N02BE", "all").await.unwrap();
        assert_eq!(ids(&allowed_anilides), vec![101, 103]);

        let none = session.filter_view("DISCONTINUED", "N02BE", "").await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_secondary_facet_matches_by_containment() {
        let (session, _store) = session();
        let matched = session
            .filter_view("all", "all", "Anti-inflammatory Agents")
            .await
            .unwrap();
        assert_eq!(ids(&matched), vec![201, 202]);
    }

    #[tokio::test]
    async fn test_configured_sentinel_is_honoured() {
        let config = DashboardConfig::from_toml_str("[filters]\nall_sentinel = \"*\"").unwrap();
        let session = DashboardSession::new(fixtures::fixture_store(), config);

        assert_eq!(session.filter_view("*", "*", "*").await.unwrap().len(), 9);
        // "all" is now an ordinary value that matches no status.
        assert!(session.filter_view("all", "*", "*").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_filter_options() {
        let (session, _store) = session();
        let options = session.filter_options().await.unwrap();

        let primary: Vec<&str> = options.primary.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(primary, vec!["A11CC", "B03AA", "M01AE", "N02BE"]);
        assert_eq!(options.primary[3].label, "N02BE - Anilides");
        assert!(options.secondary.iter().any(|o| o.value == "Protectants"));
    }

    // ── 4. Categories ─────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_category_view_counts_live_records() {
        let (session, _store) = session();
        let views = session.category_view().await.unwrap();

        let count = |code: &str| {
            views
                .iter()
                .find(|v| v.report.leaf_code == code)
                .map(|v| v.medication_count)
        };
        assert_eq!(views.len(), 4);
        assert_eq!(count("N02BE"), Some(3), "live count, not the stored count of 2");
        assert_eq!(count("M01AE"), Some(2));
        assert_eq!(count("R05CB"), Some(0));
    }

    #[tokio::test]
    async fn test_category_drilldown_report_groups_by_status() {
        let (session, _store) = session();
        let drilldown = session.category_drilldown("N02BE").await.unwrap();

        assert!(!drilldown.is_fallback());
        let groups = drilldown.groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].status, Status::Allowed);
        let names: Vec<&str> = groups[0].records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Acetaminophen with caffeine", "Paracetamol"]);
        assert_eq!(groups[1].status, Status::TargetForModernization);
    }

    #[tokio::test]
    async fn test_category_drilldown_fallbacks() {
        let (session, _store) = session();

        match session.category_drilldown("M01AE").await.unwrap() {
            CategoryDrilldown::MedicationList { reason, groups, .. } => {
                assert_eq!(reason, FallbackReason::MissingNarrative);
                let statuses: Vec<&Status> = groups.iter().map(|g| &g.status).collect();
                assert_eq!(statuses, vec![&Status::Allowed, &Status::NotAllowed]);
            }
            other => panic!("expected MedicationList, got {:?}", other),
        }

        match session.category_drilldown("A11CC").await.unwrap() {
            CategoryDrilldown::MedicationList {
                leaf_name,
                medication_count,
                reason,
                ..
            } => {
                assert_eq!(reason, FallbackReason::MissingReport);
                assert_eq!(leaf_name, "Vitamin D and analogues");
                assert_eq!(medication_count, 1);
            }
            other => panic!("expected MedicationList, got {:?}", other),
        }

        assert!(session.category_report("A11CC").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_secondary_drilldown_keeps_needs_review_group() {
        let (session, _store) = session();
        let drilldown = session.secondary_drilldown("84:24.12 - Protectants").await.unwrap();

        assert_eq!(drilldown.label, "Protectants");
        assert_eq!(drilldown.medication_count, 2);
        assert_eq!(drilldown.groups.len(), 1);
        assert_eq!(drilldown.groups[0].status, Status::NeedsReview);
        let names: Vec<&str> = drilldown.groups[0].records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["aloe vera gel", "Zinc oxide paste"]);
    }

    // ── 5. Confidence ─────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_confidence_for_snapshot_records() {
        let (session, _store) = session();
        let records = session.load_medications().await.unwrap();
        let by_id = |id: i64| records.iter().find(|r| r.id == id).unwrap();

        let exact = session.confidence(by_id(101));
        assert_eq!(exact.level, ConfidenceLevel::High);
        assert!(!exact.is_annotated());

        let approximation = session.confidence(by_id(202));
        assert_eq!(approximation.level, ConfidenceLevel::Low);
        assert_eq!(approximation.tone, CodeTone::Approximation);

        let unknown = session.confidence(by_id(401));
        assert_eq!(unknown.level, ConfidenceLevel::Unknown);
        assert!(unknown.explanation.unwrap().contains("provisional"));

        let summary = session.mapping_summary(by_id(103)).unwrap();
        assert_eq!(summary.related_codes, vec!["N02BE51", "N06BC01"]);
        assert!(session.mapping_summary(by_id(301)).is_none());
    }

    #[tokio::test]
    async fn test_mapping_summary_levels_over_snapshot() {
        let (session, _store) = session();
        let records = session.load_medications().await.unwrap();
        let levels: Vec<ConfidenceLevel> = records
            .iter()
            .filter_map(|r| session.mapping_summary(r))
            .map(|summary| summary.level)
            .collect();
        let count = |level: ConfidenceLevel| levels.iter().filter(|l| **l == level).count();

        // 101 exact and 201 corrected; 102 name variant and 103 combination.
        assert_eq!(count(ConfidenceLevel::High), 2);
        assert_eq!(count(ConfidenceLevel::Medium), 2);
        assert_eq!(count(ConfidenceLevel::Low), 1);
        assert_eq!(count(ConfidenceLevel::None), 1);
        assert_eq!(count(ConfidenceLevel::Unknown), 1);
    }

    // ── 6. Narratives ─────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_medication_narrative_is_consolidated() {
        let (session, _store) = session();
        let prepared = session.medication_narrative(101).await.unwrap().unwrap();

        let checklist = prepared.checklist.unwrap();
        let items: Vec<(bool, &str)> = checklist
            .items
            .iter()
            .map(|i| (i.checked, i.label.as_str()))
            .collect();
        assert_eq!(
            items,
            vec![
                (true, "Mechanistic studies"),
                (false, "Traditional use"),
                (true, "Clinical trials"),
            ]
        );
        let markup = prepared.document.to_markup();
        assert!(markup.contains("evidence-categories-box"));
        assert!(markup.ends_with("<p>Reviewed by the formulary committee.</p>"));
    }

    #[tokio::test]
    async fn test_blank_narratives_prepare_to_none() {
        let (session, _store) = session();
        assert!(session.medication_narrative(201).await.unwrap().is_none());
        assert!(session.category_narrative("M01AE").await.unwrap().is_none());
        assert!(session
            .category_narrative("Z99ZZ")
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn test_category_narrative_spans_paragraphs() {
        let (session, _store) = session();
        let prepared = session.category_narrative("N02BE").await.unwrap().unwrap();

        let checklist = prepared.checklist.unwrap();
        assert_eq!(checklist.items.len(), 3);
        assert_eq!(checklist.checked_count(), 2);
        assert_eq!(prepared.document.blocks.len(), 4);
    }

    #[test]
    fn test_normalize_for_display_splits_run_on_headings() {
        let session = DashboardSession::with_defaults(InMemoryStore::new());
        assert_eq!(
            session.normalize_for_display("# Title ## Section\nBody"),
            "# Title\n\n## Section\n\nBody"
        );
    }

    #[test]
    fn test_configured_marker_drives_consolidation() {
        let config = DashboardConfig::from_toml_str("[narrative]\nchecklist_marker = \"Evidence:\"").unwrap();
        let session = DashboardSession::new(InMemoryStore::new(), config);

        let prepared = session.prepare_narrative("Evidence: ☑ Trials ☐ Folklore\n\nAfter.");
        assert_eq!(prepared.checklist.unwrap().items.len(), 2);

        let ignored = session.prepare_narrative("Evidence Categories Present: ☑ Trials");
        assert!(ignored.checklist.is_none());
    }

    // ── 7. Configuration ──────────────────────────────────────────────────────

    #[test]
    fn test_embedded_config_matches_defaults() {
        assert_eq!(DashboardConfig::embedded().unwrap(), DashboardConfig::default());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = DashboardConfig::from_toml_str("[resources]\ndetails = \"full.json\"").unwrap();
        assert_eq!(config.resources.details, "full.json");
        assert_eq!(config.resources.medications, "medications-summary.json");
        assert_eq!(config.filters.all_sentinel, "all");
    }

    #[test]
    fn test_config_errors() {
        match DashboardConfig::from_toml_str("[resources\n") {
            Err(FormularyError::ConfigError { reason }) => {
                assert!(reason.starts_with("failed to parse dashboard TOML"));
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }

        let empty_marker = DashboardConfig::from_toml_str("[narrative]\nchecklist_marker = \" \"");
        assert!(matches!(empty_marker, Err(FormularyError::ConfigError { .. })));

        let missing = DashboardConfig::from_file(std::path::Path::new("/nonexistent/dashboard.toml"));
        match missing {
            Err(FormularyError::ConfigError { reason }) => {
                assert!(reason.starts_with("failed to read dashboard config file"));
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_directory_store_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let write = |name: &str, value: serde_json::Value| {
            std::fs::write(dir.path().join(name), serde_json::to_vec(&value).unwrap()).unwrap();
        };
        write("meds.json", fixtures::medications());
        write("details.json", fixtures::details());
        write("reports.json", fixtures::category_reports());

        let config_path = dir.path().join("dashboard.toml");
        std::fs::write(
            &config_path,
            "[resources]\nmedications = \"meds.json\"\ndetails = \"details.json\"\ncategory_reports = \"reports.json\"\n",
        )
        .unwrap();

        let config = DashboardConfig::from_file(&config_path).unwrap();
        let store = config.directory_store(dir.path());
        let session = DashboardSession::new(store, config);

        assert_eq!(session.load_medications().await.unwrap().len(), 9);
        assert_eq!(session.medication_detail(501).await.unwrap().name, "Zinc oxide paste");
        assert!(session.category_report("B03AA").await.unwrap().is_some());
    }
}
