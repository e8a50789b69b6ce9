//! # formulary-store
//!
//! `ResourceStore` implementations for the formulary dashboard engine.
//!
//! ## Overview
//!
//! A store performs one plain fetch per call and returns the raw body with a
//! SHA-256 fingerprint and a fetch timestamp. Stores never cache and never
//! decode; the session's resource slots own both concerns.
//!
//! - [`InMemoryStore`] serves registered bodies, counts fetches, and can
//!   inject latency and failures.
//! - [`DirectoryStore`] reads one JSON file per resource from a directory.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use formulary_store::DirectoryStore;
//! use formulary_core::traits::ResourceStore;
//!
//! let store = DirectoryStore::new("data/");
//! let resource = store.fetch(ResourceKind::Medications).await?;
//! println!("{}", resource.fingerprint);
//! ```

pub mod fingerprint;
pub mod fs;
pub mod memory;

pub use fingerprint::{fetched, fingerprint, verify_fingerprint};
pub use fs::DirectoryStore;
pub use memory::InMemoryStore;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use serde_json::json;

    use formulary_contracts::{error::FormularyError, resource::ResourceKind};
    use formulary_core::traits::ResourceStore;

    use super::{fetched, fingerprint, verify_fingerprint, DirectoryStore, InMemoryStore};

    // ── Fingerprints ──────────────────────────────────────────────────────────

    /// Known SHA-256 test vector.
    #[test]
    fn test_fingerprint_known_vector() {
        assert_eq!(
            fingerprint(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    /// Mutating the body after fetching is detected.
    #[test]
    fn test_fingerprint_detects_body_change() {
        let mut resource = fetched(ResourceKind::Medications, b"[]".to_vec());
        assert!(verify_fingerprint(&resource));
        resource.body = b"[{}]".to_vec();
        assert!(!verify_fingerprint(&resource));
    }

    // ── InMemoryStore ─────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_memory_store_serves_body_and_counts_fetches() {
        let store = InMemoryStore::new().with_json(ResourceKind::Medications, &json!([{"id": 1}]));

        let first = store.fetch(ResourceKind::Medications).await.unwrap();
        let second = store.fetch(ResourceKind::Medications).await.unwrap();

        assert_eq!(first.kind, ResourceKind::Medications);
        assert_eq!(first.body, br#"[{"id":1}]"#.to_vec());
        assert_eq!(first.fingerprint, second.fingerprint, "identical bodies fingerprint identically");
        assert_eq!(store.fetch_count(ResourceKind::Medications), 2);
        assert_eq!(store.fetch_count(ResourceKind::Details), 0);
    }

    #[tokio::test]
    async fn test_memory_store_missing_body_is_unavailable() {
        let store = InMemoryStore::new();
        match store.fetch(ResourceKind::CategoryReports).await {
            Err(FormularyError::ResourceUnavailable { resource, reason }) => {
                assert_eq!(resource, ResourceKind::CategoryReports);
                assert!(reason.contains("404"));
            }
            other => panic!("expected ResourceUnavailable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_memory_store_injected_failure_can_be_cleared() {
        let store = InMemoryStore::new().with_body(ResourceKind::Details, "{}");
        store.fail(ResourceKind::Details, "connection reset");

        let err = store.fetch(ResourceKind::Details).await.unwrap_err();
        assert!(err.to_string().contains("connection reset"));

        store.clear_failure(ResourceKind::Details);
        assert!(store.fetch(ResourceKind::Details).await.is_ok());
        assert_eq!(store.fetch_count(ResourceKind::Details), 2);
    }

    #[tokio::test]
    async fn test_memory_store_latency_delays_fetch() {
        let store = InMemoryStore::new()
            .with_body(ResourceKind::Medications, "[]")
            .with_latency(Duration::from_millis(25));

        let started = Instant::now();
        store.fetch(ResourceKind::Medications).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(25));
    }

    #[tokio::test]
    async fn test_memory_store_clones_share_counts() {
        let store = InMemoryStore::new().with_body(ResourceKind::Medications, "[]");
        let handle = store.clone();
        store.fetch(ResourceKind::Medications).await.unwrap();
        assert_eq!(handle.fetch_count(ResourceKind::Medications), 1);
    }

    // ── DirectoryStore ────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_directory_store_reads_default_file_names() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("medications-summary.json"), "[]").unwrap();
        std::fs::write(dir.path().join("who-category-reports.json"), "{}").unwrap();

        let store = DirectoryStore::new(dir.path());
        let meds = store.fetch(ResourceKind::Medications).await.unwrap();
        assert_eq!(meds.body, b"[]".to_vec());
        assert_eq!(meds.fingerprint, fingerprint(b"[]"));

        let reports = store.fetch(ResourceKind::CategoryReports).await.unwrap();
        assert_eq!(reports.body, b"{}".to_vec());
    }

    #[tokio::test]
    async fn test_directory_store_file_name_override() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("details.json"), r#"{"1": {}}"#).unwrap();

        let store = DirectoryStore::new(dir.path()).with_file_name(ResourceKind::Details, "details.json");
        assert_eq!(store.path_for(ResourceKind::Details), dir.path().join("details.json"));
        assert!(store.fetch(ResourceKind::Details).await.is_ok());
    }

    #[tokio::test]
    async fn test_directory_store_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirectoryStore::new(dir.path());

        match store.fetch(ResourceKind::Details).await {
            Err(FormularyError::ResourceUnavailable { resource, reason }) => {
                assert_eq!(resource, ResourceKind::Details);
                assert!(reason.contains("medications-full.json"), "reason: {reason}");
            }
            other => panic!("expected ResourceUnavailable, got {:?}", other),
        }
    }
}
