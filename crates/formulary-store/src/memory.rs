//! In-memory implementation of `ResourceStore`.
//!
//! `InMemoryStore` serves resource bodies registered up front. It counts
//! every fetch per resource and can inject latency and failures, which makes
//! it the store the session tests and demo scenarios run against.
//!
//! Clones share state, so a test can keep a handle to read fetch counts
//! after moving the store into a session.

use std::{
    collections::HashMap,
    future::Future,
    sync::{Arc, Mutex},
    time::Duration,
};

use tracing::debug;

use formulary_contracts::{
    error::{FormularyError, FormularyResult},
    resource::{FetchedResource, ResourceKind},
};
use formulary_core::traits::ResourceStore;

use crate::fingerprint::fetched;

// ── Internal mutable state ────────────────────────────────────────────────────

#[derive(Default)]
pub(crate) struct InMemoryState {
    pub(crate) bodies: HashMap<ResourceKind, Vec<u8>>,
    /// Resources that fail with the given reason instead of returning a body.
    pub(crate) failures: HashMap<ResourceKind, String>,
    pub(crate) fetch_counts: HashMap<ResourceKind, usize>,
    pub(crate) latency: Option<Duration>,
}

// ── Public store ──────────────────────────────────────────────────────────────

/// A `ResourceStore` serving bodies from memory.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    pub(crate) state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the raw body served for `kind`.
    pub fn with_body(self, kind: ResourceKind, body: impl Into<Vec<u8>>) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.bodies.insert(kind, body.into());
        }
        self
    }

    /// Register a JSON value, serialized compactly, as the body for `kind`.
    pub fn with_json(self, kind: ResourceKind, value: &serde_json::Value) -> Self {
        let body = serde_json::to_vec(value).unwrap_or_default();
        self.with_body(kind, body)
    }

    /// Delay every fetch by `latency` before it resolves.
    pub fn with_latency(self, latency: Duration) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.latency = Some(latency);
        }
        self
    }

    /// Make fetches of `kind` fail with `reason` until `clear_failure`.
    pub fn fail(&self, kind: ResourceKind, reason: impl Into<String>) {
        if let Ok(mut state) = self.state.lock() {
            state.failures.insert(kind, reason.into());
        }
    }

    pub fn clear_failure(&self, kind: ResourceKind) {
        if let Ok(mut state) = self.state.lock() {
            state.failures.remove(&kind);
        }
    }

    /// How many times `kind` has been fetched, including failed fetches.
    pub fn fetch_count(&self, kind: ResourceKind) -> usize {
        self.state
            .lock()
            .map(|state| state.fetch_counts.get(&kind).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// Record one fetch and decide its outcome, without holding the lock
    /// past this call.
    fn begin_fetch(&self, kind: ResourceKind) -> (FormularyResult<Vec<u8>>, Option<Duration>) {
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(e) => {
                let err = FormularyError::ResourceUnavailable {
                    resource: kind,
                    reason: format!("store state lock poisoned: {}", e),
                };
                return (Err(err), None);
            }
        };

        *state.fetch_counts.entry(kind).or_default() += 1;
        let latency = state.latency;

        let outcome = if let Some(reason) = state.failures.get(&kind) {
            Err(FormularyError::ResourceUnavailable {
                resource: kind,
                reason: reason.clone(),
            })
        } else {
            state
                .bodies
                .get(&kind)
                .cloned()
                .ok_or_else(|| FormularyError::ResourceUnavailable {
                    resource: kind,
                    reason: "status 404".to_string(),
                })
        };

        (outcome, latency)
    }
}

// ── ResourceStore impl ────────────────────────────────────────────────────────

impl ResourceStore for InMemoryStore {
    fn fetch(
        &self,
        kind: ResourceKind,
    ) -> impl Future<Output = FormularyResult<FetchedResource>> + Send {
        let (outcome, latency) = self.begin_fetch(kind);
        async move {
            if let Some(latency) = latency {
                tokio::time::sleep(latency).await;
            }
            let body = outcome?;
            debug!(resource = %kind, bytes = body.len(), "in-memory fetch served");
            Ok(fetched(kind, body))
        }
    }
}
