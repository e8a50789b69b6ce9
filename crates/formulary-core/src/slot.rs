//! Guarded lazy-load cells for session resources.
//!
//! Each of the three resources a session reads lives in one `ResourceSlot`.
//! A slot moves `Empty → InFlight → Ready` and never back out of `Ready`.
//! Concurrent callers that find the slot `InFlight` wait on the one running
//! load instead of issuing a second fetch. A failed load returns the slot to
//! `Empty`, so a later request retries.

use std::{
    future::Future,
    sync::atomic::{AtomicBool, Ordering},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::debug;

use formulary_contracts::{error::FormularyResult, resource::ResourceKind};

/// Observable lifecycle state of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotState {
    Empty,
    InFlight,
    Ready,
}

impl std::fmt::Display for SlotState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SlotState::Empty => "empty",
            SlotState::InFlight => "in_flight",
            SlotState::Ready => "ready",
        };
        f.write_str(s)
    }
}

/// A decoded resource together with the provenance of the body it came from.
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    pub value: T,
    /// Number of top-level entries in the decoded resource.
    pub entries: usize,
    /// Lowercase hex SHA-256 of the raw body.
    pub fingerprint: String,
    pub fetched_at: DateTime<Utc>,
}

/// Point-in-time summary of one slot, for status reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotStatus {
    pub resource: ResourceKind,
    pub state: SlotState,
    pub entries: Option<usize>,
    pub fingerprint: Option<String>,
    pub fetched_at: Option<DateTime<Utc>>,
}

/// A write-once cell holding one loaded resource.
pub struct ResourceSlot<T> {
    kind: ResourceKind,
    cell: OnceCell<Loaded<T>>,
    in_flight: AtomicBool,
}

impl<T> ResourceSlot<T> {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            cell: OnceCell::new(),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn state(&self) -> SlotState {
        if self.cell.initialized() {
            SlotState::Ready
        } else if self.in_flight.load(Ordering::Acquire) {
            SlotState::InFlight
        } else {
            SlotState::Empty
        }
    }

    /// The loaded value, if the slot is `Ready`.
    pub fn get(&self) -> Option<&Loaded<T>> {
        self.cell.get()
    }

    /// Return the loaded value, running `load` first if the slot is empty.
    ///
    /// At most one `load` runs at a time. Callers arriving while a load is in
    /// flight wait for it and share its result; if it fails, the next waiter
    /// runs its own `load`.
    pub async fn get_or_load<F, Fut>(&self, load: F) -> FormularyResult<&Loaded<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = FormularyResult<Loaded<T>>>,
    {
        if let Some(loaded) = self.cell.get() {
            return Ok(loaded);
        }

        self.cell
            .get_or_try_init(|| async move {
                let _guard = InFlightGuard::enter(&self.in_flight);
                debug!(resource = %self.kind, "resource slot loading");
                load().await
            })
            .await
    }

    pub fn status(&self) -> SlotStatus {
        let loaded = self.cell.get();
        SlotStatus {
            resource: self.kind,
            state: self.state(),
            entries: loaded.map(|l| l.entries),
            fingerprint: loaded.map(|l| l.fingerprint.clone()),
            fetched_at: loaded.map(|l| l.fetched_at),
        }
    }
}

/// Holds the in-flight flag up for the lifetime of one load attempt, and
/// lowers it on completion, failure, or cancellation of the load future.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn enter(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::Release);
        Self { flag }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
