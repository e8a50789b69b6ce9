//! Resource and session identity types.
//!
//! The dashboard reads three JSON resources, each fetched at most once per
//! session. These types name them and carry what a store hands back.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One of the three retrievable JSON resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    /// Array of medication records; the primary listing source.
    Medications,
    /// Object keyed by stringified medication id with full per-medication detail.
    Details,
    /// Object keyed by primary-taxonomy leaf code with category reports.
    CategoryReports,
}

impl ResourceKind {
    /// All resource kinds, in load order.
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Medications,
        ResourceKind::Details,
        ResourceKind::CategoryReports,
    ];

    /// The file name the dashboard publishes this resource under.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            ResourceKind::Medications => "medications-summary.json",
            ResourceKind::Details => "medications-full.json",
            ResourceKind::CategoryReports => "who-category-reports.json",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Medications => "medications",
            ResourceKind::Details => "details",
            ResourceKind::CategoryReports => "category-reports",
        };
        f.write_str(name)
    }
}

/// The raw body of a resource as returned by a store.
///
/// Decoding into typed records is the session's job; stores never inspect
/// the body beyond fingerprinting it.
#[derive(Debug, Clone)]
pub struct FetchedResource {
    pub kind: ResourceKind,
    /// Raw JSON bytes.
    pub body: Vec<u8>,
    /// Lowercase hex SHA-256 of `body`.
    pub fingerprint: String,
    pub fetched_at: DateTime<Utc>,
}

/// Unique identifier for one dashboard session.
///
/// Appears on every log line the session emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub uuid::Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
