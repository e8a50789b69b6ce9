//! TOML configuration for a dashboard session.
//!
//! `DashboardConfig` is loaded from a TOML string or file. Every section and
//! key is optional and falls back to the defaults shipped in
//! `config/dashboard.toml`.
//!
//! ```toml
//! [resources]
//! medications = "medications-summary.json"
//! details = "medications-full.json"
//! category_reports = "who-category-reports.json"
//!
//! [narrative]
//! checklist_marker = "Evidence Categories Present:"
//!
//! [filters]
//! all_sentinel = "all"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use formulary_contracts::{
    error::{FormularyError, FormularyResult},
    resource::ResourceKind,
};
use formulary_filter::DEFAULT_ALL_SENTINEL;
use formulary_narrative::DEFAULT_CHECKLIST_MARKER;
use formulary_store::DirectoryStore;

/// The configuration file compiled into the crate.
pub const DEFAULT_CONFIG: &str = include_str!("../config/dashboard.toml");

// ── Sections ──────────────────────────────────────────────────────────────────

/// File names of the three resources, relative to a data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceFiles {
    pub medications: String,
    pub details: String,
    pub category_reports: String,
}

impl Default for ResourceFiles {
    fn default() -> Self {
        Self {
            medications: ResourceKind::Medications.default_file_name().to_string(),
            details: ResourceKind::Details.default_file_name().to_string(),
            category_reports: ResourceKind::CategoryReports.default_file_name().to_string(),
        }
    }
}

impl ResourceFiles {
    pub fn file_name(&self, kind: ResourceKind) -> &str {
        match kind {
            ResourceKind::Medications => &self.medications,
            ResourceKind::Details => &self.details,
            ResourceKind::CategoryReports => &self.category_reports,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrativeSettings {
    pub checklist_marker: String,
}

impl Default for NarrativeSettings {
    fn default() -> Self {
        Self {
            checklist_marker: DEFAULT_CHECKLIST_MARKER.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    pub all_sentinel: String,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            all_sentinel: DEFAULT_ALL_SENTINEL.to_string(),
        }
    }
}

// ── DashboardConfig ───────────────────────────────────────────────────────────

/// Top-level dashboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub resources: ResourceFiles,
    pub narrative: NarrativeSettings,
    pub filters: FilterSettings,
}

impl DashboardConfig {
    /// Parse `s` as dashboard TOML.
    ///
    /// Returns `FormularyError::ConfigError` if the TOML is malformed, does
    /// not match the expected shape, or sets the checklist marker or the
    /// all-sentinel to an empty string.
    pub fn from_toml_str(s: &str) -> FormularyResult<Self> {
        let config: DashboardConfig = toml::from_str(s).map_err(|e| FormularyError::ConfigError {
            reason: format!("failed to parse dashboard TOML: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read the file at `path` and parse it as dashboard TOML.
    pub fn from_file(path: &Path) -> FormularyResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| FormularyError::ConfigError {
            reason: format!("failed to read dashboard config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// The configuration compiled into the crate.
    pub fn embedded() -> FormularyResult<Self> {
        Self::from_toml_str(DEFAULT_CONFIG)
    }

    /// A `DirectoryStore` rooted at `root` that reads the configured file names.
    pub fn directory_store(&self, root: impl Into<PathBuf>) -> DirectoryStore {
        ResourceKind::ALL
            .into_iter()
            .fold(DirectoryStore::new(root), |store, kind| {
                store.with_file_name(kind, self.resources.file_name(kind))
            })
    }

    fn validate(&self) -> FormularyResult<()> {
        if self.narrative.checklist_marker.trim().is_empty() {
            return Err(FormularyError::ConfigError {
                reason: "narrative.checklist_marker must not be empty".to_string(),
            });
        }
        if self.filters.all_sentinel.is_empty() {
            return Err(FormularyError::ConfigError {
                reason: "filters.all_sentinel must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
