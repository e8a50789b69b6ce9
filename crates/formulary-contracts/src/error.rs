//! Error types for the formulary dashboard engine.
//!
//! Every fallible operation returns `FormularyResult<T>`. The filter engine
//! and the confidence resolver are total and never produce these errors;
//! unrecognized tag values are recovered where they are parsed.

use thiserror::Error;

use crate::resource::ResourceKind;

/// The unified error type for the formulary crates.
#[derive(Debug, Error)]
pub enum FormularyError {
    /// A resource fetch failed, returned a non-success status, or produced a
    /// body that could not be decoded into the expected shape.
    ///
    /// Fatal for the initial medication snapshot; for lazily loaded
    /// resources the caller degrades to an in-place message.
    #[error("resource '{resource}' unavailable: {reason}")]
    ResourceUnavailable { resource: ResourceKind, reason: String },

    /// A requested key is absent from a loaded snapshot.
    #[error("{kind} '{key}' not found")]
    RecordNotFound { kind: String, key: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },
}

impl FormularyError {
    /// Shorthand for a medication id that is not in the snapshot.
    pub fn medication_not_found(id: i64) -> Self {
        Self::RecordNotFound {
            kind: "medication".to_string(),
            key: id.to_string(),
        }
    }

    /// Shorthand for a leaf code with no category report.
    pub fn category_not_found(leaf_code: &str) -> Self {
        Self::RecordNotFound {
            kind: "category".to_string(),
            key: leaf_code.to_string(),
        }
    }

    /// Return true for the recoverable not-found case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RecordNotFound { .. })
    }
}

/// Convenience alias used throughout the formulary crates.
pub type FormularyResult<T> = Result<T, FormularyError>;
