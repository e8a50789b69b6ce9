//! Single filter facets.
//!
//! A facet is either the "no restriction" sentinel or one concrete value.
//! The sentinel string comes from configuration (default `"all"`); an empty
//! string is treated the same way, since an unselected dropdown submits it.

use serde::{Deserialize, Serialize};

use formulary_contracts::medication::Status;

/// The sentinel used when configuration does not name one.
pub const DEFAULT_ALL_SENTINEL: &str = "all";

/// One independent filter dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet<T> {
    /// Skip this facet.
    All,
    /// Restrict to records matching this value.
    Only(T),
}

impl<T> Default for Facet<T> {
    fn default() -> Self {
        Facet::All
    }
}

impl<T> Facet<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Facet::All)
    }

    /// Evaluate the facet: `All` always passes, `Only` defers to `test`.
    pub fn allows(&self, test: impl FnOnce(&T) -> bool) -> bool {
        match self {
            Facet::All => true,
            Facet::Only(value) => test(value),
        }
    }

    pub fn as_only(&self) -> Option<&T> {
        match self {
            Facet::All => None,
            Facet::Only(value) => Some(value),
        }
    }
}

impl Facet<String> {
    /// Parse a raw facet value, mapping `sentinel` and empty input to `All`.
    pub fn parse(raw: &str, sentinel: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == sentinel {
            Facet::All
        } else {
            Facet::Only(raw.to_string())
        }
    }
}

impl Facet<Status> {
    /// Parse a raw status tag, mapping `sentinel` and empty input to `All`.
    pub fn parse_status(raw: &str, sentinel: &str) -> Self {
        match Facet::parse(raw, sentinel) {
            Facet::All => Facet::All,
            Facet::Only(tag) => Facet::Only(Status::parse(&tag)),
        }
    }
}

impl<T> From<Option<T>> for Facet<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Facet::Only(v),
            None => Facet::All,
        }
    }
}
