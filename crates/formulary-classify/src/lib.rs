//! # formulary-classify
//!
//! Classification logic over the medication snapshot.
//!
//! - [`confidence`] resolves how trustworthy a primary-taxonomy mapping is
//!   and renders that trust consistently (badge, explanation, tooltip).
//! - [`aggregate`] groups records into taxonomy categories with stable
//!   status ordering, and degrades every category drill-down to a plain
//!   grouped list when the report side is missing.
//!
//! Neither module performs I/O; both operate on already-loaded snapshots.

pub mod aggregate;
pub mod confidence;

pub use aggregate::{
    aggregate, collation_key, category_drilldown, group_by_status, secondary_drilldown, CategoryDrilldown,
    CategoryView, FallbackReason, SecondaryDrilldown, StatusGroup,
};
pub use confidence::{mapping_summary, resolve, CodeTone, Confidence, ConfidenceLevel, MappingSummary};

// ── Tests ─────────────────────────────────────────────────────────────────────
