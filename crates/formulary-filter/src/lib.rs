//! # formulary-filter
//!
//! A conjunctive, multi-facet filter over the medication snapshot.
//!
//! ## Overview
//!
//! Three independent facets (status, primary leaf code, secondary category
//! label) each accept a sentinel meaning "no restriction". The predicate is
//! the logical AND of the active facets. Filtering is total: no facet value
//! can make it fail.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use formulary_filter::{filter_view, FilterFacets};
//!
//! let facets = FilterFacets::from_raw("ALLOWED", "all", "all", "all");
//! let visible = filter_view(&records, &facets);
//! ```
//!
//! ## Secondary matching
//!
//! The secondary facet matches by substring containment against the stored
//! `"<code> - <name>"` string, because dropdown values are the bare name. A
//! name that is a substring of another category's name matches both.

pub mod engine;
pub mod facet;
pub mod options;

pub use engine::{build_predicate, filter_view, FilterFacets};
pub use facet::{Facet, DEFAULT_ALL_SENTINEL};
pub use options::{primary_filter_options, secondary_filter_options, FilterOption};

// ── Tests ─────────────────────────────────────────────────────────────────────
