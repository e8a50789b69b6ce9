//! # formulary-core
//!
//! Seam traits and session plumbing for the formulary dashboard engine.
//!
//! This crate provides:
//! - The seam traits (`ResourceStore`, `ContentBlock`, `ContentTree`, `NarrativeRenderer`)
//! - The `ResourceSlot` that memoizes one resource per session with an explicit in-flight state
//!
//! ## Usage
//!
//! ```rust,ignore
//! use formulary_core::{ResourceSlot, traits::{ResourceStore, ContentTree}};
//! ```

pub mod slot;
pub mod traits;

pub use slot::{Loaded, ResourceSlot, SlotState, SlotStatus};

// ── Tests ────────────────────────────────────────────────────────────────────
