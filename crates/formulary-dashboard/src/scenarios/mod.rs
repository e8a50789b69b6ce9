//! Dashboard demo scenarios.
//!
//! Each scenario drives one `DashboardSession` through a group of
//! consumer-facing operations and prints what a view would show. Scenarios
//! are generic over the store, so the demo binary can run them against the
//! fixture data or a directory of published resources.

pub mod categories;
pub mod confidence;
pub mod filtering;
pub mod loading;
pub mod narrative;
