//! # formulary-contracts
//!
//! Shared record types, resource kinds, and errors for the formulary
//! dashboard engine.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate: only data definitions, wire-format conversion and error
//! types.

pub mod category;
pub mod detail;
pub mod error;
pub mod mapping;
pub mod medication;
pub mod natural;
pub mod resource;
