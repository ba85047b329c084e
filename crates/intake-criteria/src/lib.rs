//! Criteria collection for intake-rs
//!
//! This crate gathers the decision fields an intake session needs before a
//! catalog lookup can run. Field extraction from a conversation is an
//! external capability; this crate only accumulates already-extracted
//! (field, value) pairs and tracks completion.

pub mod collector;
pub mod criteria;

pub use collector::{CollectorConfig, CriteriaCollector};
pub use criteria::{Criteria, fields};
