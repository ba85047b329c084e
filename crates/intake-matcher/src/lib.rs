//! Catalog matching for intake-rs
//!
//! Applies a completed criteria set against a catalog store. The predicate is
//! fixed and deterministic: category and condition must match (both
//! case-insensitive) and the listing price must not exceed the budget.

pub mod matcher;

pub use matcher::{MatchResult, Matcher};
