//! Shared utilities for intake-rs
//!
//! This crate provides common functionality used across the intake-rs
//! workspace, currently logging setup.

pub mod logging;

pub use logging::{init_tracing, init_tracing_with};
