//! Core abstractions for intake-rs
//!
//! This crate defines the error taxonomy and the per-session state machine
//! used throughout the intake-rs workspace.

pub mod error;
pub mod state;

pub use error::{Error, Result};
pub use state::SessionState;
