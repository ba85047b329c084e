//! Intake pipeline orchestration for intake-rs
//!
//! Wires the qualification, lookup, and booking stages into one
//! request/response API per session:
//!
//! 1. [`IntakeSession::collect`] gathers criteria fields until
//!    [`IntakeSession::is_ready`] reports completion.
//! 2. [`IntakeSession::search`] runs the matcher against the catalog.
//! 3. [`IntakeSession::reserve`] commits a reservation through the ledger
//!    and fires the confirmation notifier.
//!
//! The pipeline owns the shared resources (catalog, ledger, notifier);
//! sessions are cheap handles over them with per-session state.

pub mod manager;
pub mod notify;
pub mod pipeline;
pub mod session;

pub use manager::{InMemoryStorage, SessionManager, SessionStorage};
pub use notify::{LogNotifier, Notifier};
pub use pipeline::{IntakePipeline, PipelineBuilder, PipelineConfig};
pub use session::IntakeSession;
