//! Reservation ledger for intake-rs
//!
//! Records booking intents against catalog items and enforces the
//! no-double-booking invariant: at most one reservation per
//! (item, date, time) slot.

pub mod ledger;

pub use ledger::{Reservation, ReservationLedger, Slot};
