//! Per-session intake state machine
//!
//! `Collecting -> Ready -> Matched -> Booked | Abandoned`
//!
//! A session starts out collecting criteria fields, becomes ready once all
//! required fields are present, records whether a lookup has run (even when
//! it returned zero matches), and ends either booked or abandoned. Any state
//! may move to abandoned; no other backward transition exists.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Lifecycle state of one intake session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Required criteria fields are still being gathered
    Collecting,
    /// All required fields are present; no lookup has run yet
    Ready,
    /// A lookup has run; zero matches is still `Matched`
    Matched,
    /// A reservation was committed for this session
    Booked,
    /// The external actor disengaged before booking
    Abandoned,
}

impl SessionState {
    /// Whether the session has reached a terminal state
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Booked | Self::Abandoned)
    }

    /// Validate and apply a transition to `next`
    ///
    /// Returns `InvalidState` for anything the state machine does not allow,
    /// naming both ends of the rejected edge.
    pub fn transition(self, next: Self) -> Result<Self> {
        let allowed = match (self, next) {
            // Any non-terminal state may be abandoned
            (s, Self::Abandoned) if !s.is_terminal() => true,
            (Self::Collecting, Self::Ready) => true,
            (Self::Ready, Self::Matched) => true,
            // Repeated lookups with refined criteria stay in Matched
            (Self::Matched, Self::Matched) => true,
            (Self::Matched, Self::Booked) => true,
            // Booking without a prior lookup is tolerated (advisory precondition)
            (Self::Ready, Self::Booked) => true,
            _ => false,
        };

        if allowed {
            Ok(next)
        } else {
            Err(Error::InvalidState(format!("{self:?} -> {next:?}")))
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Collecting
    }
}
