//! Reservation storage and conflict detection

use chrono::{DateTime, Utc};
use intake_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// The (item, date, time) key reservations are deduplicated on
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    /// Identifier of the reserved catalog item
    pub item_id: String,
    /// Requested date (opaque, e.g. "2025-06-01")
    pub date: String,
    /// Requested time (opaque, e.g. "10:00 AM")
    pub time: String,
}

impl Slot {
    /// Create a slot key; components are stored trimmed
    pub fn new(
        item_id: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            item_id: item_id.into().trim().to_string(),
            date: date.into().trim().to_string(),
            time: time.into().trim().to_string(),
        }
    }
}

/// A committed booking of one catalog item for one slot
///
/// Never mutated after creation; cancellation would supersede it but is out
/// of scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    /// The reserved slot
    pub slot: Slot,
    /// Who requested the booking
    pub requester: String,
    /// When the ledger committed the booking
    pub booked_at: DateTime<Utc>,
    /// Human-readable confirmation for the notification channel
    pub confirmation: String,
}

impl Reservation {
    fn new(slot: Slot, requester: String, item_name: &str) -> Self {
        let confirmation = format!(
            "Your test drive for the {item_name} has been successfully booked \
             for {date} at {time}. A confirmation email will be sent shortly.",
            date = slot.date,
            time = slot.time,
        );
        Self {
            slot,
            requester,
            booked_at: Utc::now(),
            confirmation,
        }
    }
}

/// Thread-safe reservation ledger
///
/// The only mutable shared resource in the pipeline. `book` runs its
/// check-and-insert under a single write lock, so of two racing calls for the
/// same slot exactly one succeeds and the other observes `SlotConflict`; no
/// partial state is ever visible. Cloning shares the underlying storage.
pub struct ReservationLedger {
    reservations: Arc<RwLock<HashMap<Slot, Reservation>>>,
}

impl ReservationLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self {
            reservations: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Record a booking for `slot`
    ///
    /// `item_name` is the display name used in the confirmation text.
    /// Fails atomically with `SlotConflict` when the slot is already taken;
    /// the ledger is left unchanged and the existing reservation is never
    /// overwritten.
    pub async fn book(
        &self,
        slot: Slot,
        requester: impl Into<String>,
        item_name: &str,
    ) -> Result<Reservation> {
        let requester = requester.into();
        let mut reservations = self.reservations.write().await;

        if reservations.contains_key(&slot) {
            warn!(
                item_id = %slot.item_id,
                date = %slot.date,
                time = %slot.time,
                "Booking conflict"
            );
            return Err(Error::SlotConflict {
                item_id: slot.item_id,
                date: slot.date,
                time: slot.time,
            });
        }

        let reservation = Reservation::new(slot.clone(), requester, item_name);
        info!(
            item_id = %slot.item_id,
            date = %slot.date,
            time = %slot.time,
            requester = %reservation.requester,
            "Reservation committed"
        );
        reservations.insert(slot, reservation.clone());
        Ok(reservation)
    }

    /// Look up the reservation holding `slot`, if any
    pub async fn get(&self, slot: &Slot) -> Option<Reservation> {
        self.reservations.read().await.get(slot).cloned()
    }

    /// All reservations against one item, in no particular order
    pub async fn reservations_for_item(&self, item_id: &str) -> Vec<Reservation> {
        self.reservations
            .read()
            .await
            .values()
            .filter(|r| r.slot.item_id == item_id)
            .cloned()
            .collect()
    }

    /// Total number of committed reservations
    pub async fn len(&self) -> usize {
        self.reservations.read().await.len()
    }

    /// Whether no reservation has been committed
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for ReservationLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ReservationLedger {
    fn clone(&self) -> Self {
        Self {
            reservations: Arc::clone(&self.reservations),
        }
    }
}
