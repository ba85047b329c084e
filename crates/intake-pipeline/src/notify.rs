//! Confirmation notification channel
//!
//! Notifications are fire-and-forget: the pipeline logs a failed delivery
//! and moves on, since the reservation is already committed.

use async_trait::async_trait;
use intake_core::Result;
use intake_ledger::Reservation;
use tracing::info;

/// Delivery channel for booking confirmations
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver the confirmation for a committed reservation
    async fn notify(&self, reservation: &Reservation) -> Result<()>;
}

/// Default notifier that writes confirmations to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, reservation: &Reservation) -> Result<()> {
        info!(
            item_id = %reservation.slot.item_id,
            requester = %reservation.requester,
            "{}",
            reservation.confirmation
        );
        Ok(())
    }
}
