//! Per-session intake flow

use crate::pipeline::IntakePipeline;
use chrono::{DateTime, Utc};
use intake_core::{Error, Result, SessionState};
use intake_criteria::{Criteria, CriteriaCollector};
use intake_ledger::{Reservation, Slot};
use intake_matcher::MatchResult;
use tracing::{debug, warn};
use uuid::Uuid;

/// One intake session: qualification, lookup, then booking
///
/// Wraps the per-session state machine
/// (`Collecting -> Ready -> Matched -> Booked | Abandoned`) around the
/// pipeline's shared resources. Sequential and request/response; nothing here
/// suspends beyond catalog/ledger access.
#[derive(Clone)]
pub struct IntakeSession {
    id: String,
    pipeline: IntakePipeline,
    collector: CriteriaCollector,
    state: SessionState,
    last_match: Option<MatchResult>,
    created_at: DateTime<Utc>,
    last_active: DateTime<Utc>,
}

impl IntakeSession {
    pub(crate) fn new(pipeline: IntakePipeline) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            collector: CriteriaCollector::new(pipeline.config().collector.clone()),
            pipeline,
            state: SessionState::Collecting,
            last_match: None,
            created_at: now,
            last_active: now,
        }
    }

    /// Session identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// When the session was opened
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the session last saw activity
    pub fn last_active(&self) -> DateTime<Utc> {
        self.last_active
    }

    /// Whether the session has been idle longer than `max_age_seconds`
    pub fn is_expired(&self, max_age_seconds: i64) -> bool {
        Utc::now() - self.last_active > chrono::Duration::seconds(max_age_seconds)
    }

    /// Result of the most recent lookup, if one has run
    pub fn last_match(&self) -> Option<&MatchResult> {
        self.last_match.as_ref()
    }

    /// Merge one criteria field, last-write-wins
    ///
    /// Moves the session to `Ready` once every required field is present.
    /// Rejected with `InvalidState` once the session is booked or abandoned.
    pub fn collect(&mut self, field: impl Into<String>, value: impl Into<String>) -> Result<()> {
        if self.state.is_terminal() {
            return Err(Error::InvalidState(format!(
                "cannot collect criteria in state {:?}",
                self.state
            )));
        }

        self.collector.update(field, value);
        self.touch();

        if self.state == SessionState::Collecting && self.collector.is_complete() {
            self.state = self.state.transition(SessionState::Ready)?;
            debug!(session_id = %self.id, "Criteria complete, session ready");
        }
        Ok(())
    }

    /// Whether all required criteria fields are collected
    pub fn is_ready(&self) -> bool {
        self.collector.is_complete()
    }

    /// Immutable copy of the collected criteria
    ///
    /// Fails with `IncompleteCriteria` before collection has finished.
    pub fn criteria(&self) -> Result<Criteria> {
        self.collector.snapshot()
    }

    /// Run the lookup stage against the catalog
    ///
    /// Returns the ordered match result; an empty result is a normal outcome
    /// the caller should handle by prompting for relaxed criteria. Fails with
    /// `IncompleteCriteria` before the session is ready.
    pub async fn search(&mut self) -> Result<MatchResult> {
        if self.state.is_terminal() {
            return Err(Error::InvalidState(format!(
                "cannot search in state {:?}",
                self.state
            )));
        }

        let criteria = self.collector.snapshot()?;
        let result = self
            .pipeline
            .matcher()
            .find(&criteria, self.pipeline.catalog().as_ref())
            .await?;

        self.state = self.state.transition(SessionState::Matched)?;
        self.last_match = Some(result.clone());
        self.touch();
        Ok(result)
    }

    /// Commit a reservation for one matched item
    ///
    /// The slot is (item, date, time); the requester identifies who booked.
    /// Fails with `IncompleteCriteria` before the session is ready,
    /// `UnknownItem` when the id is not in the catalog, and `SlotConflict`
    /// when the slot is already taken (session state is unchanged so the
    /// caller can retry with a different slot). On success the confirmation
    /// is handed to the notifier fire-and-forget and the session is booked.
    pub async fn reserve(
        &mut self,
        item_id: &str,
        date: impl Into<String>,
        time: impl Into<String>,
        requester: impl Into<String>,
    ) -> Result<Reservation> {
        if self.state.is_terminal() {
            return Err(Error::InvalidState(format!(
                "cannot reserve in state {:?}",
                self.state
            )));
        }
        if !self.collector.is_complete() {
            return Err(Error::IncompleteCriteria {
                missing: self.collector.missing_fields(),
            });
        }

        // Advisory precondition only: booking an item outside the last match
        // set is tolerated but logged.
        match &self.last_match {
            Some(result) if !result.contains(item_id) => {
                warn!(session_id = %self.id, item_id, "Booking an item outside the last match set");
            }
            None => {
                debug!(session_id = %self.id, item_id, "Booking without a prior lookup");
            }
            Some(_) => {}
        }

        let item = self
            .pipeline
            .catalog()
            .list_all()
            .await?
            .into_iter()
            .find(|item| item.id == item_id)
            .ok_or_else(|| Error::UnknownItem(item_id.to_string()))?;

        let slot = Slot::new(item_id, date, time);
        let reservation = self
            .pipeline
            .ledger()
            .book(slot, requester, &item.display_name())
            .await?;

        self.state = self.state.transition(SessionState::Booked)?;
        self.touch();

        // Fire-and-forget: the reservation is committed either way
        if let Err(e) = self.pipeline.notifier().notify(&reservation).await {
            warn!(session_id = %self.id, "Confirmation delivery failed: {e}");
        }

        Ok(reservation)
    }

    /// Mark the session abandoned (external actor disengaged)
    pub fn abandon(&mut self) -> Result<()> {
        self.state = self.state.transition(SessionState::Abandoned)?;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.last_active = Utc::now();
    }
}
