//! Session management for shared deployments
//!
//! A single-session caller can hold an [`IntakeSession`] directly; services
//! that juggle many concurrent intakes keep them in a [`SessionManager`]
//! keyed by session id, with idle sessions swept out after a TTL.

use crate::pipeline::IntakePipeline;
use crate::session::IntakeSession;
use intake_core::Result;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::info;

/// Storage backend for intake sessions
pub trait SessionStorage: Send + Sync {
    /// Fetch a session by id
    fn get(&self, session_id: &str) -> Option<IntakeSession>;
    /// Store (or replace) a session
    fn set(&mut self, session: IntakeSession) -> Result<()>;
    /// Remove a session; returns whether it existed
    fn delete(&mut self, session_id: &str) -> bool;
    /// Drop sessions idle longer than `max_age_seconds`; returns how many
    fn cleanup_expired(&mut self, max_age_seconds: i64) -> usize;
    /// All stored sessions
    fn active_sessions(&self) -> Vec<IntakeSession>;
}

/// Default in-process session storage
pub struct InMemoryStorage {
    sessions: Arc<RwLock<HashMap<String, IntakeSession>>>,
}

impl InMemoryStorage {
    /// Create empty storage
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStorage for InMemoryStorage {
    fn get(&self, session_id: &str) -> Option<IntakeSession> {
        self.sessions.read().ok()?.get(session_id).cloned()
    }

    fn set(&mut self, session: IntakeSession) -> Result<()> {
        self.sessions
            .write()
            .map_err(|e| intake_core::Error::Config(format!("session lock poisoned: {e}")))?
            .insert(session.id().to_string(), session);
        Ok(())
    }

    fn delete(&mut self, session_id: &str) -> bool {
        self.sessions
            .write()
            .ok()
            .and_then(|mut sessions| sessions.remove(session_id))
            .is_some()
    }

    fn cleanup_expired(&mut self, max_age_seconds: i64) -> usize {
        let mut sessions = match self.sessions.write() {
            Ok(s) => s,
            Err(_) => return 0,
        };

        let initial_count = sessions.len();
        sessions.retain(|_, session| !session.is_expired(max_age_seconds));
        initial_count - sessions.len()
    }

    fn active_sessions(&self) -> Vec<IntakeSession> {
        self.sessions
            .read()
            .ok()
            .map(|sessions| sessions.values().cloned().collect())
            .unwrap_or_default()
    }
}

/// Keeps intake sessions for many concurrent requesters
pub struct SessionManager {
    pipeline: IntakePipeline,
    storage: Box<dyn SessionStorage>,
    session_ttl: i64,
}

impl SessionManager {
    /// Create a manager with in-memory storage and a one-hour TTL
    pub fn new(pipeline: IntakePipeline) -> Self {
        Self {
            pipeline,
            storage: Box::new(InMemoryStorage::new()),
            session_ttl: 3600,
        }
    }

    /// Create a manager with a custom storage backend
    pub fn with_storage(pipeline: IntakePipeline, storage: Box<dyn SessionStorage>) -> Self {
        Self {
            pipeline,
            storage,
            session_ttl: 3600,
        }
    }

    /// Override the idle TTL in seconds
    pub fn session_ttl(mut self, seconds: i64) -> Self {
        self.session_ttl = seconds;
        self
    }

    /// Open a fresh session and store it; returns its id
    pub fn open(&mut self) -> Result<String> {
        let session = self.pipeline.session();
        let id = session.id().to_string();
        self.storage.set(session)?;
        info!(session_id = %id, "Opened intake session");
        Ok(id)
    }

    /// Fetch a stored session by id
    pub fn get(&self, session_id: &str) -> Option<IntakeSession> {
        self.storage.get(session_id)
    }

    /// Store a session back after mutating it
    pub fn save(&mut self, session: IntakeSession) -> Result<()> {
        self.storage.set(session)
    }

    /// Remove a session
    pub fn close(&mut self, session_id: &str) -> bool {
        self.storage.delete(session_id)
    }

    /// Abandon and drop sessions idle beyond the TTL; returns how many
    ///
    /// Expiry is the external disengagement policy from the session state
    /// machine: swept sessions count as abandoned.
    pub fn sweep_expired(&mut self) -> usize {
        let swept = self.storage.cleanup_expired(self.session_ttl);
        if swept > 0 {
            info!(count = swept, "Swept expired intake sessions");
        }
        swept
    }

    /// All stored sessions
    pub fn active_sessions(&self) -> Vec<IntakeSession> {
        self.storage.active_sessions()
    }
}
