//! Per-session context: gate state and current page.
//!
//! Each browser session owns one `Session`. Handlers receive it explicitly
//! and change it only through `SessionRegistry::update`, which works on the
//! stored copy under the registry lock. A session is registered the first
//! time it changes, so requests that only read never grow the registry.
//! Nothing about a session is global, and nothing outlives the process.

use crate::{auth::AuthGate, page::Page, types::SessionId};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// No password submitted yet.
    Prompt,
    /// The last submitted password was wrong.
    Retry,
    Unlocked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: SessionId,
    pub gate: GateState,
    pub page: Page,
}

impl Session {
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            gate: GateState::Prompt,
            page: Page::default(),
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.gate == GateState::Unlocked
    }

    /// Check `password` against the gate. Returns whether the session is
    /// now unlocked. The password itself is not retained.
    pub fn submit_password(&mut self, gate: &AuthGate, password: &str) -> bool {
        self.gate = if gate.verify(password) {
            log::info!("session {}: unlocked", self.id);
            GateState::Unlocked
        } else {
            log::warn!("session {}: wrong password", self.id);
            GateState::Retry
        };
        self.is_unlocked()
    }

    pub fn select(&mut self, page: Page) {
        self.page = page;
    }
}

/// All live sessions, keyed by id.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<SessionId, Session>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, Session>> {
        // A panic while holding the lock cannot leave a half-written entry.
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn get(&self, id: SessionId) -> Option<Session> {
        self.lock().get(&id).cloned()
    }

    /// The registered session for `id`, otherwise a fresh locked one that is
    /// not registered until its first `update`.
    pub fn resume(&self, id: Option<SessionId>) -> Session {
        id.and_then(|id| self.get(id))
            .unwrap_or_else(|| Session::new(Uuid::new_v4()))
    }

    /// Apply `change` to the stored copy of `session`, registering it first if
    /// needed, and return the updated session with the closure's result.
    ///
    /// Only the id of `session` is used once it is registered, so a stale
    /// snapshot never overwrites a newer state.
    pub fn update<R>(&self, session: &Session, change: impl FnOnce(&mut Session) -> R) -> (Session, R) {
        let mut sessions = self.lock();
        let stored = sessions.entry(session.id).or_insert_with(|| {
            log::debug!("session {}: opened", session.id);
            session.clone()
        });
        let out = change(stored);
        (stored.clone(), out)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
