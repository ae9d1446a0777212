//! In-memory session store.
//!
//! Two-level map `user_id -> session_id -> SessionHistory`, owned by the chat
//! service for the lifetime of the process. Nothing is persisted.
//!
//! [`SessionStore::get`], [`SessionStore::with_history`] and
//! [`SessionStore::append`] materialize an empty history for unseen keys. The
//! listing operations ([`SessionStore::list_sessions`],
//! [`SessionStore::list_all`]) are read-only and never insert.
//!
//! Store operations hold the map lock only for the duration of the call. To
//! serialize a whole read-generate-append exchange on one key, callers take a
//! [`SessionGuard`] from [`SessionStore::lock_session`] first.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::history::{SessionHistory, Turn};

type UserSessions = BTreeMap<String, SessionHistory>;
type SessionKey = (String, String);

/// Process-wide conversation store.
#[derive(Debug, Default)]
pub struct SessionStore {
    users: RwLock<BTreeMap<String, UserSessions>>,
    /// Per-session exclusion locks, created on first use.
    locks: Mutex<HashMap<SessionKey, Arc<AsyncMutex<()>>>>,
}

/// Exclusive hold on one `(user_id, session_id)` key.
///
/// Released on drop.
#[derive(Debug)]
pub struct SessionGuard {
    user_id: String,
    session_id: String,
    _guard: OwnedMutexGuard<()>,
}

impl SessionGuard {
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

/// Aggregate counts across the whole store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub users: usize,
    pub sessions: usize,
    pub turns: usize,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a session's history, inserting an empty one if absent.
    pub fn get(&self, user_id: &str, session_id: &str) -> SessionHistory {
        self.with_history(user_id, session_id, |history| history.clone())
    }

    /// Run `f` with mutable access to the stored history (get-or-insert).
    ///
    /// Mutations made by `f` land directly in the store.
    pub fn with_history<R>(
        &self,
        user_id: &str,
        session_id: &str,
        f: impl FnOnce(&mut SessionHistory) -> R,
    ) -> R {
        let mut users = self.write();
        let history = users
            .entry(user_id.to_string())
            .or_default()
            .entry(session_id.to_string())
            .or_default();
        f(history)
    }

    /// Append a turn to the end of the session's history.
    pub fn append(&self, user_id: &str, session_id: &str, turn: Turn) {
        self.with_history(user_id, session_id, |history| history.push(turn));
    }

    /// Append a turn, then drop the oldest turns beyond `max_turns`.
    ///
    /// Returns a snapshot of the resulting history.
    pub fn append_bounded(
        &self,
        user_id: &str,
        session_id: &str,
        turn: Turn,
        max_turns: usize,
    ) -> SessionHistory {
        self.with_history(user_id, session_id, |history| {
            history.push(turn);
            history.evict_to(max_turns);
            history.clone()
        })
    }

    /// All sessions of one user; empty for unknown users. Never inserts.
    pub fn list_sessions(&self, user_id: &str) -> BTreeMap<String, SessionHistory> {
        self.read().get(user_id).cloned().unwrap_or_default()
    }

    /// Full dump of every user's sessions. Never inserts.
    pub fn list_all(&self) -> BTreeMap<String, BTreeMap<String, SessionHistory>> {
        self.read().clone()
    }

    pub fn stats(&self) -> StoreStats {
        let users = self.read();
        let mut stats = StoreStats {
            users: users.len(),
            ..StoreStats::default()
        };
        for sessions in users.values() {
            stats.sessions += sessions.len();
            stats.turns += sessions.values().map(SessionHistory::len).sum::<usize>();
        }
        stats
    }

    /// Wait for exclusive access to one session key.
    ///
    /// Distinct keys never contend. Does not materialize a history entry.
    pub async fn lock_session(&self, user_id: &str, session_id: &str) -> SessionGuard {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks
                .entry((user_id.to_string(), session_id.to_string()))
                .or_default()
                .clone()
        };
        let guard = lock.lock_owned().await;
        tracing::trace!(user_id, session_id, "session lock acquired");
        SessionGuard {
            user_id: user_id.to_string(),
            session_id: session_id.to_string(),
            _guard: guard,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, UserSessions>> {
        self.users.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, UserSessions>> {
        self.users.write().unwrap_or_else(PoisonError::into_inner)
    }
}
