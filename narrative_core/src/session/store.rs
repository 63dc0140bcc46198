//! Session storage.
//!
//! Sessions live only in process memory and are never evicted, so memory grows
//! with the number of distinct users seen. Implement [`SessionStore`] to swap
//! in a bounded or persistent backend without touching the engine.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use story_rules::SceneId;

use super::{Session, UserId};

/// Shared handle to one user's session. Holding its lock serializes all
/// updates for that user.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Lock a session handle.
///
/// A panic while the lock was held leaves plain data behind, so a poisoned
/// lock is taken over rather than propagated.
pub fn lock_session(handle: &SessionHandle) -> MutexGuard<'_, Session> {
    handle.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Owner of all sessions, injected into the engine.
pub trait SessionStore: Send + Sync {
    /// Get the session for a user. Never creates one.
    fn get(&self, user_id: &UserId) -> Option<SessionHandle>;

    /// Replace the user's session with a fresh one at `entry_scene`.
    ///
    /// An existing handle is overwritten in place, so anyone holding it sees
    /// the reset once they acquire the lock.
    fn reset(&self, user_id: &UserId, entry_scene: &SceneId) -> SessionHandle;

    /// Number of sessions held.
    fn len(&self) -> usize;

    /// Check if no session exists yet.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Unbounded in-memory store.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<UserId, SessionHandle>>,
}

impl InMemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> MutexGuard<'_, HashMap<UserId, SessionHandle>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, user_id: &UserId) -> Option<SessionHandle> {
        self.table().get(user_id).cloned()
    }

    fn reset(&self, user_id: &UserId, entry_scene: &SceneId) -> SessionHandle {
        let fresh = Session::new(user_id.clone(), entry_scene.clone());

        let mut table = self.table();
        let existing = table.get(user_id).cloned();
        match existing {
            Some(handle) => {
                // Release the table before waiting on the session lock.
                drop(table);
                *lock_session(&handle) = fresh;
                handle
            }
            None => {
                let handle = Arc::new(Mutex::new(fresh));
                table.insert(user_id.clone(), Arc::clone(&handle));
                handle
            }
        }
    }

    fn len(&self) -> usize {
        self.table().len()
    }
}
