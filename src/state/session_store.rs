use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use log::debug;

use uuid::Uuid;

use crate::models::session::Session;

/// In-memory sessions keyed by id. Guards are never held across an `.await`.
///
/// With a TTL, sessions idle for longer than it are treated as gone and are
/// swept whenever a new session is created.
#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, Session>>,
    ttl: Option<Duration>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::default(),
            ttl: Some(ttl),
        }
    }

    fn is_expired(&self, session: &Session, now: i64) -> bool {
        match self.ttl {
            Some(ttl) => now.saturating_sub(session.updated_at) > ttl.as_millis() as i64,
            None => false,
        }
    }

    fn now() -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Session>> {
        // A panic while holding the lock leaves plain data behind, keep serving it
        self.sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn create(&self) -> Session {
        let session = Session::new();
        let mut sessions = self.lock();
        self.sweep(&mut sessions);
        sessions.insert(session.id, session.clone());
        session
    }

    fn sweep(&self, sessions: &mut HashMap<Uuid, Session>) {
        let now = Self::now();
        let before = sessions.len();
        sessions.retain(|_, session| !self.is_expired(session, now));
        if sessions.len() < before {
            debug!("Evicted {} idle sessions", before - sessions.len());
        }
    }

    pub fn get(&self, id: &Uuid) -> Option<Session> {
        let now = Self::now();
        self.lock()
            .get(id)
            .filter(|session| !self.is_expired(session, now))
            .cloned()
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.get(id).is_some()
    }

    pub fn remove(&self, id: &Uuid) -> Option<Session> {
        self.lock().remove(id)
    }

    /// Run `f` on the session and return its result with a snapshot of the session.
    pub fn update<T, F>(&self, id: &Uuid, f: F) -> Option<(T, Session)>
    where
        F: FnOnce(&mut Session) -> T,
    {
        let now = Self::now();
        let mut sessions = self.lock();
        let session = sessions.get_mut(id)?;
        if self.is_expired(session, now) {
            return None;
        }
        let result = f(session);
        Some((result, session.clone()))
    }

    pub fn count(&self) -> usize {
        self.lock().len()
    }
}
