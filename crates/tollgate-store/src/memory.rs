//! In-memory session store.
//!
//! # Concurrency note
//!
//! `MemorySessionStore` is NOT thread-safe by itself; it is a plain
//! `HashMap`. It is owned by exactly one authenticator, and that
//! authenticator is shared across tasks behind a mutex. Keeping the store
//! lock-free here means there is only one lock to reason about.

use std::collections::HashMap;

use tollgate_core::{SessionId, UserId};

use crate::{SessionStore, generate_token};

/// A `HashMap`-backed [`SessionStore`].
///
/// Lives for as long as the process does; nothing is persisted.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    /// Session identifier → owning user.
    sessions: HashMap<SessionId, UserId>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws tokens until one is not already live.
    ///
    /// Removed identifiers are forgotten, so a past token could in
    /// principle come back; at 128 random bits that is ignored.
    fn fresh_id(&self) -> SessionId {
        loop {
            let token = generate_token();
            if !self.sessions.contains_key(token.as_str()) {
                return SessionId(token);
            }
            tracing::warn!("session token collision, drawing again");
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn create(&mut self, user_id: &UserId) -> Option<SessionId> {
        if user_id.is_empty() {
            tracing::debug!("refusing to create a session for an empty identity");
            return None;
        }

        let session_id = self.fresh_id();
        self.sessions.insert(session_id.clone(), user_id.clone());

        tracing::debug!(%user_id, "session identifier minted");
        Some(session_id)
    }

    fn resolve(&self, session_id: &str) -> Option<UserId> {
        self.sessions.get(session_id).cloned()
    }

    fn destroy(&mut self, session_id: &str) -> bool {
        self.sessions.remove(session_id).is_some()
    }

    fn len(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TOKEN_LEN;

    fn uid(id: &str) -> UserId {
        UserId::new(id)
    }

    #[test]
    fn test_create_valid_user_returns_token() {
        let mut store = MemorySessionStore::new();

        let sid = store.create(&uid("u1")).expect("should mint an id");

        assert_eq!(sid.as_str().len(), TOKEN_LEN);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_create_empty_user_returns_none() {
        let mut store = MemorySessionStore::new();

        assert!(store.create(&uid("")).is_none());
        assert!(store.is_empty(), "no association should be stored");
    }

    #[test]
    fn test_create_same_user_twice_gets_two_sessions() {
        // One identity may hold several live sessions.
        let mut store = MemorySessionStore::new();

        let a = store.create(&uid("u1")).unwrap();
        let b = store.create(&uid("u1")).unwrap();

        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
        assert_eq!(store.resolve(a.as_str()), Some(uid("u1")));
        assert_eq!(store.resolve(b.as_str()), Some(uid("u1")));
    }

    #[test]
    fn test_resolve_unknown_returns_none() {
        let store = MemorySessionStore::new();
        assert!(store.resolve("garbage-token").is_none());
    }

    #[test]
    fn test_destroy_removes_association() {
        let mut store = MemorySessionStore::new();
        let sid = store.create(&uid("u1")).unwrap();

        assert!(store.destroy(sid.as_str()));
        assert!(store.resolve(sid.as_str()).is_none());
        assert!(!store.destroy(sid.as_str()), "second destroy is a no-op");
    }

    #[test]
    fn test_create_after_destroy_issues_new_token() {
        let mut store = MemorySessionStore::new();
        let old = store.create(&uid("u1")).unwrap();
        store.destroy(old.as_str());

        let new = store.create(&uid("u1")).unwrap();

        assert_ne!(old, new);
        assert!(store.resolve(old.as_str()).is_none());
        assert_eq!(store.resolve(new.as_str()), Some(uid("u1")));
    }
}
