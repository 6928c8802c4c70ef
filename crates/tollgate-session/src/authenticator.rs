//! The expiring authenticator: issues sessions and decides whether a
//! presented token is still good.
//!
//! It's responsible for:
//! - Creating sessions (delegating token minting to the store)
//! - Stamping each session with its creation time
//! - Rejecting tokens once the configured lifetime has elapsed
//! - Evicting expired records so memory doesn't grow without bound
//!
//! # Concurrency note
//!
//! `ExpiringAuthenticator` is NOT thread-safe by itself: mutation takes
//! `&mut self` and the records live in a plain `HashMap`. Share it across
//! tasks through [`SharedAuthenticator`](crate::SharedAuthenticator), which
//! puts the whole thing behind one mutex. That makes every
//! check-then-purge sequence in [`resolve_identity`] atomic.
//!
//! [`resolve_identity`]: ExpiringAuthenticator::resolve_identity

use std::collections::HashMap;

use tollgate_core::{Clock, SessionId, SystemClock, UserId};
use tollgate_store::{MemorySessionStore, SessionStore};

use crate::{EvictionPolicy, SessionConfig, SessionRecord, Validity};

/// Issues session tokens and validates them against a lifetime.
///
/// The store and the clock are injected at construction. Production code
/// normally uses the defaults ([`MemorySessionStore`] and
/// [`SystemClock`]) through [`ExpiringAuthenticator::new`]; tests inject a
/// [`ManualClock`](tollgate_core::ManualClock) with
/// [`with_parts`](Self::with_parts).
///
/// ## Lifecycle
///
/// ```text
/// create_session() ──→ [Active] ──(ttl elapses)──→ [Expired]
///        │                 │                           │
///        │                 ▼                           ▼
///        │        resolve_identity()           resolve_identity()
///        │          → Some(user)                 → None (+ purge)
///        │                 │
///        └──────→ destroy_session() ──→ [gone]
/// ```
pub struct ExpiringAuthenticator<S = MemorySessionStore, C = SystemClock> {
    /// The base store. Mints tokens and keeps the raw token → user link.
    store: S,

    /// Where "now" comes from.
    clock: C,

    /// Lifetime and eviction settings. Fixed for the authenticator's life.
    config: SessionConfig,

    /// Time-stamped records, keyed by token.
    ///
    /// This map sits on top of the store's own association: the store
    /// knows who owns a token, this map also knows when it was issued.
    records: HashMap<SessionId, SessionRecord>,
}

impl ExpiringAuthenticator {
    /// Creates an authenticator with an in-memory store and the system
    /// clock.
    pub fn new(config: SessionConfig) -> Self {
        Self::with_parts(MemorySessionStore::new(), SystemClock, config)
    }
}

impl<S: SessionStore, C: Clock> ExpiringAuthenticator<S, C> {
    /// Creates an authenticator from an explicit store and clock.
    pub fn with_parts(store: S, clock: C, config: SessionConfig) -> Self {
        Self {
            store,
            clock,
            config,
            records: HashMap::new(),
        }
    }

    /// Creates a new session for `user_id` and returns its token.
    ///
    /// Returns `None` if the store refuses the identity (for the in-memory
    /// store: an empty user id). In that case no record is created.
    pub fn create_session(&mut self, user_id: &UserId) -> Option<SessionId> {
        let session_id = self.store.create(user_id)?;

        let record = SessionRecord::new(
            session_id.clone(),
            user_id.clone(),
            self.clock.now(),
        );
        self.records.insert(session_id.clone(), record);

        tracing::info!(%user_id, "session created");
        Some(session_id)
    }

    /// Classifies `session_id` without changing anything.
    pub fn inspect(&self, session_id: &str) -> Validity {
        let Some(record) = self.records.get(session_id) else {
            return Validity::Unknown;
        };
        match self.config.ttl() {
            Some(ttl) if record.is_expired_at(self.clock.now(), ttl) => {
                Validity::Expired
            }
            _ => Validity::Active,
        }
    }

    /// Returns the user `session_id` authenticates, or `None`.
    ///
    /// Checks run in this order:
    /// 1. Unknown token → `None`.
    /// 2. Lifetime disabled (`session_duration_secs <= 0`) → the user.
    /// 3. `now > created_at + ttl` → `None`. Under
    ///    [`EvictionPolicy::Purge`] the record is also removed, from both
    ///    this authenticator and the store.
    /// 4. Otherwise → the user.
    ///
    /// Looking up an active session never modifies it: repeated calls
    /// return the same user and leave `created_at` untouched.
    pub fn resolve_identity(&mut self, session_id: &str) -> Option<UserId> {
        let Some(record) = self.records.get(session_id) else {
            tracing::debug!("rejected unknown session");
            return None;
        };

        let Some(ttl) = self.config.ttl() else {
            return Some(record.user_id().clone());
        };

        if !record.is_expired_at(self.clock.now(), ttl) {
            return Some(record.user_id().clone());
        }

        let user_id = record.user_id().clone();
        match self.config.eviction {
            EvictionPolicy::Purge => {
                self.evict(session_id);
                tracing::debug!(%user_id, "rejected expired session, purged");
            }
            EvictionPolicy::Retain => {
                tracing::debug!(%user_id, "rejected expired session");
            }
        }
        None
    }

    /// Ends a session explicitly (logout).
    ///
    /// Returns `true` if the session existed. Works on expired sessions
    /// too, so a retained record can still be cleaned up.
    pub fn destroy_session(&mut self, session_id: &str) -> bool {
        let Some(record) = self.records.get(session_id) else {
            return false;
        };
        let user_id = record.user_id().clone();

        self.evict(session_id);
        tracing::info!(%user_id, "session destroyed");
        true
    }

    /// Removes every expired session and returns their tokens.
    ///
    /// Does nothing when sessions never expire. This is the unit of work
    /// of the background sweeper, and it applies regardless of the
    /// eviction policy: retaining only governs what a lookup does.
    pub fn purge_expired(&mut self) -> Vec<SessionId> {
        let Some(ttl) = self.config.ttl() else {
            return Vec::new();
        };
        let now = self.clock.now();

        let expired: Vec<SessionId> = self
            .records
            .values()
            .filter(|record| record.is_expired_at(now, ttl))
            .map(|record| record.session_id().clone())
            .collect();

        for session_id in &expired {
            self.evict(session_id.as_str());
        }

        if !expired.is_empty() {
            tracing::info!(
                purged = expired.len(),
                remaining = self.records.len(),
                "expired sessions purged"
            );
        }
        expired
    }

    /// Looks up a record without checking its lifetime.
    pub fn get(&self, session_id: &str) -> Option<&SessionRecord> {
        self.records.get(session_id)
    }

    /// Number of records held, expired-but-retained ones included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no records are held.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The configuration this authenticator was built with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Drops the record and the store's association together, so the two
    /// maps never disagree about which tokens exist.
    fn evict(&mut self, session_id: &str) {
        self.records.remove(session_id);
        self.store.destroy(session_id);
    }
}

// =========================================================================
// Tests
// =========================================================================
