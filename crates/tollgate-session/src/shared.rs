//! A cloneable, lock-protected handle to an [`ExpiringAuthenticator`].
//!
//! Request handlers run as separate Tokio tasks, so they can't all hold
//! `&mut ExpiringAuthenticator`. `SharedAuthenticator` wraps it in
//! `Arc<Mutex<_>>`: cloning the handle is cheap, and every operation takes
//! the lock for its entire read-check-write sequence. Two tasks resolving
//! the same expired token therefore can't both see "expired" and both try
//! to purge it; one purges, the other sees "unknown".

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tollgate_core::{Clock, SessionId, SystemClock, UserId};
use tollgate_store::{MemorySessionStore, SessionStore};

use crate::{Authenticator, ExpiringAuthenticator, SessionError};

/// Shared access to one [`ExpiringAuthenticator`].
pub struct SharedAuthenticator<S = MemorySessionStore, C = SystemClock> {
    inner: Arc<Mutex<ExpiringAuthenticator<S, C>>>,
}

// Written by hand: `#[derive(Clone)]` would demand `S: Clone, C: Clone`,
// but only the `Arc` is cloned.
impl<S, C> Clone for SharedAuthenticator<S, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: SessionStore, C: Clock> SharedAuthenticator<S, C> {
    /// Takes ownership of `authenticator` and makes it shareable.
    pub fn new(authenticator: ExpiringAuthenticator<S, C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(authenticator)),
        }
    }

    /// See [`ExpiringAuthenticator::create_session`].
    pub async fn create_session(&self, user_id: &UserId) -> Option<SessionId> {
        self.inner.lock().await.create_session(user_id)
    }

    /// See [`ExpiringAuthenticator::resolve_identity`].
    pub async fn resolve_identity(&self, session_id: &str) -> Option<UserId> {
        self.inner.lock().await.resolve_identity(session_id)
    }

    /// See [`ExpiringAuthenticator::destroy_session`].
    pub async fn destroy_session(&self, session_id: &str) -> bool {
        self.inner.lock().await.destroy_session(session_id)
    }

    /// See [`ExpiringAuthenticator::purge_expired`].
    pub async fn purge_expired(&self) -> Vec<SessionId> {
        self.inner.lock().await.purge_expired()
    }

    /// Number of records currently held.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    /// Returns `true` if no records are held.
    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }

    /// Locks the authenticator for a multi-step operation.
    ///
    /// Everything done through the guard is atomic with respect to other
    /// handles. Don't hold it across unrelated `.await`s.
    pub async fn lock(&self) -> MutexGuard<'_, ExpiringAuthenticator<S, C>> {
        self.inner.lock().await
    }
}

impl<S: SessionStore, C: Clock> Authenticator for SharedAuthenticator<S, C> {
    async fn authenticate(&self, token: &str) -> Result<UserId, SessionError> {
        self.resolve_identity(token)
            .await
            .ok_or(SessionError::Unauthenticated)
    }
}
