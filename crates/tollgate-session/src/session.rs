//! Session records: what the authenticator remembers about each token.
//!
//! A record answers three questions:
//! - WHICH token it belongs to (`SessionId`)
//! - WHO the token authenticates (`UserId`)
//! - WHEN it was issued (so we know when it stops being accepted)
//!
//! All three are fixed at creation. The fields are private and only
//! readable through getters, so nothing outside this crate can backdate a
//! session or move it to another user.

use std::time::{Duration, Instant};

use tollgate_core::{SessionId, UserId};

// ---------------------------------------------------------------------------
// SessionRecord
// ---------------------------------------------------------------------------

/// One issued session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    session_id: SessionId,
    user_id: UserId,
    created_at: Instant,
}

impl SessionRecord {
    pub(crate) fn new(
        session_id: SessionId,
        user_id: UserId,
        created_at: Instant,
    ) -> Self {
        Self {
            session_id,
            user_id,
            created_at,
        }
    }

    /// The token this record is keyed by.
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// The identity this session authenticates.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// When the session was created, according to the authenticator's clock.
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// The last instant at which the session is still accepted.
    ///
    /// Returns `None` if `created_at + ttl` doesn't fit in an `Instant`,
    /// which only happens for absurdly long lifetimes. Such a session is
    /// treated as never expiring.
    pub fn expires_at(&self, ttl: Duration) -> Option<Instant> {
        self.created_at.checked_add(ttl)
    }

    /// Returns `true` if the session is past its lifetime at `now`.
    ///
    /// The comparison is strict: a request arriving exactly at
    /// `created_at + ttl` is still accepted.
    pub fn is_expired_at(&self, now: Instant, ttl: Duration) -> bool {
        match self.expires_at(ttl) {
            Some(expiration) => now > expiration,
            None => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Validity
// ---------------------------------------------------------------------------

/// The state of a presented token at a given moment.
///
/// ```text
///   (never issued) ──→ Unknown
///
///   create_session ──→ Active ──(now > created_at + ttl)──→ Expired
///                                                             │
///                                     purge / destroy ────────┘──→ Unknown
/// ```
///
/// Callers of `resolve_identity` never see the difference between
/// `Unknown` and `Expired`; both are "not authenticated". The distinction
/// exists for logging and for [`inspect`](crate::ExpiringAuthenticator::inspect).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    /// No record for this token.
    Unknown,
    /// The token authenticates its user.
    Active,
    /// A record exists but its lifetime has elapsed.
    Expired,
}

impl Validity {
    /// Returns `true` only for [`Validity::Active`].
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_at(created_at: Instant) -> SessionRecord {
        SessionRecord::new(
            SessionId::new("sid"),
            UserId::new("u1"),
            created_at,
        )
    }

    #[test]
    fn test_is_expired_at_boundary_is_still_valid() {
        let t0 = Instant::now();
        let ttl = Duration::from_secs(5);
        let record = record_at(t0);

        assert!(!record.is_expired_at(t0, ttl));
        assert!(!record.is_expired_at(t0 + ttl, ttl));
        assert!(record.is_expired_at(t0 + ttl + Duration::from_nanos(1), ttl));
    }

    #[test]
    fn test_is_expired_at_overflowing_ttl_never_expires() {
        let t0 = Instant::now();
        let record = record_at(t0);

        assert!(!record.is_expired_at(t0 + Duration::from_secs(1), Duration::MAX));
        assert_eq!(record.expires_at(Duration::MAX), None);
    }

    #[test]
    fn test_getters_return_creation_values() {
        let t0 = Instant::now();
        let record = record_at(t0);

        assert_eq!(record.session_id().as_str(), "sid");
        assert_eq!(record.user_id().as_str(), "u1");
        assert_eq!(record.created_at(), t0);
    }

    #[test]
    fn test_validity_is_active() {
        assert!(Validity::Active.is_active());
        assert!(!Validity::Expired.is_active());
        assert!(!Validity::Unknown.is_active());
    }
}
