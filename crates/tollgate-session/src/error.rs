//! Error types for the session layer.
//!
//! The core operations ([`create_session`] and [`resolve_identity`]) never
//! return these: they answer with `Option`, because a rejected session is
//! an everyday outcome, not an exceptional one. The error enums exist for
//! the layers that need a `Result`: the async [`Authenticator`] hook and
//! configuration parsing.
//!
//! [`create_session`]: crate::ExpiringAuthenticator::create_session
//! [`resolve_identity`]: crate::ExpiringAuthenticator::resolve_identity
//! [`Authenticator`]: crate::Authenticator

use tollgate_core::UserId;

/// Errors surfaced by the session layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The presented token does not authenticate anyone.
    ///
    /// Deliberately one variant for unknown, expired, and malformed
    /// tokens: the caller's only decision is accept or reject.
    #[error("not authenticated")]
    Unauthenticated,

    /// The store refused to create a session for this identity
    /// (for example, an empty user id).
    #[error("session could not be created for identity \"{0}\"")]
    CreationRejected(UserId),
}

/// Errors produced while reading configuration values.
///
/// [`SessionConfig::from_env`](crate::SessionConfig::from_env) never
/// returns these; it logs them and falls back to defaults. Callers that
/// would rather refuse to start on a bad value use
/// [`SessionConfig::try_from_env`](crate::SessionConfig::try_from_env).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The value is not a non-negative integer.
    #[error("{key} must be a non-negative integer, got {value:?}")]
    InvalidNumber { key: String, value: String },

    /// The eviction policy name is not recognized.
    #[error("unknown eviction policy {0:?} (expected \"purge\" or \"retain\")")]
    UnknownEviction(String),
}
