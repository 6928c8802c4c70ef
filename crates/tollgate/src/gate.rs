//! `Gate` builder and handle.
//!
//! This is the entry point for using Tollgate from an application. It
//! ties the layers together: configuration → store → expiring
//! authenticator → (optional) background sweeper.

use tokio::task::JoinHandle;
use tollgate_core::{Clock, SessionId, SystemClock, UserId};
use tollgate_session::{
    Authenticator, ExpiringAuthenticator, SessionConfig, SessionError,
    SharedAuthenticator, spawn_sweeper,
};
use tollgate_store::{MemorySessionStore, SessionStore};

use crate::TollgateError;

/// Builder for configuring a [`Gate`].
///
/// # Example
///
/// ```rust
/// use tollgate::prelude::*;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), TollgateError> {
/// let gate = Gate::builder()
///     .config(SessionConfig::with_duration_secs(3600))
///     .build();
///
/// let sid = gate.login(&UserId::new("alice")).await?;
/// assert_eq!(
///     gate.current_user(Some(sid.as_str())).await,
///     Some(UserId::new("alice"))
/// );
/// # Ok(())
/// # }
/// ```
pub struct GateBuilder<S = MemorySessionStore, C = SystemClock> {
    config: SessionConfig,
    store: S,
    clock: C,
}

impl GateBuilder {
    /// Creates a builder with default settings: sessions never expire, an
    /// in-memory store, the system clock, no sweeper.
    pub fn new() -> Self {
        Self {
            config: SessionConfig::default(),
            store: MemorySessionStore::new(),
            clock: SystemClock,
        }
    }
}

impl Default for GateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, C> GateBuilder<S, C> {
    /// Sets the session configuration.
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the base session store.
    pub fn store<S2: SessionStore>(self, store: S2) -> GateBuilder<S2, C> {
        GateBuilder {
            config: self.config,
            store,
            clock: self.clock,
        }
    }

    /// Replaces the time source.
    pub fn clock<C2: Clock>(self, clock: C2) -> GateBuilder<S, C2> {
        GateBuilder {
            config: self.config,
            store: self.store,
            clock,
        }
    }
}

impl<S: SessionStore, C: Clock> GateBuilder<S, C> {
    /// Builds the gate.
    ///
    /// If the config enables the sweeper (`sweep_interval_secs > 0`) a
    /// background task is spawned, so this must then be called from
    /// inside a Tokio runtime.
    pub fn build(self) -> Gate<S, C> {
        let sweep_interval = self.config.sweep_interval();
        let authenticator = SharedAuthenticator::new(
            ExpiringAuthenticator::with_parts(
                self.store,
                self.clock,
                self.config,
            ),
        );

        let sweeper = sweep_interval
            .map(|every| spawn_sweeper(authenticator.clone(), every));

        tracing::info!(sweeper = sweeper.is_some(), "session gate ready");
        Gate {
            authenticator,
            sweeper,
        }
    }
}

/// The application-facing session handle.
///
/// Cheap to share behind an `Arc`; every method takes `&self`. Dropping
/// the gate stops its sweeper.
pub struct Gate<S = MemorySessionStore, C = SystemClock> {
    authenticator: SharedAuthenticator<S, C>,
    sweeper: Option<JoinHandle<()>>,
}

impl Gate {
    /// Creates a new builder.
    pub fn builder() -> GateBuilder {
        GateBuilder::new()
    }

    /// Builds a gate from `SESSION_DURATION`, `SESSION_EVICTION` and
    /// `SESSION_SWEEP_INTERVAL`.
    pub fn from_env() -> Self {
        GateBuilder::new().config(SessionConfig::from_env()).build()
    }

    /// Like [`from_env`](Self::from_env), but refuses malformed settings.
    ///
    /// # Errors
    /// [`TollgateError::Config`] if a variable is set but unparseable.
    pub fn try_from_env() -> Result<Self, TollgateError> {
        Self::try_from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a gate from settings read through `lookup`, strictly.
    ///
    /// # Errors
    /// [`TollgateError::Config`] if a value is present but unparseable.
    pub fn try_from_lookup<F>(lookup: F) -> Result<Self, TollgateError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = SessionConfig::try_from_lookup(lookup)?;
        Ok(GateBuilder::new().config(config).build())
    }
}

impl<S: SessionStore, C: Clock> Gate<S, C> {
    /// Starts a session for `user_id` (call after verifying credentials).
    ///
    /// # Errors
    /// [`SessionError::CreationRejected`] if the store refuses the
    /// identity.
    pub async fn login(&self, user_id: &UserId) -> Result<SessionId, TollgateError> {
        self.authenticator
            .create_session(user_id)
            .await
            .ok_or_else(|| SessionError::CreationRejected(user_id.clone()).into())
    }

    /// Returns the user behind a presented token, if any.
    ///
    /// `None` in means no token was presented (no cookie, no header) and
    /// always yields `None`.
    pub async fn current_user(&self, session_id: Option<&str>) -> Option<UserId> {
        let session_id = session_id?;
        self.authenticator.resolve_identity(session_id).await
    }

    /// Ends a session. Returns `true` if it existed.
    pub async fn logout(&self, session_id: &str) -> bool {
        self.authenticator.destroy_session(session_id).await
    }

    /// The shared authenticator behind this gate.
    pub fn authenticator(&self) -> &SharedAuthenticator<S, C> {
        &self.authenticator
    }

    /// Returns `true` if a background sweeper is running.
    pub fn has_sweeper(&self) -> bool {
        self.sweeper.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl<S: SessionStore, C: Clock> Authenticator for Gate<S, C> {
    async fn authenticate(&self, token: &str) -> Result<UserId, SessionError> {
        self.authenticator.authenticate(token).await
    }
}

impl<S, C> Drop for Gate<S, C> {
    fn drop(&mut self) {
        if let Some(sweeper) = self.sweeper.take() {
            sweeper.abort();
        }
    }
}
