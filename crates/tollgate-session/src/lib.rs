//! Expiring session authentication for Tollgate.
//!
//! This crate turns the plain token store from `tollgate-store` into
//! something you can authenticate requests with:
//!
//! 1. **Issuing**: [`ExpiringAuthenticator::create_session`] mints a
//!    token and stamps it with the current time
//! 2. **Validating**: [`ExpiringAuthenticator::resolve_identity`] returns
//!    the user only while `now <= created_at + SESSION_DURATION`
//! 3. **Cleanup**: expired records are purged when a lookup finds them
//!    ([`EvictionPolicy::Purge`]) and by an optional background sweeper
//!
//! For multi-task servers, wrap the authenticator in a
//! [`SharedAuthenticator`]; it implements the async [`Authenticator`]
//! hook that request handlers call.

#![allow(async_fn_in_trait)]

mod auth;
mod authenticator;
mod config;
mod error;
mod session;
mod shared;
mod sweeper;

pub use auth::Authenticator;
pub use authenticator::ExpiringAuthenticator;
pub use config::{
    EvictionPolicy, SESSION_DURATION_VAR, SESSION_EVICTION_VAR,
    SESSION_SWEEP_INTERVAL_VAR, SessionConfig, parse_non_negative,
};
pub use error::{ConfigError, SessionError};
pub use session::{SessionRecord, Validity};
pub use shared::SharedAuthenticator;
pub use sweeper::{MIN_SWEEP_INTERVAL, spawn_sweeper};
