//! # Tollgate
//!
//! Session authentication with time-bounded validity.
//!
//! A [`Gate`] hands out opaque session tokens after you've verified a
//! user's credentials, and later tells you who a presented token belongs
//! to, for as long as the configured lifetime allows.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tollgate::prelude::*;
//!
//! # async fn run() -> Result<(), TollgateError> {
//! // SESSION_DURATION=3600 → tokens are good for one hour.
//! let gate = Gate::from_env();
//!
//! let sid = gate.login(&UserId::new("alice")).await?;
//! let user = gate.authenticate(sid.as_str()).await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod gate;

pub use error::TollgateError;
pub use gate::{Gate, GateBuilder};

pub mod prelude {
    //! Everything an application typically needs.

    pub use crate::{Gate, GateBuilder, TollgateError};
    pub use tollgate_core::{Clock, ManualClock, SessionId, SystemClock, UserId};
    pub use tollgate_session::{
        Authenticator, EvictionPolicy, ExpiringAuthenticator, SessionConfig,
        SessionError, SharedAuthenticator, Validity,
    };
    pub use tollgate_store::{MemorySessionStore, SessionStore};
}
