//! Shared building blocks for Tollgate.
//!
//! Every other crate in the workspace depends on this one. It has no
//! behavior of its own, only the vocabulary:
//!
//! - [`UserId`] / [`SessionId`]: who is authenticated, and by which token
//! - [`Clock`]: where "now" comes from ([`SystemClock`] in production,
//!   [`ManualClock`] in tests)
//!
//! # How it fits in the stack
//!
//! ```text
//! Facade (tollgate)             ← Gate, builder, unified errors
//!     ↕
//! Session Layer (tollgate-session) ← expiry rules, shared handle, sweeper
//!     ↕
//! Store Layer (tollgate-store)  ← identifier minting, raw associations
//!     ↕
//! Core (this crate)             ← ids and clocks
//! ```

mod clock;
mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use types::{SessionId, UserId};
