//! Identity types shared by every layer of Tollgate.
//!
//! Two strings flow through the whole system: the user a session belongs
//! to, and the opaque token that proves it. Both are plain `String`s
//! underneath, so we wrap each one in its own type to keep them from being
//! mixed up.

// `Serialize`/`Deserialize` let callers put these into cookies, JSON
// bodies, or config files without any custom glue.
use serde::{Deserialize, Serialize};

use std::borrow::Borrow;
use std::fmt;

// ---------------------------------------------------------------------------
// UserId
// ---------------------------------------------------------------------------

/// The identity a session authenticates.
///
/// This is a "newtype wrapper" around `String`. Tollgate never looks
/// inside it beyond checking that it is non-empty; the user model itself
/// lives in whatever system owns your accounts.
///
/// `#[serde(transparent)]` makes `UserId("u1")` serialize as just `"u1"`
/// instead of `{ "0": "u1" }`.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    /// Creates a `UserId` from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the identity is the empty string.
    ///
    /// An empty identity cannot own a session: the store refuses it.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// ---------------------------------------------------------------------------
// SessionId
// ---------------------------------------------------------------------------

/// An opaque session token.
///
/// The token carries no information about the user: without the store
/// that minted it, it is just a random string. Clients get it back from a
/// login and present it on every later request.
///
/// `Borrow<str>` is implemented so a `HashMap<SessionId, _>` can be
/// queried with a plain `&str` (which is what arrives from a cookie or a
/// header) without allocating a new `SessionId` first.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    /// Creates a `SessionId` from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for SessionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
