//! The base session store for Tollgate.
//!
//! A store knows two things: how to mint a fresh session identifier, and
//! which user each identifier belongs to. It has no idea what time it is.
//! Expiration is layered on top by `tollgate-session`.
//!
//! - [`SessionStore`]: the capability the authenticator consumes
//! - [`MemorySessionStore`]: a process-local `HashMap` implementation

mod memory;
mod token;

pub use memory::MemorySessionStore;
pub use token::{TOKEN_LEN, generate_token};

use tollgate_core::{SessionId, UserId};

/// Mints session identifiers and remembers which user owns each one.
///
/// This is the seam where a persistent or shared backend would plug in.
/// Every method takes `&mut self` or `&self` synchronously: the store is
/// owned by a single authenticator, and any locking happens one level up.
///
/// `Send + 'static` so the authenticator that owns the store can move
/// into a Tokio task (the background sweeper, for one).
pub trait SessionStore: Send + 'static {
    /// Creates a new session for `user_id` and returns its identifier.
    ///
    /// Returns `None` if the identity is unusable (empty). No state changes
    /// in that case.
    ///
    /// Identifiers are guaranteed distinct from every live session. They
    /// are not remembered once removed, so uniqueness against past
    /// sessions is probabilistic: with 128 random bits, reissuing one is
    /// not a practical concern.
    fn create(&mut self, user_id: &UserId) -> Option<SessionId>;

    /// Returns the user bound to `session_id`, or `None` if unknown.
    fn resolve(&self, session_id: &str) -> Option<UserId>;

    /// Forgets `session_id`. Returns `true` if it was present.
    fn destroy(&mut self, session_id: &str) -> bool;

    /// Number of live associations.
    fn len(&self) -> usize;

    /// Returns `true` if the store holds no associations.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
