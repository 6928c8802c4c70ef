//! Authentication hook for request handlers.
//!
//! Whatever sits in front of Tollgate (an HTTP router, a WebSocket
//! handshake, an RPC interceptor) only needs one question answered: "who
//! is presenting this token?" The [`Authenticator`] trait is that
//! question, as a single async method.
//!
//! [`SharedAuthenticator`](crate::SharedAuthenticator) implements it on
//! top of the expiring session store. Tests and development setups can
//! implement it with anything they like.

use tollgate_core::UserId;

use crate::SessionError;

/// Validates a presented session token and returns its identity.
///
/// # Trait bounds
///
/// - `Send + Sync` → the authenticator can be shared across async tasks
///   (Tokio may call it from different threads simultaneously).
/// - `'static` → it doesn't borrow temporary data, so it can live as
///   long as the server.
///
/// # Example
///
/// ```rust
/// use tollgate_core::UserId;
/// use tollgate_session::{Authenticator, SessionError};
///
/// /// Treats the token itself as the user id.
/// /// Only for development, never use this in production!
/// struct EchoAuthenticator;
///
/// impl Authenticator for EchoAuthenticator {
///     async fn authenticate(
///         &self,
///         token: &str,
///     ) -> Result<UserId, SessionError> {
///         if token.is_empty() {
///             return Err(SessionError::Unauthenticated);
///         }
///         Ok(UserId::new(token))
///     }
/// }
/// ```
pub trait Authenticator: Send + Sync + 'static {
    /// Resolves `token` to the user it authenticates.
    ///
    /// # Returns
    /// - `Ok(UserId)`: the token is live, here's who it belongs to
    /// - `Err(SessionError::Unauthenticated)`: unknown, expired, or
    ///   otherwise unacceptable
    fn authenticate(
        &self,
        token: &str,
    ) -> impl std::future::Future<Output = Result<UserId, SessionError>> + Send;
}
