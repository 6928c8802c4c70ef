//! Unified error type for Tollgate.

use tollgate_session::{ConfigError, SessionError};

/// Top-level error that wraps the crate-specific errors.
///
/// When using the `tollgate` facade you deal with this single error type
/// instead of importing errors from each sub-crate. `#[from]` generates the
/// `From` impls, so `?` converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum TollgateError {
    /// A session-level error (not authenticated, creation refused).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A configuration value could not be parsed (strict constructors
    /// such as `Gate::try_from_env`).
    #[error(transparent)]
    Config(#[from] ConfigError),
}
