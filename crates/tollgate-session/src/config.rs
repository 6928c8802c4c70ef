//! Session configuration and environment loading.
//!
//! The only setting the authenticator truly needs is the session lifetime
//! (`SESSION_DURATION`, in seconds). It is read once, when the
//! authenticator is built, and never changes afterwards.
//!
//! # Fallback rule
//!
//! Every numeric setting follows the same rule: if the variable is unset,
//! or is not a non-negative integer, the value is `0`. For
//! `SESSION_DURATION` that means "sessions never expire". A bad value is
//! logged at `warn` level so a typo doesn't silently go unnoticed.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Environment variable holding the session lifetime in seconds.
pub const SESSION_DURATION_VAR: &str = "SESSION_DURATION";

/// Environment variable holding the sweeper period in seconds.
pub const SESSION_SWEEP_INTERVAL_VAR: &str = "SESSION_SWEEP_INTERVAL";

/// Environment variable selecting the [`EvictionPolicy`].
pub const SESSION_EVICTION_VAR: &str = "SESSION_EVICTION";

// ---------------------------------------------------------------------------
// EvictionPolicy
// ---------------------------------------------------------------------------

/// What `resolve_identity` does when it finds an expired session.
///
/// Either way the lookup fails. The difference is memory:
///
/// - **Purge**: the record is removed on the spot, so expired sessions
///   don't pile up. A second lookup of the same token sees "unknown".
/// - **Retain**: the record stays where it is. Repeated lookups keep
///   failing the same way, and nothing is reclaimed until an explicit
///   [`purge_expired`](crate::ExpiringAuthenticator::purge_expired) or
///   the background sweeper runs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum EvictionPolicy {
    #[default]
    Purge,
    Retain,
}

impl FromStr for EvictionPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "purge" => Ok(Self::Purge),
            "retain" => Ok(Self::Retain),
            _ => Err(ConfigError::UnknownEviction(s.to_string())),
        }
    }
}

impl std::fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Purge => write!(f, "purge"),
            Self::Retain => write!(f, "retain"),
        }
    }
}

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Configuration for an [`ExpiringAuthenticator`](crate::ExpiringAuthenticator).
///
/// `#[serde(default)]` lets a config file specify only the fields it
/// cares about; the rest come from [`Default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Session lifetime in seconds. Zero or negative means sessions never
    /// expire.
    pub session_duration_secs: i64,

    /// What to do with an expired record found during a lookup.
    pub eviction: EvictionPolicy,

    /// How often the background sweeper purges expired sessions, in
    /// seconds. Zero disables the sweeper.
    pub sweep_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_duration_secs: 0,
            eviction: EvictionPolicy::default(),
            sweep_interval_secs: 0,
        }
    }
}

impl SessionConfig {
    /// A config with the given lifetime and defaults for everything else.
    pub fn with_duration_secs(session_duration_secs: i64) -> Self {
        Self {
            session_duration_secs,
            ..Default::default()
        }
    }

    /// Reads the configuration from the process environment.
    ///
    /// See the [module docs](self) for the fallback rule.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary key lookup.
    ///
    /// [`from_env`](Self::from_env) is this with `std::env::var`. Tests
    /// pass a closure over a local map instead of touching the real
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let duration = read_secs(&lookup, SESSION_DURATION_VAR);
        let sweep_interval_secs =
            read_secs(&lookup, SESSION_SWEEP_INTERVAL_VAR);

        let eviction = match lookup(SESSION_EVICTION_VAR) {
            None => EvictionPolicy::default(),
            Some(raw) => raw.parse::<EvictionPolicy>().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "falling back to purge eviction");
                EvictionPolicy::default()
            }),
        };

        let config = Self {
            // Anything past i64::MAX seconds is "forever" in practice.
            session_duration_secs: i64::try_from(duration)
                .unwrap_or(i64::MAX),
            eviction,
            sweep_interval_secs,
        };

        tracing::debug!(
            session_duration_secs = config.session_duration_secs,
            eviction = %config.eviction,
            sweep_interval_secs = config.sweep_interval_secs,
            "session config loaded"
        );
        config
    }

    /// Like [`from_env`](Self::from_env), but a malformed value is an
    /// error instead of a logged fallback.
    pub fn try_from_env() -> Result<Self, ConfigError> {
        Self::try_from_lookup(|key| std::env::var(key).ok())
    }

    /// Strict counterpart of [`from_lookup`](Self::from_lookup).
    ///
    /// Unset keys still take their defaults; only values that are present
    /// but unparseable are rejected.
    pub fn try_from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| match lookup(key) {
            None => Ok(0),
            Some(raw) => parse_non_negative(key, &raw),
        };
        let duration = read(SESSION_DURATION_VAR)?;
        let sweep_interval_secs = read(SESSION_SWEEP_INTERVAL_VAR)?;

        let eviction = match lookup(SESSION_EVICTION_VAR) {
            None => EvictionPolicy::default(),
            Some(raw) => raw.parse::<EvictionPolicy>()?,
        };

        Ok(Self {
            session_duration_secs: i64::try_from(duration).unwrap_or(i64::MAX),
            eviction,
            sweep_interval_secs,
        })
    }

    /// The session lifetime, or `None` if sessions never expire.
    pub fn ttl(&self) -> Option<Duration> {
        if self.session_duration_secs <= 0 {
            None
        } else {
            Some(Duration::from_secs(self.session_duration_secs as u64))
        }
    }

    /// The sweeper period, or `None` if the sweeper is disabled.
    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval_secs > 0)
            .then(|| Duration::from_secs(self.sweep_interval_secs))
    }
}

/// Parses `value` as a non-negative integer.
///
/// Surrounding whitespace is ignored. Signs, decimals and anything else
/// are rejected with [`ConfigError::InvalidNumber`].
pub fn parse_non_negative(key: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidNumber {
            key: key.to_string(),
            value: value.to_string(),
        })
}

fn read_secs<F>(lookup: &F, key: &str) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return 0;
    };
    parse_non_negative(key, &raw).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "falling back to 0");
        0
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(
        pairs: &[(&str, &str)],
    ) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_never_expires() {
        let config = SessionConfig::default();
        assert_eq!(config.session_duration_secs, 0);
        assert_eq!(config.ttl(), None);
        assert_eq!(config.eviction, EvictionPolicy::Purge);
        assert_eq!(config.sweep_interval(), None);
    }

    #[test]
    fn test_ttl_negative_means_never() {
        assert_eq!(SessionConfig::with_duration_secs(-5).ttl(), None);
    }

    #[test]
    fn test_ttl_positive_is_seconds() {
        assert_eq!(
            SessionConfig::with_duration_secs(5).ttl(),
            Some(Duration::from_secs(5))
        );
    }

    #[test]
    fn test_from_lookup_unset_defaults_to_zero() {
        let config = SessionConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn test_from_lookup_reads_all_settings() {
        let config = SessionConfig::from_lookup(lookup_from(&[
            (SESSION_DURATION_VAR, "3600"),
            (SESSION_SWEEP_INTERVAL_VAR, "60"),
            (SESSION_EVICTION_VAR, "Retain"),
        ]));

        assert_eq!(config.session_duration_secs, 3600);
        assert_eq!(config.sweep_interval(), Some(Duration::from_secs(60)));
        assert_eq!(config.eviction, EvictionPolicy::Retain);
    }

    #[test]
    fn test_from_lookup_unparseable_duration_falls_back_to_zero() {
        for bad in ["abc", "-5", "1.5", ""] {
            let config = SessionConfig::from_lookup(lookup_from(&[(
                SESSION_DURATION_VAR,
                bad,
            )]));
            assert_eq!(
                config.session_duration_secs, 0,
                "{bad:?} should fall back to 0"
            );
        }
    }

    #[test]
    fn test_from_lookup_huge_duration_saturates() {
        let config = SessionConfig::from_lookup(lookup_from(&[(
            SESSION_DURATION_VAR,
            "18446744073709551615",
        )]));
        assert_eq!(config.session_duration_secs, i64::MAX);
    }

    #[test]
    fn test_from_lookup_unknown_eviction_falls_back_to_purge() {
        let config = SessionConfig::from_lookup(lookup_from(&[(
            SESSION_EVICTION_VAR,
            "forever",
        )]));
        assert_eq!(config.eviction, EvictionPolicy::Purge);
    }

    #[test]
    fn test_parse_non_negative_trims_whitespace() {
        assert_eq!(parse_non_negative("K", " 42 "), Ok(42));
    }

    #[test]
    fn test_parse_non_negative_rejects_sign() {
        let err = parse_non_negative("SESSION_DURATION", "-1").unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                key: "SESSION_DURATION".into(),
                value: "-1".into(),
            }
        );
        assert!(err.to_string().contains("SESSION_DURATION"));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: SessionConfig =
            serde_json::from_str(r#"{ "session_duration_secs": 5 }"#).unwrap();
        assert_eq!(config.session_duration_secs, 5);
        assert_eq!(config.eviction, EvictionPolicy::Purge);
        assert_eq!(config.sweep_interval_secs, 0);
    }

    #[test]
    fn test_eviction_policy_serde_is_lowercase() {
        let json = serde_json::to_string(&EvictionPolicy::Retain).unwrap();
        assert_eq!(json, "\"retain\"");
    }

    #[test]
    fn test_try_from_lookup_valid_values_match_lenient_loader() {
        let pairs = [
            (SESSION_DURATION_VAR, "5"),
            (SESSION_EVICTION_VAR, "retain"),
        ];
        let strict = SessionConfig::try_from_lookup(lookup_from(&pairs));
        assert_eq!(strict, Ok(SessionConfig::from_lookup(lookup_from(&pairs))));
    }

    #[test]
    fn test_try_from_lookup_bad_duration_is_error() {
        let result = SessionConfig::try_from_lookup(lookup_from(&[(
            SESSION_DURATION_VAR,
            "abc",
        )]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidNumber { ref key, .. }) if key == SESSION_DURATION_VAR
        ));
    }

    #[test]
    fn test_try_from_lookup_bad_eviction_is_error() {
        let result = SessionConfig::try_from_lookup(lookup_from(&[(
            SESSION_EVICTION_VAR,
            "forever",
        )]));
        assert_eq!(
            result,
            Err(ConfigError::UnknownEviction("forever".into()))
        );
    }
}
