//! Background sweeper for expired sessions.
//!
//! Lookups already evict the expired sessions they run into. Sessions
//! that are never presented again would linger forever, though, so a
//! long-running server also sweeps periodically.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tollgate_core::Clock;
use tollgate_store::SessionStore;

use crate::SharedAuthenticator;

/// Shortest period the sweeper will run at.
pub const MIN_SWEEP_INTERVAL: Duration = Duration::from_secs(1);

/// Spawns a task that calls [`purge_expired`] every `every`.
///
/// Periods below [`MIN_SWEEP_INTERVAL`] are raised to it. The task runs
/// until the returned handle is aborted (or the runtime shuts down).
///
/// Must be called from inside a Tokio runtime.
///
/// [`purge_expired`]: SharedAuthenticator::purge_expired
pub fn spawn_sweeper<S, C>(
    authenticator: SharedAuthenticator<S, C>,
    every: Duration,
) -> JoinHandle<()>
where
    S: SessionStore,
    C: Clock,
{
    let every = if every < MIN_SWEEP_INTERVAL {
        tracing::warn!(
            ?every,
            min = ?MIN_SWEEP_INTERVAL,
            "sweep interval too short, using the minimum"
        );
        MIN_SWEEP_INTERVAL
    } else {
        every
    };

    tokio::spawn(async move {
        let mut ticker = time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        // The first tick completes immediately; skip it.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let purged = authenticator.purge_expired().await;
            if purged.is_empty() {
                tracing::trace!("sweep found no expired sessions");
            } else {
                tracing::debug!(purged = purged.len(), "sweep completed");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use tollgate_core::{ManualClock, UserId};
    use tollgate_store::MemorySessionStore;

    use super::*;
    use crate::{ExpiringAuthenticator, SessionConfig};

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_purges_expired_sessions() {
        let clock = ManualClock::new();
        let shared = SharedAuthenticator::new(ExpiringAuthenticator::with_parts(
            MemorySessionStore::new(),
            clock.clone(),
            SessionConfig::with_duration_secs(5),
        ));
        shared.create_session(&UserId::new("u1")).await.unwrap();

        let handle = spawn_sweeper(shared.clone(), Duration::from_secs(10));

        // Not expired yet: a sweep leaves it alone.
        time::sleep(Duration::from_secs(11)).await;
        assert_eq!(shared.len().await, 1);

        // Expire it, then let the next sweep run.
        clock.advance_secs(6);
        time::sleep(Duration::from_secs(10)).await;
        assert_eq!(shared.len().await, 0);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_zero_interval_is_clamped() {
        let shared = SharedAuthenticator::new(ExpiringAuthenticator::new(
            SessionConfig::with_duration_secs(5),
        ));

        // `time::interval` panics on a zero period; this must not.
        let handle = spawn_sweeper(shared, Duration::ZERO);
        time::sleep(Duration::from_secs(3)).await;

        assert!(!handle.is_finished(), "sweeper should still be running");
        handle.abort();
    }
}
