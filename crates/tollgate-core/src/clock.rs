//! Time sources.
//!
//! Expiration is "creation time + TTL compared against now", so anything
//! that decides whether a session is still valid needs to ask someone what
//! time it is. Instead of calling `Instant::now()` directly, Tollgate asks
//! a [`Clock`]. Production code uses [`SystemClock`]; tests use
//! [`ManualClock`] and move time forward by hand, which makes boundary
//! cases (exactly at the TTL, one nanosecond past it) deterministic
//! without sleeping.
//!
//! `Instant` is the monotonic clock: it never jumps backwards when the
//! system time is adjusted, which is what we want for measuring lifetimes.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// A source of "now".
///
/// `Send + Sync + 'static` because the clock lives inside the
/// authenticator, which may be shared across Tokio tasks.
pub trait Clock: Send + Sync + 'static {
    /// Returns the current instant.
    fn now(&self) -> Instant;
}

/// The real monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
///
/// Cloning a `ManualClock` gives another handle to the SAME clock (the
/// offset lives behind an `Arc`). A test keeps one handle and gives the
/// other to the authenticator, then calls [`advance`](Self::advance) to
/// simulate time passing.
///
/// ```rust
/// use std::time::Duration;
/// use tollgate_core::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let t0 = clock.now();
/// clock.advance(Duration::from_secs(6));
/// assert_eq!(clock.now() - t0, Duration::from_secs(6));
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    offset: Arc<Mutex<Duration>>,
}

impl ManualClock {
    /// Creates a clock frozen at the moment of construction.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        // A poisoned lock only means another test thread panicked while
        // holding it; the stored Duration is still valid.
        let mut offset =
            self.offset.lock().unwrap_or_else(|e| e.into_inner());
        *offset += by;
    }

    /// Moves the clock forward by `secs` whole seconds.
    pub fn advance_secs(&self, secs: u64) {
        self.advance(Duration::from_secs(secs));
    }

    /// Returns how far the clock has been advanced since construction.
    pub fn elapsed(&self) -> Duration {
        *self.offset.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }
}
