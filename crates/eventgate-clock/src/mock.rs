use chrono::{Duration, TimeZone, Utc};
use eventgate_types::Timestamp;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::clock::ClockSource;

/// Manually driven clock for tests and replays.
///
/// Clones share the same instant, so a runner can hand one clone to the code
/// under test and keep another to move time.
#[derive(Debug, Clone)]
pub struct MockClock {
    now: Arc<Mutex<Timestamp>>,
}

impl MockClock {
    /// Create a clock frozen at `start`
    pub fn new(start: Timestamp) -> Self {
        MockClock {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Create a clock frozen at a unix timestamp in seconds.
    /// Out-of-range values fall back to the unix epoch.
    pub fn at_unix_secs(secs: i64) -> Self {
        let start = Utc
            .timestamp_opt(secs, 0)
            .single()
            .unwrap_or_default();
        Self::new(start)
    }

    fn guard(&self) -> MutexGuard<'_, Timestamp> {
        // A poisoned lock still holds a valid instant
        self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Jump to an absolute instant (backwards is allowed)
    pub fn set(&self, instant: Timestamp) {
        tracing::trace!(%instant, "mock clock set");
        *self.guard() = instant;
    }

    /// Move forward by `delta`; negative deltas rewind
    pub fn advance(&self, delta: Duration) -> Timestamp {
        let mut now = self.guard();
        *now = now.checked_add_signed(delta).unwrap_or(*now);
        tracing::trace!(instant = %*now, "mock clock advanced");
        *now
    }

    /// Move by whole seconds. Counts beyond the `Duration` range leave the clock in place.
    pub fn advance_secs(&self, secs: i64) -> Timestamp {
        match Duration::try_seconds(secs) {
            Some(delta) => self.advance(delta),
            None => self.now(),
        }
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new(Timestamp::default())
    }
}

impl ClockSource for MockClock {
    fn now(&self) -> Timestamp {
        *self.guard()
    }
}
