use chrono::Utc;
use eventgate_types::Timestamp;

/// Source of "now" for the resolvers.
///
/// Resolvers never read a clock themselves: callers sample one of these and
/// pass the instant in, so a [`crate::MockClock`] can drive time travel in tests
/// and replays.
pub trait ClockSource: Send + Sync {
    /// Current instant
    fn now(&self) -> Timestamp;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

impl<C: ClockSource + ?Sized> ClockSource for &C {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

impl<C: ClockSource + ?Sized> ClockSource for Box<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

impl<C: ClockSource + ?Sized> ClockSource for std::sync::Arc<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}
