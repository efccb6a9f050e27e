mod clock;
mod mock;

pub use clock::{ClockSource, SystemClock};
pub use mock::MockClock;
