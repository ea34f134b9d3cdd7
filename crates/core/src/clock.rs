// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction so breaker cooldowns and focus-stack ages are testable

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Source of monotonic and wall-clock time
pub trait Clock: Clone + Send + Sync + 'static {
    /// Monotonic instant, used for cooldowns and deadlines
    fn now(&self) -> Instant;

    /// Wall-clock milliseconds since the Unix epoch, used for persisted timestamps
    fn epoch_ms(&self) -> u64;
}

/// Real system clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn epoch_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Epoch the fake clock starts at (2026-01-01T00:00:00Z).
    const FAKE_EPOCH_MS: u64 = 1_767_225_600_000;

    struct FakeClockState {
        base: Instant,
        offset: Duration,
    }

    /// Manually advanced clock for tests. Clones share the same time.
    #[derive(Clone)]
    pub struct FakeClock {
        inner: Arc<Mutex<FakeClockState>>,
    }

    impl Default for FakeClock {
        fn default() -> Self {
            Self {
                inner: Arc::new(Mutex::new(FakeClockState {
                    base: Instant::now(),
                    offset: Duration::ZERO,
                })),
            }
        }
    }

    impl FakeClock {
        pub fn new() -> Self {
            Self::default()
        }

        /// Move time forward
        pub fn advance(&self, by: Duration) {
            self.inner.lock().offset += by;
        }
    }

    impl Clock for FakeClock {
        fn now(&self) -> Instant {
            let state = self.inner.lock();
            state.base + state.offset
        }

        fn epoch_ms(&self) -> u64 {
            FAKE_EPOCH_MS + self.inner.lock().offset.as_millis() as u64
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeClock;

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
