//! Virtual clock for testing.

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::{Duration, SystemTime};

use crate::clock::Clock;

/// Clock whose `sleep` returns immediately and advances virtual time.
#[derive(Debug)]
pub struct ManualClock {
    start: SystemTime,
    elapsed: Mutex<Duration>,
}

impl ManualClock {
    /// Create a clock reading `start`.
    pub fn new(start: SystemTime) -> Self {
        Self {
            start,
            elapsed: Mutex::new(Duration::ZERO),
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> SystemTime {
        self.start + self.elapsed()
    }

    /// Total virtual time slept so far.
    pub fn elapsed(&self) -> Duration {
        *self.elapsed.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Move virtual time forward without sleeping.
    pub fn advance(&self, duration: Duration) {
        *self.elapsed.lock().unwrap_or_else(|e| e.into_inner()) += duration;
    }
}

#[async_trait]
impl Clock for ManualClock {
    fn now(&self) -> SystemTime {
        ManualClock::now(self)
    }

    async fn sleep(&self, duration: Duration) {
        self.advance(duration);
        tokio::task::yield_now().await;
    }
}
