//! Time source abstraction.
//!
//! Every wait in the pipeline (settle delays, artifact polling) goes through a
//! [`Clock`], so tests can replace real sleeps with virtual time.

use std::time::{Duration, SystemTime};

use async_trait::async_trait;

/// A source of wall-clock time that can also sleep.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Current wall-clock time.
    fn now(&self) -> SystemTime;

    /// Suspends the caller for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Real clock backed by the system time and tokio timers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
