//! Bounded polling for downloaded artifacts.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::clock::Clock;

use super::error::ObserveError;
use super::traits::DirectoryObserver;
use super::types::{ArtifactCandidate, WaitPolicy};

/// Waits for a fresh artifact to show up in the download directory.
pub struct ArtifactWaiter {
    observer: Arc<dyn DirectoryObserver>,
    clock: Arc<dyn Clock>,
    policy: WaitPolicy,
}

impl ArtifactWaiter {
    /// Creates a waiter over the given observer and clock.
    pub fn new(
        observer: Arc<dyn DirectoryObserver>,
        clock: Arc<dyn Clock>,
        policy: WaitPolicy,
    ) -> Self {
        Self {
            observer,
            clock,
            policy,
        }
    }

    /// The policy this waiter polls with.
    pub fn policy(&self) -> &WaitPolicy {
        &self.policy
    }

    /// Picks the newest finished artifact in `dir`, if any.
    fn newest_candidate(&self, files: Vec<ArtifactCandidate>) -> Option<ArtifactCandidate> {
        files
            .into_iter()
            .filter(|c| self.policy.is_candidate(&c.path))
            .max_by_key(|c| c.modified)
    }

    /// Polls `dir` until a fresh artifact appears or the attempt budget runs out.
    ///
    /// Returns `Ok(None)` on timeout. The newest matching file is accepted only
    /// if it was modified within the recency window, which keeps leftovers of
    /// earlier downloads from being picked up.
    pub async fn wait_for_artifact(
        &self,
        dir: &Path,
    ) -> Result<Option<ArtifactCandidate>, ObserveError> {
        for attempt in 1..=self.policy.max_attempts {
            let files = self.observer.list(dir).await?;

            if let Some(candidate) = self.newest_candidate(files) {
                let age = candidate.age(self.clock.now());
                if age < self.policy.recency_window {
                    debug!(
                        "Artifact {} found on attempt {}",
                        candidate.path.display(),
                        attempt
                    );
                    return Ok(Some(candidate));
                }
                debug!(
                    "Newest artifact {} is stale ({}s old), attempt {}/{}",
                    candidate.file_name(),
                    age.as_secs(),
                    attempt,
                    self.policy.max_attempts
                );
            }

            if attempt < self.policy.max_attempts {
                self.clock.sleep(self.policy.poll_interval).await;
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ManualClock;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::{Duration, SystemTime};

    /// Observer returning a scripted listing per call; the last entry repeats.
    struct ScriptedObserver {
        script: Vec<Vec<ArtifactCandidate>>,
        calls: Mutex<usize>,
    }

    impl ScriptedObserver {
        fn new(script: Vec<Vec<ArtifactCandidate>>) -> Self {
            Self {
                script,
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl DirectoryObserver for ScriptedObserver {
        async fn list(&self, _dir: &Path) -> Result<Vec<ArtifactCandidate>, ObserveError> {
            let mut calls = self.calls.lock().unwrap();
            let idx = (*calls).min(self.script.len().saturating_sub(1));
            *calls += 1;
            Ok(self.script.get(idx).cloned().unwrap_or_default())
        }
    }

    fn waiter(observer: Arc<ScriptedObserver>, clock: Arc<ManualClock>) -> ArtifactWaiter {
        ArtifactWaiter::new(observer, clock, WaitPolicy::default())
    }

    #[tokio::test]
    async fn test_artifact_arrives_after_a_few_polls() {
        let clock = Arc::new(ManualClock::new(SystemTime::now()));
        let arrival = clock.now() + Duration::from_secs(3);
        let observer = Arc::new(ScriptedObserver::new(vec![
            vec![],
            vec![ArtifactCandidate::new("/dl/x.zip.part", arrival)],
            vec![],
            vec![ArtifactCandidate::new("/dl/x.zip", arrival)],
        ]));

        let found = waiter(Arc::clone(&observer), Arc::clone(&clock))
            .wait_for_artifact(Path::new("/dl"))
            .await
            .unwrap();

        assert_eq!(found.unwrap().file_name(), "x.zip");
        assert_eq!(observer.calls(), 4);
        assert_eq!(clock.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_newest_candidate_wins() {
        let clock = Arc::new(ManualClock::new(SystemTime::now()));
        let now = clock.now();
        let observer = Arc::new(ScriptedObserver::new(vec![vec![
            ArtifactCandidate::new("/dl/older.zip", now - Duration::from_secs(4)),
            ArtifactCandidate::new("/dl/newer.zip", now - Duration::from_secs(1)),
        ]]));

        let found = waiter(observer, clock)
            .wait_for_artifact(Path::new("/dl"))
            .await
            .unwrap();
        assert_eq!(found.unwrap().file_name(), "newer.zip");
    }

    #[tokio::test]
    async fn test_stale_file_is_ignored_until_timeout() {
        let clock = Arc::new(ManualClock::new(SystemTime::now()));
        let stale = clock.now() - Duration::from_secs(60);
        let observer = Arc::new(ScriptedObserver::new(vec![vec![ArtifactCandidate::new(
            "/dl/leftover.zip",
            stale,
        )]]));

        let found = waiter(Arc::clone(&observer), Arc::clone(&clock))
            .wait_for_artifact(Path::new("/dl"))
            .await
            .unwrap();

        assert!(found.is_none());
        assert_eq!(observer.calls(), 30);
        assert_eq!(clock.elapsed(), Duration::from_secs(29));
    }

    #[tokio::test]
    async fn test_timeout_with_empty_directory() {
        let clock = Arc::new(ManualClock::new(SystemTime::now()));
        let observer = Arc::new(ScriptedObserver::new(vec![vec![]]));
        let waiter = ArtifactWaiter::new(
            observer.clone(),
            clock,
            WaitPolicy::default().with_max_attempts(5),
        );

        assert!(waiter
            .wait_for_artifact(Path::new("/dl"))
            .await
            .unwrap()
            .is_none());
        assert_eq!(observer.calls(), 5);
    }
}
