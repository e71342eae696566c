//! In-memory store implementing all three core storage traits.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use examtrack_core::error::StoreError;
use examtrack_core::model::{Attempt, PracticeTest, UserStats};
use examtrack_core::results::StatsDelta;
use examtrack_core::traits::{AttemptStore, StatsStore, TestStore};

use crate::snapshot::Snapshot;

#[derive(Debug, Default)]
struct Inner {
    tests: HashMap<String, PracticeTest>,
    attempts: HashMap<String, Attempt>,
    stats: UserStats,
}

/// Single-process store backed by one mutex.
///
/// The coordinator already serializes submissions, so the lock here only
/// guards against concurrent readers observing a half-applied mutation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store preloaded with a snapshot's attempts and stats.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let attempts = snapshot
            .attempts
            .into_iter()
            .map(|a| (a.id.clone(), a))
            .collect();
        Self {
            inner: Mutex::new(Inner {
                tests: HashMap::new(),
                attempts,
                stats: snapshot.stats,
            }),
        }
    }

    /// Capture the current attempts and stats for persistence. Test
    /// definitions are not captured; they live in the bank files.
    pub fn snapshot(&self) -> Snapshot {
        let inner = self.inner.lock().expect("store mutex poisoned");
        let mut attempts: Vec<Attempt> = inner.attempts.values().cloned().collect();
        attempts.sort_by(|a, b| a.started_at.cmp(&b.started_at));
        Snapshot {
            version: crate::snapshot::SNAPSHOT_VERSION,
            stats: inner.stats.clone(),
            attempts,
        }
    }

    /// Register a test definition, replacing any previous one with the
    /// same id.
    pub fn insert_test(&self, test: PracticeTest) {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        inner.tests.insert(test.id.clone(), test);
    }
}

#[async_trait]
impl TestStore for MemoryStore {
    async fn test_by_id(&self, id: &str) -> Result<Option<PracticeTest>, StoreError> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        Ok(inner.tests.get(id).cloned())
    }
}

#[async_trait]
impl AttemptStore for MemoryStore {
    async fn completed_attempts(
        &self,
        test_id: &str,
        excluding: &str,
    ) -> Result<Vec<Attempt>, StoreError> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        let mut attempts: Vec<Attempt> = inner
            .attempts
            .values()
            .filter(|a| a.test_id == test_id && a.completed && a.id != excluding)
            .cloned()
            .collect();
        attempts.sort_by(|a, b| a.started_at.cmp(&b.started_at));
        Ok(attempts)
    }

    async fn persist(&self, attempt: &Attempt) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        inner.attempts.insert(attempt.id.clone(), attempt.clone());
        Ok(())
    }

    async fn attempt_by_id(&self, id: &str) -> Result<Option<Attempt>, StoreError> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        Ok(inner.attempts.get(id).cloned())
    }

    async fn all_attempts(&self) -> Result<Vec<Attempt>, StoreError> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        let mut attempts: Vec<Attempt> = inner.attempts.values().cloned().collect();
        attempts.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        Ok(attempts)
    }

    async fn rename(&self, attempt_id: &str, custom_name: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        let attempt = inner
            .attempts
            .get_mut(attempt_id)
            .ok_or_else(|| StoreError::AttemptNotFound(attempt_id.to_string()))?;
        attempt.custom_name = Some(custom_name.to_string());
        Ok(())
    }

    async fn delete(&self, attempt_id: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        if inner.attempts.remove(attempt_id).is_none() {
            tracing::debug!(attempt_id, "delete of absent attempt ignored");
        }
        Ok(())
    }
}

#[async_trait]
impl StatsStore for MemoryStore {
    async fn read(&self) -> Result<UserStats, StoreError> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        Ok(inner.stats.clone())
    }

    async fn apply_delta(&self, delta: &StatsDelta) -> Result<UserStats, StoreError> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");

        // Apply to a scratch copy first so a rejected delta leaves the
        // stored stats untouched.
        let mut next = inner.stats.clone();
        next.apply_delta(delta);

        if next.correct_answers > next.questions_answered {
            return Err(StoreError::DeltaRejected(format!(
                "correct_answers {} would exceed questions_answered {}",
                next.correct_answers, next.questions_answered
            )));
        }

        inner.stats = next.clone();
        Ok(next)
    }
}
