//! Collaborator interfaces the engine depends on.
//!
//! These async traits are implemented by the `examtrack-store` crate; the
//! coordinator never touches storage directly.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::model::{Attempt, PracticeTest, UserStats};
use crate::results::StatsDelta;

/// Resolves test definitions and their ordered questions.
#[async_trait]
pub trait TestStore: Send + Sync {
    async fn test_by_id(&self, id: &str) -> Result<Option<PracticeTest>, StoreError>;
}

/// Durable attempt history.
#[async_trait]
pub trait AttemptStore: Send + Sync {
    /// Completed attempts on a test, excluding one attempt id (the one
    /// currently being scored). Must reflect a consistent snapshot.
    async fn completed_attempts(
        &self,
        test_id: &str,
        excluding: &str,
    ) -> Result<Vec<Attempt>, StoreError>;

    /// Idempotent by attempt id: re-saving replaces the stored answers,
    /// never duplicates them.
    async fn persist(&self, attempt: &Attempt) -> Result<(), StoreError>;

    async fn attempt_by_id(&self, id: &str) -> Result<Option<Attempt>, StoreError>;

    /// All stored attempts, newest first.
    async fn all_attempts(&self) -> Result<Vec<Attempt>, StoreError>;

    /// Cosmetic rename; the only mutation permitted after finalization.
    async fn rename(&self, attempt_id: &str, custom_name: &str) -> Result<(), StoreError>;

    /// Removing an already-absent attempt is not an error.
    async fn delete(&self, attempt_id: &str) -> Result<(), StoreError>;
}

/// The single cumulative stats record for the learner.
#[async_trait]
pub trait StatsStore: Send + Sync {
    async fn read(&self) -> Result<UserStats, StoreError>;

    /// All-or-nothing: on error the stored stats are unchanged. Returns the
    /// stats as stored after the delta.
    async fn apply_delta(&self, delta: &StatsDelta) -> Result<UserStats, StoreError>;
}
