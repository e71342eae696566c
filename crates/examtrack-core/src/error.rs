//! Error taxonomy for attempt submission and storage.
//!
//! Typed so callers can classify what was committed, and whether retrying
//! is safe, without string matching.

use thiserror::Error;

/// Rejections raised before any storage mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("attempt references a blank test id")]
    BlankTestId,

    #[error("test not found: {0}")]
    TestNotFound(String),

    #[error("test '{0}' has no questions")]
    EmptyTest(String),

    #[error("attempt {0} is not completed; use save_progress for in-progress attempts")]
    NotCompleted(String),

    /// A completed attempt stored without scoring would be seen by the
    /// dedup ledger and permanently under-credit lifetime stats.
    #[error("attempt {0} is completed; use submit so its stats are committed")]
    AlreadyCompleted(String),
}

/// Failures surfaced by store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("attempt not found: {0}")]
    AttemptNotFound(String),

    /// The stats store refused a delta that would corrupt the counters.
    #[error("stats delta rejected: {0}")]
    DeltaRejected(String),

    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Submission failures, classified by how much state they left behind.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Rejected during validation; nothing was written.
    #[error("invalid attempt: {0}")]
    Validation(#[from] ValidationError),

    /// The attempt was durably saved but the stats update failed. The caller
    /// must not re-persist the attempt (it would be a duplicate submission);
    /// stats lag and are recomputable from attempt history.
    #[error("attempt {attempt_id} saved but stats update failed: {source}")]
    PartialPersistence {
        attempt_id: String,
        #[source]
        source: StoreError,
    },

    /// Failure before the attempt was durably saved; nothing was committed
    /// and the whole submission can be retried.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl SubmitError {
    /// Whole-submission retry is only safe when nothing was committed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SubmitError::Storage(_))
    }
}
