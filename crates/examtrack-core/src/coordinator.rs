//! Attempt submission orchestrator.
//!
//! Walks a submission through validate -> compute -> commit against the
//! collaborator stores: deduplicates credit against prior attempts, scores
//! the attempt, decides the streak transition, persists the attempt, and
//! applies the stats delta as one atomic unit.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tokio::sync::{broadcast, Mutex};

use crate::dedup::{CreditLedger, CreditPolicy};
use crate::error::{SubmitError, ValidationError};
use crate::model::Attempt;
use crate::results::{ScoredAttempt, StatsDelta, StatsUpdate};
use crate::scoring;
use crate::streak;
use crate::subjects;
use crate::traits::{AttemptStore, StatsStore, TestStore};

/// Source of "today" for streak decisions. Injectable so tests control time.
#[derive(Debug, Clone, Copy)]
pub enum Clock {
    System,
    Fixed(NaiveDate),
}

impl Clock {
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System => Utc::now().date_naive(),
            Clock::Fixed(date) => *date,
        }
    }
}

/// Orchestrates scoring and stats commits for attempt submissions.
///
/// Constructed once at application start with explicit store references;
/// there is no lazily-initialized global state.
pub struct Coordinator {
    tests: Arc<dyn TestStore>,
    attempts: Arc<dyn AttemptStore>,
    stats: Arc<dyn StatsStore>,
    policy: CreditPolicy,
    clock: Clock,
    /// Serializes submissions so the dedup read and the stats commit see a
    /// consistent snapshot. At most one writer at a time.
    submit_lock: Mutex<()>,
    updates: broadcast::Sender<StatsUpdate>,
}

impl Coordinator {
    pub fn new(
        tests: Arc<dyn TestStore>,
        attempts: Arc<dyn AttemptStore>,
        stats: Arc<dyn StatsStore>,
    ) -> Self {
        Self::with_policy(tests, attempts, stats, CreditPolicy::default())
    }

    pub fn with_policy(
        tests: Arc<dyn TestStore>,
        attempts: Arc<dyn AttemptStore>,
        stats: Arc<dyn StatsStore>,
        policy: CreditPolicy,
    ) -> Self {
        let (updates, _) = broadcast::channel(16);
        Self {
            tests,
            attempts,
            stats,
            policy,
            clock: Clock::System,
            submit_lock: Mutex::new(()),
            updates,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Subscribe to stats updates committed by this coordinator. Dashboards
    /// and UIs observe this channel instead of polling the store.
    pub fn subscribe(&self) -> broadcast::Receiver<StatsUpdate> {
        self.updates.subscribe()
    }

    /// Persist an in-progress attempt without touching stats.
    ///
    /// Completed attempts must go through [`Coordinator::submit`]: stored
    /// here they would feed the dedup ledger without ever crediting stats.
    pub async fn save_progress(&self, attempt: &Attempt) -> Result<(), SubmitError> {
        if attempt.test_id.trim().is_empty() {
            return Err(ValidationError::BlankTestId.into());
        }
        if attempt.completed {
            return Err(ValidationError::AlreadyCompleted(attempt.id.clone()).into());
        }
        self.attempts.persist(attempt).await?;
        tracing::debug!(attempt_id = %attempt.id, "saved in-progress attempt");
        Ok(())
    }

    /// Score a completed attempt and commit its stats contribution.
    ///
    /// Validation failures leave storage untouched. Once the attempt itself
    /// is durably saved, a stats failure surfaces as
    /// [`SubmitError::PartialPersistence`]: the attempt is never lost, the
    /// stats lag and remain recomputable from attempt history.
    pub async fn submit(&self, attempt: &Attempt) -> Result<ScoredAttempt, SubmitError> {
        let _guard = self.submit_lock.lock().await;

        // Validating. No storage mutation on any failure here.
        if attempt.test_id.trim().is_empty() {
            return Err(ValidationError::BlankTestId.into());
        }
        if !attempt.completed {
            return Err(ValidationError::NotCompleted(attempt.id.clone()).into());
        }
        let test = self
            .tests
            .test_by_id(&attempt.test_id)
            .await?
            .ok_or_else(|| ValidationError::TestNotFound(attempt.test_id.clone()))?;
        if test.questions.is_empty() {
            return Err(ValidationError::EmptyTest(test.id.clone()).into());
        }

        // Computing. Pure from here until the commit.
        let priors = self
            .attempts
            .completed_attempts(&attempt.test_id, &attempt.id)
            .await?;
        let ledger = CreditLedger::from_prior_attempts(&test, &priors);
        let evaluation = scoring::evaluate(&test, attempt);
        let net = ledger.net_credit(&evaluation, self.policy);
        let score = scoring::score(&test, &evaluation);
        let subject_breakdown = subjects::breakdown(&test, &evaluation);
        let subject_deltas =
            subjects::subject_deltas(&test, &net.credited_ids, &evaluation.correct_ids);

        let prior_stats = self.stats.read().await?;
        let transition = streak::advance(prior_stats.last_practice_date, self.clock.today());

        let delta = StatsDelta {
            attempt_id: attempt.id.clone(),
            test_id: attempt.test_id.clone(),
            answered_delta: u64::from(net.answered),
            correct_delta: u64::from(net.correct),
            streak: transition,
            subject_deltas,
        };

        // Committing. The attempt goes first; it must never be lost. A
        // stats failure after that point is the accepted partial-failure
        // mode.
        self.attempts.persist(attempt).await?;

        let updated = match self.stats.apply_delta(&delta).await {
            Ok(stats) => stats,
            Err(source) => {
                tracing::error!(
                    attempt_id = %attempt.id,
                    error = %source,
                    "attempt saved but stats update failed; stats are stale"
                );
                return Err(SubmitError::PartialPersistence {
                    attempt_id: attempt.id.clone(),
                    source,
                });
            }
        };

        // Receiver lag or absence is not a submission failure.
        let _ = self.updates.send(StatsUpdate {
            delta,
            stats: updated.clone(),
        });

        tracing::info!(
            attempt_id = %attempt.id,
            test_id = %attempt.test_id,
            raw_score = score.raw,
            net_answered = net.answered,
            net_correct = net.correct,
            "attempt scored and committed"
        );

        Ok(ScoredAttempt {
            attempt_id: attempt.id.clone(),
            test_id: attempt.test_id.clone(),
            total_questions: test.questions.len() as u32,
            answered: evaluation.answered,
            correct: evaluation.correct,
            net_answered: net.answered,
            net_correct: net.correct,
            score,
            streak: transition,
            current_streak: updated.current_streak,
            longest_streak: updated.longest_streak,
            subject_breakdown,
            dropped_answers: evaluation.dropped,
        })
    }
}
