//! Submission outputs: the stats delta a scored attempt commits, and the
//! scored result a caller renders.

use serde::{Deserialize, Serialize};

use crate::model::{SubjectPerformance, UserStats};
use crate::scoring::Score;
use crate::streak::StreakTransition;
use crate::subjects::{SubjectDelta, SubjectScore};

/// Everything a completed attempt contributes to cumulative stats.
///
/// Applied atomically by the stats store: either the whole delta lands or
/// none of it does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsDelta {
    pub attempt_id: String,
    pub test_id: String,
    /// Questions earning first credit with this attempt.
    pub answered_delta: u64,
    /// May exceed `answered_delta` only under
    /// [`crate::dedup::CreditPolicy::RecreditCorrections`], which credits
    /// corrections to questions already counted as answered.
    pub correct_delta: u64,
    pub streak: StreakTransition,
    pub subject_deltas: Vec<SubjectDelta>,
}

impl UserStats {
    /// Apply a delta in place. Every store funnels through this one routine
    /// so the counters stay consistent across implementations.
    pub fn apply_delta(&mut self, delta: &StatsDelta) {
        self.questions_answered += delta.answered_delta;
        self.correct_answers += delta.correct_delta;

        match delta.streak {
            StreakTransition::NoOp => {}
            StreakTransition::Increment { today } => {
                self.current_streak += 1;
                self.longest_streak = self.longest_streak.max(self.current_streak);
                self.last_practice_date = Some(today);
            }
            StreakTransition::Reset { today } => {
                self.current_streak = 1;
                self.longest_streak = self.longest_streak.max(1);
                self.last_practice_date = Some(today);
            }
        }

        for subject_delta in &delta.subject_deltas {
            let entry = self
                .subjects
                .entry(subject_delta.subject.clone())
                .or_insert_with(|| SubjectPerformance::new(&subject_delta.subject));
            entry.total_questions += subject_delta.answered_delta;
            entry.correct_answers += subject_delta.correct_delta;
            entry.accuracy = if entry.total_questions == 0 {
                0.0
            } else {
                entry.correct_answers as f64 / entry.total_questions as f64
            };
        }
    }
}

/// A scored, committed attempt — everything a results screen needs without
/// recomputation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredAttempt {
    pub attempt_id: String,
    pub test_id: String,
    pub total_questions: u32,
    /// This attempt in isolation.
    pub answered: u32,
    pub correct: u32,
    /// After first-credit deduplication against prior attempts.
    pub net_answered: u32,
    pub net_correct: u32,
    pub score: Score,
    pub streak: StreakTransition,
    /// Streak counters after the commit.
    pub current_streak: u32,
    pub longest_streak: u32,
    pub subject_breakdown: Vec<SubjectScore>,
    /// Answer entries dropped because their question id was not in the test.
    pub dropped_answers: Vec<String>,
}

/// A committed stats change, published to observers after the commit.
#[derive(Debug, Clone)]
pub struct StatsUpdate {
    pub delta: StatsDelta,
    /// The stats as stored after applying the delta.
    pub stats: UserStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn delta(answered: u64, correct: u64, streak: StreakTransition) -> StatsDelta {
        StatsDelta {
            attempt_id: "a1".into(),
            test_id: "t1".into(),
            answered_delta: answered,
            correct_delta: correct,
            streak,
            subject_deltas: vec![],
        }
    }

    #[test]
    fn apply_increments_counters() {
        let mut stats = UserStats::default();
        stats.apply_delta(&delta(5, 3, StreakTransition::NoOp));
        assert_eq!(stats.questions_answered, 5);
        assert_eq!(stats.correct_answers, 3);
        assert_eq!(stats.current_streak, 0);
        assert!(stats.last_practice_date.is_none());
    }

    #[test]
    fn reset_starts_streak_at_one() {
        let mut stats = UserStats::default();
        let today = date(2025, 6, 10);
        stats.apply_delta(&delta(0, 0, StreakTransition::Reset { today }));
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.longest_streak, 1);
        assert_eq!(stats.last_practice_date, Some(today));
    }

    #[test]
    fn increment_extends_longest_streak() {
        let mut stats = UserStats {
            current_streak: 3,
            longest_streak: 3,
            last_practice_date: Some(date(2025, 6, 10)),
            ..Default::default()
        };
        let today = date(2025, 6, 11);
        stats.apply_delta(&delta(0, 0, StreakTransition::Increment { today }));
        assert_eq!(stats.current_streak, 4);
        assert_eq!(stats.longest_streak, 4);
        assert_eq!(stats.last_practice_date, Some(today));
    }

    #[test]
    fn reset_after_gap_keeps_longest_streak() {
        let mut stats = UserStats {
            current_streak: 5,
            longest_streak: 7,
            last_practice_date: Some(date(2025, 6, 1)),
            ..Default::default()
        };
        stats.apply_delta(&delta(0, 0, StreakTransition::Reset { today: date(2025, 6, 10) }));
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.longest_streak, 7);
    }

    #[test]
    fn noop_leaves_practice_date_untouched() {
        let earlier = date(2025, 6, 10);
        let mut stats = UserStats {
            current_streak: 2,
            longest_streak: 2,
            last_practice_date: Some(earlier),
            ..Default::default()
        };
        stats.apply_delta(&delta(1, 1, StreakTransition::NoOp));
        assert_eq!(stats.current_streak, 2);
        assert_eq!(stats.last_practice_date, Some(earlier));
    }

    #[test]
    fn subject_deltas_merge_and_recompute_accuracy() {
        let mut stats = UserStats::default();
        let mut d = delta(2, 1, StreakTransition::NoOp);
        d.subject_deltas = vec![SubjectDelta {
            subject: "History".into(),
            answered_delta: 2,
            correct_delta: 1,
        }];
        stats.apply_delta(&d);

        let mut d2 = delta(2, 2, StreakTransition::NoOp);
        d2.subject_deltas = vec![SubjectDelta {
            subject: "History".into(),
            answered_delta: 2,
            correct_delta: 2,
        }];
        stats.apply_delta(&d2);

        let history = &stats.subjects["History"];
        assert_eq!(history.total_questions, 4);
        assert_eq!(history.correct_answers, 3);
        assert!((history.accuracy - 0.75).abs() < f64::EPSILON);
    }
}
