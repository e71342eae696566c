//! Subject-wise accuracy aggregation.
//!
//! Two views: a per-attempt breakdown over every question in the test (for
//! the results screen), and lifetime deltas restricted to questions earning
//! first credit with this attempt (so the lifetime subject map follows the
//! same deduplication rule as the top-level counters).

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::model::PracticeTest;
use crate::scoring::Evaluation;

/// This attempt's accuracy for one subject group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectScore {
    pub subject: String,
    pub total_questions: u32,
    pub correct: u32,
    /// `correct / total_questions`; 0 when the group is empty.
    pub accuracy: f64,
}

/// Lifetime adjustment for one subject group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectDelta {
    pub subject: String,
    pub answered_delta: u64,
    pub correct_delta: u64,
}

/// Group the test's questions by subject and compute this attempt's
/// accuracy per group. Deterministically ordered by subject name.
pub fn breakdown(test: &PracticeTest, evaluation: &Evaluation) -> Vec<SubjectScore> {
    let mut groups: BTreeMap<&str, (u32, u32)> = BTreeMap::new();
    for question in &test.questions {
        let entry = groups.entry(question.subject.as_str()).or_default();
        entry.0 += 1;
        if evaluation.correct_ids.contains(&question.id) {
            entry.1 += 1;
        }
    }

    groups
        .into_iter()
        .map(|(subject, (total, correct))| SubjectScore {
            subject: subject.to_string(),
            total_questions: total,
            correct,
            accuracy: if total == 0 {
                0.0
            } else {
                f64::from(correct) / f64::from(total)
            },
        })
        .collect()
}

/// Lifetime subject deltas, restricted to questions whose first credit lands
/// with this attempt.
pub fn subject_deltas(
    test: &PracticeTest,
    credited_ids: &HashSet<String>,
    correct_ids: &HashSet<String>,
) -> Vec<SubjectDelta> {
    let mut groups: BTreeMap<&str, (u64, u64)> = BTreeMap::new();
    for question in &test.questions {
        if !credited_ids.contains(&question.id) {
            continue;
        }
        let entry = groups.entry(question.subject.as_str()).or_default();
        entry.0 += 1;
        if correct_ids.contains(&question.id) {
            entry.1 += 1;
        }
    }

    groups
        .into_iter()
        .map(|(subject, (answered_delta, correct_delta))| SubjectDelta {
            subject: subject.to_string(),
            answered_delta,
            correct_delta,
        })
        .collect()
}
