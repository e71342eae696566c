//! Attempt correctness evaluation and score calculation.
//!
//! Both functions are pure: the evaluator maps an attempt's answers against
//! the test's answer key, and the calculator turns the resulting counts into
//! a raw score and percentage under the test's negative-marking policy.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::{Attempt, PracticeTest};

/// Per-attempt correctness counts, taken in isolation (no history).
#[derive(Debug, Clone, Default)]
pub struct Evaluation {
    /// Answers with a non-null selection.
    pub answered: u32,
    /// Answered and matching the question's answer key.
    pub correct: u32,
    pub answered_ids: HashSet<String>,
    pub correct_ids: HashSet<String>,
    /// Answer entries referencing questions outside the test. Dropped,
    /// never fatal: answers are best-effort, tests are authoritative.
    pub dropped: Vec<String>,
}

/// Evaluate an attempt against its test's answer key.
///
/// A question with no recorded answer key (`correct_option == None`) never
/// counts as correct regardless of what was selected.
pub fn evaluate(test: &PracticeTest, attempt: &Attempt) -> Evaluation {
    let mut evaluation = Evaluation::default();

    for (question_id, answer) in &attempt.answers {
        let Some(question) = test.question_by_id(question_id) else {
            tracing::warn!(
                question_id,
                attempt_id = %attempt.id,
                test_id = %test.id,
                "answer references a question not in the test, dropping"
            );
            evaluation.dropped.push(question_id.clone());
            continue;
        };

        let Some(selected) = answer.selected_option else {
            continue;
        };

        evaluation.answered += 1;
        evaluation.answered_ids.insert(question_id.clone());

        if question.correct_option == Some(selected) {
            evaluation.correct += 1;
            evaluation.correct_ids.insert(question_id.clone());
        }
    }

    evaluation
}

/// A computed score. Values are stored unrounded; rounding happens only at
/// display time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub raw: f64,
    pub percentage: f64,
}

/// Convert correctness counts into a score under the test's marking policy.
///
/// `raw = correct - incorrect * penalty` when negative marking is enabled,
/// where incorrect means answered-but-wrong (unattempted questions are never
/// penalized). Percentage is over the full question count, 0 by convention
/// for an empty test.
pub fn score(test: &PracticeTest, evaluation: &Evaluation) -> Score {
    let correct = f64::from(evaluation.correct);
    // Saturating: `correct <= answered` holds for evaluator output, but the
    // fields are public and a malformed Evaluation must not panic here.
    let incorrect = f64::from(evaluation.answered.saturating_sub(evaluation.correct));

    let penalty = if test.negative_marking {
        incorrect * test.negative_marking_value
    } else {
        0.0
    };
    let raw = correct - penalty;

    let total = test.questions.len();
    let percentage = if total == 0 {
        0.0
    } else {
        raw / total as f64 * 100.0
    };

    Score { raw, percentage }
}
