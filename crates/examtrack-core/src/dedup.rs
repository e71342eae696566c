//! First-credit deduplication across repeat attempts of the same test.
//!
//! Lifetime totals count the learner's *first-ever* answer to each question;
//! re-attempting a test must not inflate `questions_answered` or
//! retroactively fix `correct_answers`. The [`CreditPolicy`] toggle exists
//! because that second half is debatable: under the default policy a
//! question answered wrong once and right later never raises the lifetime
//! correct count.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::{Attempt, PracticeTest};
use crate::scoring::{self, Evaluation};

/// Which answers may still earn lifetime credit after re-attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditPolicy {
    /// The first-ever answer to a question is the only one that counts,
    /// correct or not.
    #[default]
    FirstAnswerOnly,
    /// Additionally credits `correct_answers` (never `questions_answered`)
    /// when a question previously answered only incorrectly is now answered
    /// correctly.
    RecreditCorrections,
}

/// Question ids already credited by earlier completed attempts on one test.
#[derive(Debug, Clone, Default)]
pub struct CreditLedger {
    answered: HashSet<String>,
    correct: HashSet<String>,
}

/// Net-new lifetime credit contributed by the current attempt.
#[derive(Debug, Clone, Default)]
pub struct NetCredit {
    pub answered: u32,
    pub correct: u32,
    /// Question ids whose first credit lands with this attempt.
    pub credited_ids: HashSet<String>,
}

impl CreditLedger {
    /// Union every answered question id (non-null selection, correct or not)
    /// across the learner's other completed attempts on the same test.
    pub fn from_prior_attempts(test: &PracticeTest, priors: &[Attempt]) -> Self {
        let mut ledger = Self::default();
        for prior in priors.iter().filter(|a| a.completed) {
            let evaluation = scoring::evaluate(test, prior);
            ledger.answered.extend(evaluation.answered_ids);
            ledger.correct.extend(evaluation.correct_ids);
        }
        ledger
    }

    pub fn previously_answered(&self, question_id: &str) -> bool {
        self.answered.contains(question_id)
    }

    /// Count only questions not already credited by earlier attempts.
    pub fn net_credit(&self, evaluation: &Evaluation, policy: CreditPolicy) -> NetCredit {
        let credited_ids: HashSet<String> = evaluation
            .answered_ids
            .difference(&self.answered)
            .cloned()
            .collect();

        let mut correct = credited_ids
            .iter()
            .filter(|id| evaluation.correct_ids.contains(id.as_str()))
            .count() as u32;

        if policy == CreditPolicy::RecreditCorrections {
            // Questions already counted as answered, never yet correct,
            // answered correctly now. They add to correct only, so the
            // answered >= correct invariant is preserved.
            correct += evaluation
                .correct_ids
                .iter()
                .filter(|id| {
                    self.answered.contains(id.as_str()) && !self.correct.contains(id.as_str())
                })
                .count() as u32;
        }

        NetCredit {
            answered: credited_ids.len() as u32,
            correct,
            credited_ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Attempt, Difficulty, Question, UserAnswer};
    use std::collections::HashMap;

    fn make_test() -> PracticeTest {
        let questions = (0..4)
            .map(|i| Question {
                id: format!("q{i}"),
                text: format!("Question {i}"),
                options: vec!["a".into(), "b".into()],
                correct_option: Some(0),
                explanation: String::new(),
                subject: "Polity".into(),
                topic: "Constitution".into(),
                difficulty: Difficulty::Easy,
            })
            .collect();
        PracticeTest {
            id: "t1".into(),
            name: "Fixture".into(),
            questions,
            time_limit_minutes: 10,
            negative_marking: false,
            negative_marking_value: 0.25,
        }
    }

    fn attempt_with(selections: &[(&str, Option<usize>)], completed: bool) -> Attempt {
        let mut attempt = Attempt::started("t1");
        attempt.answers = selections
            .iter()
            .map(|(id, selected)| {
                (
                    id.to_string(),
                    UserAnswer {
                        question_id: id.to_string(),
                        selected_option: *selected,
                        time_spent_secs: 10,
                        status: Default::default(),
                    },
                )
            })
            .collect::<HashMap<_, _>>();
        attempt.completed = completed;
        attempt
    }

    #[test]
    fn no_history_net_equals_gross() {
        let test = make_test();
        let current = attempt_with(&[("q0", Some(0)), ("q1", Some(1))], true);
        let evaluation = scoring::evaluate(&test, &current);

        let ledger = CreditLedger::from_prior_attempts(&test, &[]);
        let net = ledger.net_credit(&evaluation, CreditPolicy::FirstAnswerOnly);
        assert_eq!(net.answered, evaluation.answered);
        assert_eq!(net.correct, evaluation.correct);
    }

    #[test]
    fn repeat_of_answered_questions_nets_zero() {
        let test = make_test();
        // First attempt answered q0 (right) and q1 (wrong).
        let prior = attempt_with(&[("q0", Some(0)), ("q1", Some(1))], true);
        // Second attempt re-answers the same two questions, both right.
        let current = attempt_with(&[("q0", Some(0)), ("q1", Some(0))], true);
        let evaluation = scoring::evaluate(&test, &current);

        let ledger = CreditLedger::from_prior_attempts(&test, &[prior]);
        let net = ledger.net_credit(&evaluation, CreditPolicy::FirstAnswerOnly);
        assert_eq!(net.answered, 0);
        assert_eq!(net.correct, 0);
        assert!(net.credited_ids.is_empty());
    }

    #[test]
    fn incorrect_prior_answer_blocks_later_credit_by_default() {
        let test = make_test();
        let prior = attempt_with(&[("q0", Some(1))], true); // wrong
        let current = attempt_with(&[("q0", Some(0))], true); // now right
        let evaluation = scoring::evaluate(&test, &current);

        let ledger = CreditLedger::from_prior_attempts(&test, &[prior]);
        let net = ledger.net_credit(&evaluation, CreditPolicy::FirstAnswerOnly);
        assert_eq!(net.answered, 0);
        assert_eq!(net.correct, 0);
    }

    #[test]
    fn recredit_policy_credits_later_correction() {
        let test = make_test();
        let prior = attempt_with(&[("q0", Some(1))], true); // wrong
        let current = attempt_with(&[("q0", Some(0)), ("q2", Some(0))], true);
        let evaluation = scoring::evaluate(&test, &current);

        let ledger = CreditLedger::from_prior_attempts(&test, &[prior]);
        let net = ledger.net_credit(&evaluation, CreditPolicy::RecreditCorrections);
        // q2 is net-new (answered + correct); q0's correction adds one more
        // correct without touching answered.
        assert_eq!(net.answered, 1);
        assert_eq!(net.correct, 2);
    }

    #[test]
    fn recredit_ignores_questions_already_correct() {
        let test = make_test();
        let prior = attempt_with(&[("q0", Some(0))], true); // already right
        let current = attempt_with(&[("q0", Some(0))], true);
        let evaluation = scoring::evaluate(&test, &current);

        let ledger = CreditLedger::from_prior_attempts(&test, &[prior]);
        let net = ledger.net_credit(&evaluation, CreditPolicy::RecreditCorrections);
        assert_eq!(net.answered, 0);
        assert_eq!(net.correct, 0);
    }

    #[test]
    fn unattempted_prior_entries_do_not_block_credit() {
        let test = make_test();
        // q1 appears in the prior attempt but was never actually answered.
        let prior = attempt_with(&[("q1", None)], true);
        let current = attempt_with(&[("q1", Some(0))], true);
        let evaluation = scoring::evaluate(&test, &current);

        let ledger = CreditLedger::from_prior_attempts(&test, &[prior]);
        assert!(!ledger.previously_answered("q1"));
        let net = ledger.net_credit(&evaluation, CreditPolicy::FirstAnswerOnly);
        assert_eq!(net.answered, 1);
        assert_eq!(net.correct, 1);
    }

    #[test]
    fn incomplete_priors_are_ignored() {
        let test = make_test();
        let prior = attempt_with(&[("q0", Some(0))], false);
        let ledger = CreditLedger::from_prior_attempts(&test, &[prior]);
        assert!(!ledger.previously_answered("q0"));
    }
}
