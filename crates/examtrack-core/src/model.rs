//! Core data model types for examtrack.
//!
//! These are the fundamental types the whole engine operates on: questions,
//! test definitions, per-question answers, attempts, and the learner's
//! cumulative statistics.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Difficulty of a single question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// How the learner left a question when the attempt was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerStatus {
    #[default]
    Unattempted,
    Answered,
    Bookmarked,
    MarkedForReview,
}

/// A single multiple-choice question. Immutable once created; owned by the
/// question bank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Opaque stable identifier.
    pub id: String,
    /// The question text.
    pub text: String,
    /// Answer options, in display order.
    #[serde(default)]
    pub options: Vec<String>,
    /// Index into `options`; `None` means no answer key was recorded, which
    /// never counts as correct.
    #[serde(default)]
    pub correct_option: Option<usize>,
    /// Shown after the attempt is scored.
    #[serde(default)]
    pub explanation: String,
    pub subject: String,
    pub topic: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: Difficulty,
}

fn default_difficulty() -> Difficulty {
    Difficulty::Medium
}

/// A test definition: an ordered question list plus its marking policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticeTest {
    pub id: String,
    pub name: String,
    /// Ordered; subject grouping and scoring iterate in this order.
    #[serde(default)]
    pub questions: Vec<Question>,
    pub time_limit_minutes: u32,
    /// When enabled, each wrong answer deducts `negative_marking_value`.
    #[serde(default)]
    pub negative_marking: bool,
    /// Fraction deducted per wrong answer.
    #[serde(default = "default_negative_marking_value")]
    pub negative_marking_value: f64,
}

fn default_negative_marking_value() -> f64 {
    0.25
}

impl PracticeTest {
    pub fn question_by_id(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}

/// The learner's answer to one question within an attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAnswer {
    pub question_id: String,
    /// `None` means the question was left unattempted.
    #[serde(default)]
    pub selected_option: Option<usize>,
    #[serde(default)]
    pub time_spent_secs: u32,
    #[serde(default)]
    pub status: AnswerStatus,
}

impl UserAnswer {
    pub fn is_answered(&self) -> bool {
        self.selected_option.is_some()
    }
}

/// One learner's run through a test's questions.
///
/// Created when a test is started, mutated while answering, and finalized
/// (`completed = true`, answers frozen) exactly once at submission. After
/// finalization the only permitted mutation is the cosmetic `custom_name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attempt {
    pub id: String,
    pub test_id: String,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
    /// Keyed by question id. Keys must belong to the test's question set;
    /// entries that don't are dropped with a warning at scoring time.
    #[serde(default)]
    pub answers: HashMap<String, UserAnswer>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub custom_name: Option<String>,
}

impl Attempt {
    /// A fresh, empty attempt at the given test.
    pub fn started(test_id: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            test_id: test_id.to_string(),
            started_at: Utc::now(),
            finished_at: None,
            answers: HashMap::new(),
            completed: false,
            custom_name: None,
        }
    }
}

/// The learner's cumulative statistics. Exactly one instance exists per
/// store; mutated only through [`crate::results::StatsDelta`] application.
///
/// Invariants: `questions_answered >= correct_answers`, and a given
/// (test id, question id) pair contributes to the counters at most once
/// across all completed attempts (the first-credit rule, see
/// [`crate::dedup`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    pub questions_answered: u64,
    pub correct_answers: u64,
    pub current_streak: u32,
    pub longest_streak: u32,
    #[serde(default)]
    pub last_practice_date: Option<NaiveDate>,
    #[serde(default)]
    pub subjects: BTreeMap<String, SubjectPerformance>,
}

/// Lifetime accuracy for one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectPerformance {
    pub subject: String,
    pub total_questions: u64,
    pub correct_answers: u64,
    /// Derived: `correct_answers / total_questions`, 0 when total is 0.
    /// Recomputed on every delta, never stored stale.
    pub accuracy: f64,
}

impl SubjectPerformance {
    pub fn new(subject: &str) -> Self {
        Self {
            subject: subject.to_string(),
            total_questions: 0,
            correct_answers: 0,
            accuracy: 0.0,
        }
    }
}
