//! TOML test bank parser.
//!
//! Loads practice tests from TOML files and directories, and validates them.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Difficulty, PracticeTest, Question};

/// Intermediate TOML structure for parsing test bank files.
#[derive(Debug, Deserialize)]
struct TomlTestFile {
    test: TomlTestHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlTestHeader {
    id: String,
    name: String,
    #[serde(default = "default_time_limit")]
    time_limit_minutes: u32,
    #[serde(default)]
    negative_marking: bool,
    #[serde(default = "default_negative_marking_value")]
    negative_marking_value: f64,
}

fn default_time_limit() -> u32 {
    60
}

fn default_negative_marking_value() -> f64 {
    0.25
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    text: String,
    options: Vec<String>,
    #[serde(default)]
    correct_option: Option<usize>,
    #[serde(default)]
    explanation: String,
    subject: String,
    #[serde(default)]
    topic: String,
    #[serde(default = "default_difficulty_str")]
    difficulty: String,
}

fn default_difficulty_str() -> String {
    "medium".to_string()
}

/// Parse a single TOML file into a `PracticeTest`.
pub fn parse_test_file(path: &Path) -> Result<PracticeTest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read test bank file: {}", path.display()))?;

    parse_test_str(&content, path)
}

/// Parse a TOML string into a `PracticeTest` (useful for testing).
pub fn parse_test_str(content: &str, source_path: &Path) -> Result<PracticeTest> {
    let parsed: TomlTestFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| {
            let difficulty: Difficulty = q
                .difficulty
                .parse()
                .map_err(|e: String| anyhow::anyhow!("{}", e))?;

            Ok(Question {
                id: q.id,
                text: q.text,
                options: q.options,
                correct_option: q.correct_option,
                explanation: q.explanation,
                subject: q.subject,
                topic: q.topic,
                difficulty,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(PracticeTest {
        id: parsed.test.id,
        name: parsed.test.name,
        questions,
        time_limit_minutes: parsed.test.time_limit_minutes,
        negative_marking: parsed.test.negative_marking,
        negative_marking_value: parsed.test.negative_marking_value,
    })
}

/// Recursively load all `.toml` test bank files from a directory.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<PracticeTest>> {
    let mut tests = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            tests.extend(load_bank_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_test_file(&path) {
                Ok(test) => tests.push(test),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(tests)
}

/// A warning from test bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a practice test for common issues.
pub fn validate_test(test: &PracticeTest) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if test.questions.is_empty() {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "test has no questions".into(),
        });
    }

    if test.negative_marking && !(0.0..=1.0).contains(&test.negative_marking_value) {
        warnings.push(ValidationWarning {
            question_id: None,
            message: format!(
                "negative_marking_value {} is outside the usual 0.0..=1.0 range",
                test.negative_marking_value
            ),
        });
    }

    // Check for duplicate question IDs
    let mut seen_ids = std::collections::HashSet::new();
    for question in &test.questions {
        if !seen_ids.insert(&question.id) {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: format!("duplicate question ID: {}", question.id),
            });
        }
    }

    // Check for answer keys that point outside the option list
    for question in &test.questions {
        match question.correct_option {
            Some(idx) if idx >= question.options.len() => {
                warnings.push(ValidationWarning {
                    question_id: Some(question.id.clone()),
                    message: format!(
                        "correct_option {} is out of range for {} options",
                        idx,
                        question.options.len()
                    ),
                });
            }
            None => {
                warnings.push(ValidationWarning {
                    question_id: Some(question.id.clone()),
                    message: "no correct_option set; answers will never score".into(),
                });
            }
            _ => {}
        }
    }

    // Check for questions with fewer than two options
    for question in &test.questions {
        if question.options.len() < 2 {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: format!("only {} option(s) provided", question.options.len()),
            });
        }
    }

    warnings
}
