//! The `examtrack submit` command.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use examtrack_core::coordinator::Coordinator;
use examtrack_core::dedup::CreditPolicy;
use examtrack_core::error::SubmitError;
use examtrack_core::model::{Attempt, PracticeTest};
use examtrack_core::parser;
use examtrack_core::results::ScoredAttempt;
use examtrack_store::{self as store, MemoryStore};

pub async fn execute(
    bank: PathBuf,
    attempt_path: PathBuf,
    data: PathBuf,
    allow_recredit: bool,
) -> Result<()> {
    let tests = load_bank(&bank)?;
    let attempt = load_attempt(&attempt_path)?;

    let snapshot = store::load_or_default(&data)
        .with_context(|| format!("failed to load snapshot: {}", data.display()))?;
    let memory = Arc::new(MemoryStore::from_snapshot(snapshot));
    for test in tests {
        memory.insert_test(test);
    }

    let policy = if allow_recredit {
        CreditPolicy::RecreditCorrections
    } else {
        CreditPolicy::FirstAnswerOnly
    };
    let coordinator =
        Coordinator::with_policy(memory.clone(), memory.clone(), memory.clone(), policy);

    match coordinator.submit(&attempt).await {
        Ok(result) => {
            store::save(&memory.snapshot(), &data)
                .with_context(|| format!("failed to save snapshot: {}", data.display()))?;
            print_result(&result);
            Ok(())
        }
        Err(e @ SubmitError::PartialPersistence { .. }) => {
            // The attempt is saved; keep it so stats can be rebuilt later.
            store::save(&memory.snapshot(), &data)
                .with_context(|| format!("failed to save snapshot: {}", data.display()))?;
            Err(anyhow::Error::new(e).context("attempt saved, stats not updated"))
        }
        Err(e) => Err(e.into()),
    }
}

fn load_bank(path: &Path) -> Result<Vec<PracticeTest>> {
    if path.is_dir() {
        parser::load_bank_directory(path)
    } else {
        Ok(vec![parser::parse_test_file(path)?])
    }
}

fn load_attempt(path: &Path) -> Result<Attempt> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read attempt file: {}", path.display()))?;
    let attempt: Attempt = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse attempt JSON: {}", path.display()))?;
    Ok(attempt)
}

fn print_result(result: &ScoredAttempt) {
    use comfy_table::{Cell, Table};

    println!(
        "Attempt {} on test {}: score {:.2} ({:.1}%)",
        result.attempt_id, result.test_id, result.score.raw, result.score.percentage
    );
    println!(
        "Answered {}/{} ({} correct), streak {} day(s), best {}",
        result.answered,
        result.total_questions,
        result.correct,
        result.current_streak,
        result.longest_streak
    );
    if result.net_answered != result.answered || result.net_correct != result.correct {
        println!(
            "Credited toward stats: {} answered, {} correct (rest seen in earlier attempts)",
            result.net_answered, result.net_correct
        );
    }
    if !result.dropped_answers.is_empty() {
        println!(
            "Ignored {} answer(s) for unknown questions: {}",
            result.dropped_answers.len(),
            result.dropped_answers.join(", ")
        );
    }

    if result.subject_breakdown.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Subject", "Attempted", "Correct", "Accuracy"]);
    for subject in &result.subject_breakdown {
        table.add_row(vec![
            Cell::new(&subject.subject),
            Cell::new(subject.total_questions),
            Cell::new(subject.correct),
            Cell::new(format!("{:.1}%", subject.accuracy * 100.0)),
        ]);
    }
    println!("{table}");
}
