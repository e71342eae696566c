//! The `examtrack stats` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use examtrack_store as store;

pub fn execute(data: PathBuf, format: String) -> Result<()> {
    let snapshot = store::load_or_default(&data)
        .with_context(|| format!("failed to load snapshot: {}", data.display()))?;
    let stats = &snapshot.stats;

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(stats)?);
        }
        "table" => {
            use comfy_table::{Cell, Table};

            let accuracy = if stats.questions_answered == 0 {
                0.0
            } else {
                stats.correct_answers as f64 / stats.questions_answered as f64 * 100.0
            };
            println!(
                "Questions answered: {} ({} correct, {:.1}% accuracy)",
                stats.questions_answered, stats.correct_answers, accuracy
            );
            println!(
                "Streak: {} day(s), best {}",
                stats.current_streak, stats.longest_streak
            );
            match stats.last_practice_date {
                Some(date) => println!("Last practiced: {date}"),
                None => println!("No practice recorded yet."),
            }

            if !stats.subjects.is_empty() {
                let mut table = Table::new();
                table.set_header(vec!["Subject", "Questions", "Correct", "Accuracy"]);
                for perf in stats.subjects.values() {
                    table.add_row(vec![
                        Cell::new(&perf.subject),
                        Cell::new(perf.total_questions),
                        Cell::new(perf.correct_answers),
                        Cell::new(format!("{:.1}%", perf.accuracy * 100.0)),
                    ]);
                }
                println!("{table}");
            }
        }
        other => anyhow::bail!("unknown format: {other} (expected table or json)"),
    }

    Ok(())
}
