//! The `examtrack history` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use examtrack_store as store;

pub fn execute(data: PathBuf, test: Option<String>) -> Result<()> {
    let snapshot = store::load_or_default(&data)
        .with_context(|| format!("failed to load snapshot: {}", data.display()))?;

    let mut attempts = snapshot.attempts;
    if let Some(test_id) = &test {
        attempts.retain(|a| &a.test_id == test_id);
    }
    attempts.sort_by(|a, b| b.started_at.cmp(&a.started_at));

    if attempts.is_empty() {
        match test {
            Some(test_id) => println!("No attempts recorded for test {test_id}."),
            None => println!("No attempts recorded."),
        }
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Started", "Test", "Name", "Answers", "Status"]);
    for attempt in &attempts {
        let name = attempt.custom_name.as_deref().unwrap_or("-");
        let status = if attempt.completed {
            "completed"
        } else {
            "in progress"
        };
        table.add_row(vec![
            Cell::new(attempt.started_at.format("%Y-%m-%d %H:%M")),
            Cell::new(&attempt.test_id),
            Cell::new(name),
            Cell::new(attempt.answers.len()),
            Cell::new(status),
        ]);
    }
    println!("{table}");
    println!("{} attempt(s).", attempts.len());

    Ok(())
}
