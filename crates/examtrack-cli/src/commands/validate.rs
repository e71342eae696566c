//! The `examtrack validate` command.

use std::path::PathBuf;

use anyhow::Result;

use examtrack_core::parser;

pub fn execute(bank: PathBuf) -> Result<()> {
    let tests = if bank.is_dir() {
        parser::load_bank_directory(&bank)?
    } else {
        vec![parser::parse_test_file(&bank)?]
    };

    let mut total_warnings = 0;

    for test in &tests {
        println!("Test: {} ({} questions)", test.name, test.questions.len());

        let warnings = parser::validate_test(test);
        for w in &warnings {
            let prefix = w
                .question_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All test banks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
