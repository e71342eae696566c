//! The `examtrack init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    std::fs::create_dir_all("banks")?;
    let bank_path = std::path::Path::new("banks/gs-sample.toml");
    if bank_path.exists() {
        println!("banks/gs-sample.toml already exists, skipping.");
    } else {
        std::fs::write(bank_path, SAMPLE_BANK)?;
        println!("Created banks/gs-sample.toml");
    }

    let attempt_path = std::path::Path::new("sample-attempt.json");
    if attempt_path.exists() {
        println!("sample-attempt.json already exists, skipping.");
    } else {
        std::fs::write(attempt_path, SAMPLE_ATTEMPT)?;
        println!("Created sample-attempt.json");
    }

    println!("\nNext steps:");
    println!("  1. Run: examtrack validate --bank banks/gs-sample.toml");
    println!("  2. Run: examtrack submit --bank banks/gs-sample.toml --attempt sample-attempt.json");
    println!("  3. Run: examtrack stats");

    Ok(())
}

const SAMPLE_BANK: &str = r#"[test]
id = "gs-sample"
name = "General Studies Sampler"
time_limit_minutes = 20
negative_marking = true
negative_marking_value = 0.33

[[questions]]
id = "q1"
text = "Which article of the Constitution abolishes untouchability?"
options = ["Article 14", "Article 17", "Article 19", "Article 21"]
correct_option = 1
explanation = "Article 17 abolishes untouchability and forbids its practice."
subject = "Polity"
topic = "Fundamental Rights"
difficulty = "easy"

[[questions]]
id = "q2"
text = "The Dandi March of 1930 protested the tax on which commodity?"
options = ["Cotton", "Indigo", "Salt", "Tea"]
correct_option = 2
explanation = "Gandhi's march to Dandi broke the salt law."
subject = "History"
topic = "Freedom Struggle"
difficulty = "easy"

[[questions]]
id = "q3"
text = "Repo rate is the rate at which the RBI"
options = [
    "borrows from commercial banks",
    "lends to commercial banks",
    "lends to the central government",
    "buys foreign currency",
]
correct_option = 1
explanation = "The repo rate is the RBI's short-term lending rate to banks."
subject = "Economics"
topic = "Monetary Policy"
difficulty = "medium"

[[questions]]
id = "q4"
text = "Who chaired the drafting committee of the Constituent Assembly?"
options = ["Rajendra Prasad", "B. R. Ambedkar", "Jawaharlal Nehru", "B. N. Rau"]
correct_option = 1
subject = "Polity"
topic = "Making of the Constitution"
difficulty = "easy"
"#;

const SAMPLE_ATTEMPT: &str = r#"{
  "id": "sample-attempt-1",
  "test_id": "gs-sample",
  "started_at": "2025-06-10T09:00:00Z",
  "finished_at": "2025-06-10T09:14:30Z",
  "completed": true,
  "custom_name": "First pass",
  "answers": {
    "q1": {
      "question_id": "q1",
      "selected_option": 1,
      "time_spent_secs": 40,
      "status": "answered"
    },
    "q2": {
      "question_id": "q2",
      "selected_option": 2,
      "time_spent_secs": 35,
      "status": "answered"
    },
    "q3": {
      "question_id": "q3",
      "selected_option": 0,
      "time_spent_secs": 80,
      "status": "answered"
    }
  }
}
"#;
