//! The `proctor validate` command.

use std::path::PathBuf;

use anyhow::Result;

use proctor_core::model::Difficulty;

pub fn execute(bank_path: PathBuf) -> Result<()> {
    let banks = if bank_path.is_dir() {
        proctor_core::parser::load_bank_directory(&bank_path)?
    } else {
        vec![proctor_core::parser::parse_bank(&bank_path)?]
    };

    let mut total_warnings = 0;

    for bank in &banks {
        println!(
            "Question bank: {} ({} questions: {} easy / {} medium / {} hard)",
            bank.name,
            bank.len(),
            bank.count(Difficulty::Easy),
            bank.count(Difficulty::Medium),
            bank.count(Difficulty::Hard),
        );

        let warnings = proctor_core::parser::validate_bank(bank);
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
        println!("All question banks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
