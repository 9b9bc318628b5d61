//! TOML question-bank parser.
//!
//! Loads question banks from TOML files and directories, and validates them
//! against the shape the sampler relies on.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Difficulty, Question, QuestionBank, OPTIONS_PER_QUESTION};
use crate::sampler;

/// Intermediate TOML structure for parsing bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    prompt: String,
    options: Vec<String>,
    correct_option: usize,
    difficulty: String,
    #[serde(default)]
    group: u32,
}

/// Parse a single TOML file into a `QuestionBank`.
pub fn parse_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    parse_bank_str(&content, path)
}

/// Parse a TOML string into a `QuestionBank` (useful for testing).
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| {
            let difficulty: Difficulty = q
                .difficulty
                .parse()
                .map_err(|e: String| anyhow::anyhow!("question '{}': {}", q.id, e))?;
            Ok(Question {
                id: q.id,
                prompt: q.prompt,
                options: q.options,
                correct_option: q.correct_option,
                difficulty,
                group: q.group,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(QuestionBank {
        id: parsed.bank.id,
        name: parsed.bank.name,
        description: parsed.bank.description,
        questions,
    })
}

/// Recursively load all `.toml` bank files from a directory.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<QuestionBank>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            banks.extend(load_bank_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(banks)
}

/// A warning from question-bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a question bank for the issues that break sampling or scoring.
pub fn validate_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Check for duplicate question IDs
    let mut seen_ids = std::collections::HashSet::new();
    for question in &bank.questions {
        if !seen_ids.insert(&question.id) {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: format!("duplicate question ID: {}", question.id),
            });
        }
    }

    // Check option counts and answer indices
    for question in &bank.questions {
        if question.options.len() != OPTIONS_PER_QUESTION {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: format!(
                    "expected {OPTIONS_PER_QUESTION} options, found {}",
                    question.options.len()
                ),
            });
        }
        if question.correct_option >= question.options.len() {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: format!(
                    "correct_option {} is out of range for {} options",
                    question.correct_option,
                    question.options.len()
                ),
            });
        }
        if question.prompt.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: "prompt is empty".into(),
            });
        }
    }

    // Check that every difficulty bucket can cover its sample size
    for difficulty in Difficulty::ALL {
        let available = bank.count(difficulty);
        let required = sampler::required_count(difficulty);
        if available < required {
            warnings.push(ValidationWarning {
                question_id: None,
                message: format!(
                    "only {available} {difficulty} question(s), sampling requires {required}"
                ),
            });
        }
    }

    warnings
}
