//! Assessment report assembly with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Difficulty, Question};
use crate::session::{AnswerRecord, Score, Session};

/// A complete assessment report for one candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was assembled.
    pub created_at: DateTime<Utc>,
    pub first_name: String,
    pub last_name: String,
    /// Final score.
    pub score: Score,
    /// Per-question outcomes, in presentation order.
    pub breakdown: Vec<QuestionOutcome>,
}

/// The outcome of a single question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOutcome {
    pub prompt: String,
    pub difficulty: Difficulty,
    pub options: Vec<String>,
    pub correct_option: usize,
    pub selected_option: usize,
    pub correct: bool,
    /// Source questionnaire of the question.
    pub group: u32,
}

impl AssessmentReport {
    /// Assemble a report from a sampled test and its answer records.
    ///
    /// Questions without a recorded answer are skipped; by invariant this
    /// cannot happen for a completed session, but the assembly tolerates it.
    pub fn assemble(
        first_name: &str,
        last_name: &str,
        test: &[Question],
        answers: &[AnswerRecord],
    ) -> Self {
        let breakdown = test
            .iter()
            .zip(answers.iter())
            .map(|(question, answer)| QuestionOutcome {
                prompt: question.prompt.clone(),
                difficulty: question.difficulty,
                options: question.options.clone(),
                correct_option: question.correct_option,
                selected_option: answer.selected_option,
                correct: answer.correct,
                group: question.group,
            })
            .collect();

        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            score: Score::compute(answers),
            breakdown,
        }
    }

    /// Assemble a report from a session.
    pub fn from_session(session: &Session) -> Self {
        Self::assemble(
            &session.first_name,
            &session.last_name,
            &session.test,
            &session.answers,
        )
    }

    /// Candidate's full name.
    pub fn candidate_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: AssessmentReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
