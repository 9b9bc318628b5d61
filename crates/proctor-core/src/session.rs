//! The candidate test-session state machine.
//!
//! A session moves `Intake -> InProgress -> Completed`, with an explicit
//! reset returning it to `Intake` from any state. Invariants:
//! `answers.len() == current_index` while in progress, and
//! `answers.len() == test.len()` once completed. Invalid inputs (selection
//! out of range, confirm without a selection) are ignored, never errors.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Question, QuestionBank};
use crate::sampler::{self, SampleError};

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Collecting candidate identity; no test sampled yet.
    Intake,
    /// Test sampled, questions being answered.
    InProgress,
    /// All questions answered; score is final.
    Completed,
}

/// Outcome of handing the completed report to the delivery collaborator.
///
/// Attached to the session but never gating `Completed`: a failed or unknown
/// delivery leaves the test finished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    /// No delivery attempted yet.
    #[default]
    Pending,
    /// The primary collaborator accepted the report.
    Sent,
    /// The primary send failed; the mail-compose fallback was produced.
    FallbackUsed,
    /// The session was rehydrated after completion without a recorded
    /// outcome; the report is not re-dispatched.
    Unknown,
}

/// One recorded answer, appended exactly once per question in test order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: String,
    pub selected_option: usize,
    pub correct: bool,
}

/// Final score for a completed test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
    /// Rounded to the nearest whole percent.
    pub percentage: u32,
}

impl Score {
    /// Compute the score over a slice of answer records.
    pub fn compute(answers: &[AnswerRecord]) -> Self {
        let correct = answers.iter().filter(|a| a.correct).count();
        let total = answers.len();
        let percentage = if total == 0 {
            0
        } else {
            ((100.0 * correct as f64) / total as f64).round() as u32
        };
        Self {
            correct,
            total,
            percentage,
        }
    }
}

/// Errors that can block a session transition.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Intake validation: both names must be non-empty after trimming.
    #[error("first and last name are required")]
    MissingName,

    /// `start` called on a session that already left `Intake`.
    #[error("a test is already in progress")]
    AlreadyStarted,

    /// The bank cannot supply the required test composition.
    #[error(transparent)]
    Sample(#[from] SampleError),
}

/// A candidate's test session.
///
/// Single mutator by construction: the owner drives transitions through the
/// methods below, and the whole struct serializes to the durable slot after
/// each one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub first_name: String,
    pub last_name: String,
    /// The sampled test; empty until `start` succeeds, immutable after.
    #[serde(default)]
    pub test: Vec<Question>,
    #[serde(default)]
    pub current_index: usize,
    #[serde(default)]
    pub pending_selection: Option<usize>,
    #[serde(default)]
    pub answers: Vec<AnswerRecord>,
    pub phase: Phase,
    #[serde(default)]
    pub delivery: DeliveryStatus,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A fresh session at `Intake`.
    pub fn new() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            test: Vec::new(),
            current_index: 0,
            pending_selection: None,
            answers: Vec::new(),
            phase: Phase::Intake,
            delivery: DeliveryStatus::Pending,
        }
    }

    /// Start the test: validate the candidate's name, sample a test from
    /// `bank`, and move to `InProgress`.
    ///
    /// Name validation is a precondition: a rejected intake performs no
    /// sampling.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        first_name: &str,
        last_name: &str,
        bank: &QuestionBank,
        rng: &mut R,
    ) -> Result<(), SessionError> {
        if self.phase != Phase::Intake {
            return Err(SessionError::AlreadyStarted);
        }
        let first_name = first_name.trim();
        let last_name = last_name.trim();
        if first_name.is_empty() || last_name.is_empty() {
            return Err(SessionError::MissingName);
        }

        let test = sampler::sample_test(bank, rng)?;

        self.first_name = first_name.to_string();
        self.last_name = last_name.to_string();
        self.test = test;
        self.current_index = 0;
        self.pending_selection = None;
        self.answers.clear();
        self.phase = Phase::InProgress;
        self.delivery = DeliveryStatus::Pending;
        Ok(())
    }

    /// The question currently awaiting an answer, if any.
    pub fn current_question(&self) -> Option<&Question> {
        if self.phase != Phase::InProgress {
            return None;
        }
        self.test.get(self.current_index)
    }

    /// Record a pending selection for the current question.
    ///
    /// Out-of-range indices and calls outside `InProgress` are ignored.
    /// Returns `true` if the session state changed.
    pub fn select_option(&mut self, index: usize) -> bool {
        let Some(question) = self.current_question() else {
            return false;
        };
        if !question.has_option(index) {
            return false;
        }
        self.pending_selection = Some(index);
        true
    }

    /// Commit the pending selection as the answer to the current question.
    ///
    /// A no-op without a pending selection. On the last question this
    /// transitions to `Completed`; otherwise the index advances. Returns
    /// `true` if the session state changed.
    pub fn confirm_answer(&mut self) -> bool {
        if self.phase != Phase::InProgress {
            return false;
        }
        let Some(selected) = self.pending_selection else {
            return false;
        };
        let Some(question) = self.test.get(self.current_index) else {
            return false;
        };

        self.answers.push(AnswerRecord {
            question_id: question.id.clone(),
            selected_option: selected,
            correct: selected == question.correct_option,
        });
        self.pending_selection = None;

        if self.current_index + 1 == self.test.len() {
            self.phase = Phase::Completed;
        } else {
            self.current_index += 1;
        }
        true
    }

    /// Record the delivery outcome. Never touches phase or answers.
    pub fn record_delivery(&mut self, status: DeliveryStatus) {
        self.delivery = status;
    }

    /// Discard all session data and return to `Intake`.
    pub fn reset(&mut self) {
        *self = Session::new();
    }

    /// Score over the answers recorded so far.
    pub fn score(&self) -> Score {
        Score::compute(&self.answers)
    }

    /// Candidate's full name.
    pub fn candidate_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
