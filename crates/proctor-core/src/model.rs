//! Core data model types for proctor.
//!
//! These are the fundamental types the entire proctor system uses to
//! represent questions and question banks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every question presents the same number of answer options.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier for this question.
    pub id: String,
    /// The question text shown to the candidate.
    pub prompt: String,
    /// The answer options, in presentation order.
    pub options: Vec<String>,
    /// Index into `options` of the correct answer.
    pub correct_option: usize,
    /// Difficulty bucket used by the sampler.
    pub difficulty: Difficulty,
    /// Source questionnaire this entry was drawn from.
    #[serde(default)]
    pub group: u32,
}

impl Question {
    /// Returns `true` if `index` names one of this question's options.
    pub fn has_option(&self, index: usize) -> bool {
        index < self.options.len()
    }
}

/// Question difficulty buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// All difficulty buckets, in sampling order.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// A labeled pool of questions, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionBank {
    /// Unique identifier for this bank.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description of what this bank assesses.
    #[serde(default)]
    pub description: String,
    /// The questions in this bank.
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl QuestionBank {
    /// Number of questions in the given difficulty bucket.
    pub fn count(&self, difficulty: Difficulty) -> usize {
        self.questions
            .iter()
            .filter(|q| q.difficulty == difficulty)
            .count()
    }

    /// Total number of questions in the bank.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Returns `true` if the bank holds no questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_display_and_parse() {
        assert_eq!(Difficulty::Easy.to_string(), "easy");
        assert_eq!(Difficulty::Hard.to_string(), "hard");
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!("Medium".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("trivial".parse::<Difficulty>().is_err());
    }

    #[test]
    fn question_serde_roundtrip() {
        let question = Question {
            id: "q-1".into(),
            prompt: "Which color model is used for print?".into(),
            options: vec!["RGB".into(), "CMYK".into(), "HSL".into(), "LAB".into()],
            correct_option: 1,
            difficulty: Difficulty::Easy,
            group: 3,
        };
        let json = serde_json::to_string(&question).unwrap();
        let deserialized: Question = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, question);
        assert!(json.contains("\"easy\""));
    }

    #[test]
    fn bank_counts_by_difficulty() {
        let bank = QuestionBank {
            id: "b".into(),
            name: "Bank".into(),
            description: String::new(),
            questions: vec![
                Question {
                    id: "a".into(),
                    prompt: "?".into(),
                    options: vec!["1".into(), "2".into(), "3".into(), "4".into()],
                    correct_option: 0,
                    difficulty: Difficulty::Easy,
                    group: 0,
                },
                Question {
                    id: "b".into(),
                    prompt: "?".into(),
                    options: vec!["1".into(), "2".into(), "3".into(), "4".into()],
                    correct_option: 0,
                    difficulty: Difficulty::Hard,
                    group: 0,
                },
            ],
        };
        assert_eq!(bank.count(Difficulty::Easy), 1);
        assert_eq!(bank.count(Difficulty::Medium), 0);
        assert_eq!(bank.count(Difficulty::Hard), 1);
        assert_eq!(bank.len(), 2);
    }

    #[test]
    fn has_option_bounds() {
        let question = Question {
            id: "q".into(),
            prompt: "?".into(),
            options: vec!["1".into(), "2".into(), "3".into(), "4".into()],
            correct_option: 0,
            difficulty: Difficulty::Medium,
            group: 0,
        };
        assert!(question.has_option(0));
        assert!(question.has_option(3));
        assert!(!question.has_option(4));
    }
}
