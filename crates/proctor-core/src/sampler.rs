//! Fixed-composition test sampling.
//!
//! A sampled test always holds 10 easy, 5 medium, and 5 hard questions in a
//! randomized presentation order. A difficulty bucket smaller than its
//! required count is a configuration error and fails sampling outright
//! rather than silently producing a shorter test.

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::model::{Difficulty, Question, QuestionBank};

/// Easy questions per sampled test.
pub const EASY_COUNT: usize = 10;
/// Medium questions per sampled test.
pub const MEDIUM_COUNT: usize = 5;
/// Hard questions per sampled test.
pub const HARD_COUNT: usize = 5;
/// Total length of a sampled test.
pub const TEST_LEN: usize = EASY_COUNT + MEDIUM_COUNT + HARD_COUNT;

/// Errors that can occur while sampling a test from a bank.
#[derive(Debug, Error)]
pub enum SampleError {
    /// A difficulty bucket holds fewer questions than the test requires.
    #[error("bank has {available} {difficulty} question(s), sampling requires {required}")]
    InsufficientPool {
        difficulty: Difficulty,
        required: usize,
        available: usize,
    },
}

/// Number of questions a sampled test draws from the given bucket.
pub fn required_count(difficulty: Difficulty) -> usize {
    match difficulty {
        Difficulty::Easy => EASY_COUNT,
        Difficulty::Medium => MEDIUM_COUNT,
        Difficulty::Hard => HARD_COUNT,
    }
}

/// Sample a test from `bank`.
///
/// Each difficulty bucket is shuffled independently and a fixed-size prefix
/// taken, then the combined selection is shuffled once more so presentation
/// order mixes difficulties. The output is produced once per session; a new
/// sample only comes from an explicit restart.
pub fn sample_test<R: Rng + ?Sized>(
    bank: &QuestionBank,
    rng: &mut R,
) -> Result<Vec<Question>, SampleError> {
    let mut test = Vec::with_capacity(TEST_LEN);

    for difficulty in Difficulty::ALL {
        let required = required_count(difficulty);
        let mut bucket: Vec<Question> = bank
            .questions
            .iter()
            .filter(|q| q.difficulty == difficulty)
            .cloned()
            .collect();

        if bucket.len() < required {
            return Err(SampleError::InsufficientPool {
                difficulty,
                required,
                available: bucket.len(),
            });
        }

        bucket.shuffle(rng);
        test.extend(bucket.into_iter().take(required));
    }

    test.shuffle(rng);
    Ok(test)
}
