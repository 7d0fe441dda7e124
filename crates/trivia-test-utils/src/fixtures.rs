// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic question banks and randomness.

use std::sync::atomic::{AtomicU64, Ordering};

use trivia_core::{Difficulty, Question, QuestionSource, Randomness, TriviaError};

/// Three two-answer arithmetic questions, one per difficulty, first answer correct.
///
/// Worth 1, 2 and 3 points, so answering all correctly scores 6.
pub fn arithmetic_bank() -> Vec<Question> {
    vec![
        Question::new("7+3", vec!["10".into(), "11".into()], 1, Difficulty::Easy, 0),
        Question::new("17+3", vec!["20".into(), "21".into()], 2, Difficulty::Medium, 0),
        Question::new("27+3", vec!["30".into(), "31".into()], 3, Difficulty::Hard, 0),
    ]
}

/// A question source that serves a fixed list.
pub struct StaticQuestionSource {
    questions: Vec<Question>,
}

impl StaticQuestionSource {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }
}

impl QuestionSource for StaticQuestionSource {
    fn load_questions(&self) -> Result<Vec<Question>, TriviaError> {
        Ok(self.questions.clone())
    }
}

/// Leaves answer order untouched and numbers games `game1`, `game2`, ...
#[derive(Default)]
pub struct IdentityRandomness {
    games: AtomicU64,
}

impl IdentityRandomness {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Randomness for IdentityRandomness {
    fn shuffle(&self, _indices: &mut [usize]) {}

    fn new_game_id(&self) -> String {
        next_game_id(&self.games)
    }
}

/// Reverses answer order, so the correct answer moves position.
#[derive(Default)]
pub struct ReverseRandomness {
    games: AtomicU64,
}

impl ReverseRandomness {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Randomness for ReverseRandomness {
    fn shuffle(&self, indices: &mut [usize]) {
        indices.reverse();
    }

    fn new_game_id(&self) -> String {
        next_game_id(&self.games)
    }
}

fn next_game_id(counter: &AtomicU64) -> String {
    format!("game{}", counter.fetch_add(1, Ordering::Relaxed) + 1)
}
