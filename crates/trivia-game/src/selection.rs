// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Question selection and answer shuffling for a new game.

use trivia_config::GameConfig;
use trivia_core::{Difficulty, Question, Randomness, TriviaError};

/// How many questions of each difficulty a game asks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameQuotas {
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
}

impl GameQuotas {
    pub fn new(easy: usize, medium: usize, hard: usize) -> Self {
        Self { easy, medium, hard }
    }

    pub fn quota(&self, difficulty: Difficulty) -> usize {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    pub fn total(&self) -> usize {
        self.easy + self.medium + self.hard
    }
}

impl From<&GameConfig> for GameQuotas {
    fn from(config: &GameConfig) -> Self {
        Self::new(
            config.easy_question_count,
            config.medium_question_count,
            config.hard_question_count,
        )
    }
}

const DIFFICULTIES: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

fn slot(difficulty: Difficulty) -> usize {
    match difficulty {
        Difficulty::Easy => 0,
        Difficulty::Medium => 1,
        Difficulty::Hard => 2,
    }
}

/// Picks questions for one game.
///
/// Walks the bank in order, taking each question whose difficulty bucket is
/// not yet full, and stops once every bucket is full. The result is ordered
/// easy, medium, hard, keeping bank order within a bucket.
pub fn select_questions(bank: &[Question], quotas: GameQuotas) -> Result<Vec<Question>, TriviaError> {
    let mut remaining = DIFFICULTIES.map(|d| quotas.quota(d));
    let mut selected = Vec::with_capacity(quotas.total());

    for question in bank {
        if remaining.iter().all(|&n| n == 0) {
            break;
        }
        let left = &mut remaining[slot(question.difficulty)];
        if *left > 0 {
            *left -= 1;
            selected.push(question.clone());
        }
    }

    if let Some(difficulty) = DIFFICULTIES.into_iter().find(|d| remaining[slot(*d)] > 0) {
        let requested = quotas.quota(difficulty);
        return Err(TriviaError::InsufficientQuestions {
            difficulty,
            requested,
            available: requested - remaining[slot(difficulty)],
        });
    }

    selected.sort_by_key(|q| q.difficulty);
    Ok(selected)
}

/// Returns a copy of `question` with its answers permuted by `random`.
///
/// The correct answer is tracked by position, so duplicate answer texts
/// cannot confuse the remapping.
pub fn shuffle_answers(question: &Question, random: &dyn Randomness) -> Result<Question, TriviaError> {
    let mut order: Vec<usize> = (0..question.answers.len()).collect();
    random.shuffle(&mut order);

    let mut seen = vec![false; order.len()];
    for &i in &order {
        match seen.get_mut(i) {
            Some(slot) if !*slot => *slot = true,
            _ => {
                return Err(TriviaError::Internal(format!(
                    "answer shuffle returned a non-permutation: {order:?}"
                )));
            }
        }
    }

    let correct_answer = order
        .iter()
        .position(|&i| i == question.correct_answer)
        .ok_or_else(|| {
            TriviaError::Internal(format!(
                "correct answer {} lost during shuffle",
                question.correct_answer
            ))
        })?;

    Ok(Question {
        answers: order.iter().map(|&i| question.answers[i].clone()).collect(),
        correct_answer,
        ..question.clone()
    })
}
