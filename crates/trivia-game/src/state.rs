// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session states.

use serde::{Deserialize, Serialize};
use trivia_core::Question;

/// Conversation state of one chat.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// A chat the bot has never talked to.
    #[default]
    Greeting,
    /// Waiting for a command outside a game.
    Idle,
    InGame(InGame),
}

impl SessionState {
    /// Variant name, also used as the persisted tag.
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Greeting => "Greeting",
            SessionState::Idle => "Idle",
            SessionState::InGame(_) => "InGame",
        }
    }
}

/// A game in progress.
///
/// `current_index` always points at an unanswered question: answering the
/// last one moves the chat back to [`SessionState::Idle`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InGame {
    pub questions: Vec<Question>,
    pub game_id: String,
    pub current_index: usize,
    pub score: u32,
}

impl InGame {
    pub fn new(questions: Vec<Question>, game_id: impl Into<String>) -> Self {
        Self {
            questions,
            game_id: game_id.into(),
            current_index: 0,
            score: 0,
        }
    }

    /// The question awaiting an answer.
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 >= self.questions.len()
    }
}
