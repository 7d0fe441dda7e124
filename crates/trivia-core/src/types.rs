// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the state machine, the coordinator, and the backends.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::TriviaError;

/// Identifier of a chat conversation. Primary key for all session data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(pub i64);

impl ChatId {
    /// Key under which the chat's session state is stored.
    pub fn session_key(self) -> String {
        format!("state_{}", self.0)
    }

    /// Key under which the chat's session lock is held.
    pub fn lock_key(self) -> String {
        format!("lock_{}", self.0)
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Difficulty bucket of a question. Ordered from easiest to hardest.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A trivia question as supplied by the question bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub answers: Vec<String>,
    pub points: u32,
    pub difficulty: Difficulty,
    /// Zero-based index into `answers`.
    pub correct_answer: usize,
}

impl Question {
    pub fn new(
        text: impl Into<String>,
        answers: Vec<String>,
        points: u32,
        difficulty: Difficulty,
        correct_answer: usize,
    ) -> Self {
        Self {
            text: text.into(),
            answers,
            points,
            difficulty,
            correct_answer,
        }
    }

    /// Checks the structural constraints every question in a bank must meet.
    pub fn validate(&self) -> Result<(), String> {
        if self.answers.len() < 2 {
            return Err(format!(
                "question `{}` has {} answers, at least 2 are required",
                self.text,
                self.answers.len()
            ));
        }
        if self.points == 0 {
            return Err(format!("question `{}` must be worth at least 1 point", self.text));
        }
        if self.correct_answer >= self.answers.len() {
            return Err(format!(
                "question `{}` marks answer {} as correct but only has {} answers",
                self.text,
                self.correct_answer,
                self.answers.len()
            ));
        }
        Ok(())
    }
}

/// The originating message of a button press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRef {
    pub chat_id: ChatId,
    pub text: String,
}

/// A press on an inline keyboard button of a previously sent message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackQuery {
    /// Platform id used to acknowledge the press, if the transport has one.
    pub id: Option<String>,
    /// Data embedded in the pressed button.
    pub data: String,
    /// The message the keyboard was attached to.
    pub message: MessageRef,
    /// Platform id of that message, used to edit it.
    pub message_id: i64,
}

/// One inbound unit of work addressed to a single chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Message { chat_id: ChatId, text: String },
    Command { chat_id: ChatId, text: String },
    CallbackQuery(CallbackQuery),
}

impl Event {
    /// Classifies free text typed by a user: a leading `/` makes it a command.
    pub fn from_text(chat_id: ChatId, text: impl Into<String>) -> Self {
        let text = text.into();
        if text.starts_with('/') {
            Event::Command { chat_id, text }
        } else {
            Event::Message { chat_id, text }
        }
    }

    /// The chat this event belongs to.
    pub fn chat_id(&self) -> ChatId {
        match self {
            Event::Message { chat_id, .. } | Event::Command { chat_id, .. } => *chat_id,
            Event::CallbackQuery(query) => query.message.chat_id,
        }
    }

    /// Short name used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Message { .. } => "message",
            Event::Command { .. } => "command",
            Event::CallbackQuery(_) => "callback_query",
        }
    }

    /// Rejects partially populated events before they reach the state machine.
    pub fn validate(&self) -> Result<(), TriviaError> {
        match self {
            Event::Message { text, .. } if text.trim().is_empty() => Err(
                TriviaError::MalformedEvent("message event has empty text".into()),
            ),
            Event::Command { text, .. } if !text.starts_with('/') || text.len() < 2 => Err(
                TriviaError::MalformedEvent(format!("command event `{text}` is not a command")),
            ),
            Event::CallbackQuery(query) if query.data.trim().is_empty() => Err(
                TriviaError::MalformedEvent("callback query event has empty data".into()),
            ),
            _ => Ok(()),
        }
    }
}

/// Text formatting mode understood by the messaging platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseMode {
    #[serde(rename = "HTML")]
    Html,
}

/// A single inline keyboard button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub text: String,
    /// Data sent back in the callback query, 1-64 bytes.
    pub callback_data: String,
}

/// Inline keyboard attached to an outbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    /// Iterates over every button, row by row.
    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.rows.iter().flatten()
    }
}

/// A message the bot sends to a chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutMessage {
    pub chat_id: ChatId,
    pub text: String,
    pub parse_mode: Option<ParseMode>,
    pub keyboard: Option<Keyboard>,
}

impl OutMessage {
    /// A plain text message.
    pub fn text(chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            parse_mode: None,
            keyboard: None,
        }
    }

    /// An HTML formatted message.
    pub fn html(chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            parse_mode: Some(ParseMode::Html),
            ..Self::text(chat_id, text)
        }
    }

    pub fn with_keyboard(mut self, keyboard: Keyboard) -> Self {
        self.keyboard = Some(keyboard);
        self
    }
}

/// Replacement text for a message already sent to a chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEdit {
    pub chat_id: ChatId,
    pub message_id: i64,
    pub text: String,
    pub parse_mode: Option<ParseMode>,
}

/// A platform side effect produced by handling one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SendMessage(OutMessage),
    EditMessage(MessageEdit),
    AnswerCallback { callback_id: String },
}

/// Storage form of a session state: a variant tag plus variant-specific fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedState {
    pub variant_tag: String,
    #[serde(default)]
    pub payload: serde_json::Map<String, serde_json::Value>,
    /// Set when the state was running behind the logging decorator.
    #[serde(default)]
    pub is_logging_wrapper: bool,
}
