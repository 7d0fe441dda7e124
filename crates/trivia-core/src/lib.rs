// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the trivia bot.
//!
//! This crate provides the error type, the domain types shared by the state
//! machine and the session coordinator, and the traits every collaborator
//! (session store, lock backend, clock, question source, randomness, action
//! executor) implements.

pub mod error;
pub mod traits;
pub mod types;

pub use error::{FailureKind, TriviaError};
pub use types::{
    Action, Button, CallbackQuery, ChatId, Difficulty, Event, Keyboard, MessageEdit, MessageRef,
    OutMessage, ParseMode, Question, SerializedState,
};

pub use traits::{ActionExecutor, Clock, LockBackend, QuestionSource, Randomness, SessionStore};
