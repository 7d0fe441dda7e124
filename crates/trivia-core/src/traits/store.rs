// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session store trait for persisting serialized session state.

use async_trait::async_trait;

use crate::error::TriviaError;
use crate::types::{ChatId, SerializedState};

/// Persists one serialized session per chat.
///
/// Implementations never interpret the payload. They are not required to be
/// transactional: callers hold the chat's session lock around `get`/`set`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the stored session for `chat_id`, or `None` for an unseen chat.
    async fn get(&self, chat_id: ChatId) -> Result<Option<SerializedState>, TriviaError>;

    /// Replaces the stored session for `chat_id`.
    async fn set(&self, chat_id: ChatId, state: SerializedState) -> Result<(), TriviaError>;
}
