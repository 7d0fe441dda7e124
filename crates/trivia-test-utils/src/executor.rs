// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Action executor that records instead of talking to a platform.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use trivia_core::{Action, ActionExecutor, Keyboard, TriviaError};

/// Captures executed actions for assertion in tests.
#[derive(Clone, Default)]
pub struct RecordingExecutor {
    actions: Arc<Mutex<Vec<Action>>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// All actions executed so far, in order.
    pub async fn actions(&self) -> Vec<Action> {
        self.actions.lock().await.clone()
    }

    /// Texts of every `SendMessage` action, in order.
    pub async fn sent_texts(&self) -> Vec<String> {
        self.actions
            .lock()
            .await
            .iter()
            .filter_map(|action| match action {
                Action::SendMessage(message) => Some(message.text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Keyboard of the most recent message that carried one.
    pub async fn last_keyboard(&self) -> Option<Keyboard> {
        self.actions
            .lock()
            .await
            .iter()
            .rev()
            .find_map(|action| match action {
                Action::SendMessage(message) => message.keyboard.clone(),
                _ => None,
            })
    }

    /// Forget everything recorded so far.
    pub async fn clear(&self) {
        self.actions.lock().await.clear();
    }
}

#[async_trait]
impl ActionExecutor for RecordingExecutor {
    async fn execute(&self, action: Action) -> Result<(), TriviaError> {
        self.actions.lock().await.push(action);
        Ok(())
    }
}
