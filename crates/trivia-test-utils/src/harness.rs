// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end coordinator tests.
//!
//! `TestHarness` wires the state machine, a session coordinator, storage
//! backends and a recording executor together, so a test can drive chats with
//! `send_text()` / `press()` and inspect what was sent and stored.

use std::sync::Arc;

use trivia_core::{
    CallbackQuery, ChatId, Event, MessageRef, Question, Randomness, SessionStore, TriviaError,
};
use trivia_game::{GameQuotas, SessionState, StateMachine};
use trivia_session::{
    LockSettings, SessionCoordinator, SessionLock, StateBijection, dispatch, traced,
};
use trivia_storage::{Database, SessionBackends};

use crate::clock::ManualClock;
use crate::executor::RecordingExecutor;
use crate::fixtures::{IdentityRandomness, StaticQuestionSource, arithmetic_bank};

/// Where the harness keeps sessions and locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HarnessBackend {
    #[default]
    Memory,
    /// A fresh SQLite database in a temporary directory.
    Sqlite,
}

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    bank: Vec<Question>,
    quotas: GameQuotas,
    randomness: Arc<dyn Randomness>,
    backend: HarnessBackend,
    trace_states: bool,
    lock: LockSettings,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            bank: arithmetic_bank(),
            quotas: GameQuotas::new(1, 1, 1),
            randomness: Arc::new(IdentityRandomness::new()),
            backend: HarnessBackend::Memory,
            trace_states: false,
            lock: LockSettings::default(),
        }
    }

    /// Replace the default arithmetic bank.
    pub fn with_bank(mut self, bank: Vec<Question>) -> Self {
        self.bank = bank;
        self
    }

    pub fn with_quotas(mut self, quotas: GameQuotas) -> Self {
        self.quotas = quotas;
        self
    }

    pub fn with_randomness(mut self, randomness: Arc<dyn Randomness>) -> Self {
        self.randomness = randomness;
        self
    }

    pub fn with_backend(mut self, backend: HarnessBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Wrap the state machine in the logging decorator.
    pub fn with_trace_states(mut self, enabled: bool) -> Self {
        self.trace_states = enabled;
        self
    }

    pub fn with_lock_settings(mut self, settings: LockSettings) -> Self {
        self.lock = settings;
        self
    }

    /// Build the test harness, creating all required subsystems.
    pub async fn build(self) -> Result<TestHarness, TriviaError> {
        let (backends, temp_dir) = match self.backend {
            HarnessBackend::Memory => (SessionBackends::memory(), None),
            HarnessBackend::Sqlite => {
                let temp_dir = tempfile::TempDir::new().map_err(TriviaError::storage)?;
                let db_path = temp_dir.path().join("test.db");
                let db = Database::open(&db_path.to_string_lossy()).await?;
                (SessionBackends::sqlite(Arc::new(db)), Some(temp_dir))
            }
        };

        let machine = StateMachine::new(
            Arc::new(StaticQuestionSource::new(self.bank)),
            self.randomness,
            self.quotas,
        );
        let clock = Arc::new(ManualClock::new());
        let lock = SessionLock::new(backends.lock.clone(), clock.clone(), self.lock);
        let coordinator = SessionCoordinator::new(
            traced(machine, self.trace_states),
            backends.store.clone(),
            lock,
        );

        Ok(TestHarness {
            coordinator,
            executor: RecordingExecutor::new(),
            backends,
            clock,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete session stack with recorded output and inspectable storage.
pub struct TestHarness {
    /// The coordinator under test.
    pub coordinator: SessionCoordinator,
    /// Every action dispatched through the harness.
    pub executor: RecordingExecutor,
    /// Session store and lock backend shared with the coordinator.
    pub backends: SessionBackends,
    /// Clock driving the session lock.
    pub clock: Arc<ManualClock>,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: Option<tempfile::TempDir>,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Dispatch a typed line of text (message or command) for `chat`.
    pub async fn send_text(&self, chat: ChatId, text: &str) -> Result<(), TriviaError> {
        self.dispatch(Event::from_text(chat, text)).await
    }

    /// Dispatch a button press carrying `data` on message `message_id`.
    pub async fn press(&self, chat: ChatId, message_id: i64, data: &str) -> Result<(), TriviaError> {
        self.dispatch(Event::CallbackQuery(CallbackQuery {
            id: Some(format!("cb-{message_id}")),
            data: data.to_string(),
            message: MessageRef {
                chat_id: chat,
                text: String::new(),
            },
            message_id,
        }))
        .await
    }

    /// Press button `number` (1-based) of the last keyboard that was sent.
    pub async fn press_button(&self, chat: ChatId, number: usize) -> Result<(), TriviaError> {
        let data = self
            .executor
            .last_keyboard()
            .await
            .and_then(|keyboard| keyboard.buttons().nth(number.wrapping_sub(1)).cloned())
            .map(|button| button.callback_data)
            .ok_or_else(|| TriviaError::Internal(format!("no button {number} to press")))?;
        self.press(chat, 1, &data).await
    }

    pub async fn dispatch(&self, event: Event) -> Result<(), TriviaError> {
        dispatch(&self.coordinator, &self.executor, event).await
    }

    /// Decoded session state of `chat`, if one has been stored.
    pub async fn state(&self, chat: ChatId) -> Result<Option<SessionState>, TriviaError> {
        match self.backends.store.get(chat).await? {
            Some(stored) => StateBijection::new(stored.is_logging_wrapper)
                .backward(&stored)
                .map(Some),
            None => Ok(None),
        }
    }

    /// Texts sent so far, across all chats.
    pub async fn sent_texts(&self) -> Vec<String> {
        self.executor.sent_texts().await
    }
}
