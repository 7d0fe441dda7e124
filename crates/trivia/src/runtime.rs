// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Assembles a session coordinator from configuration.

use std::sync::Arc;

use tracing::info;
use trivia_config::{GameConfig, TriviaConfig};
use trivia_core::TriviaError;
use trivia_game::{GameQuotas, StateMachine, ThreadRandomness};
use trivia_session::{LockSettings, SessionCoordinator, SessionLock, SystemClock, traced};
use trivia_storage::{JsonQuestionSource, open_backends};

/// The configured question bank, or the built-in one.
pub fn question_source(config: &GameConfig) -> Result<JsonQuestionSource, TriviaError> {
    match &config.questions_path {
        Some(path) => JsonQuestionSource::open(path),
        None => JsonQuestionSource::builtin(),
    }
}

pub async fn build_coordinator(config: &TriviaConfig) -> Result<SessionCoordinator, TriviaError> {
    let questions = question_source(&config.game)?;
    info!(questions = questions.len(), "question bank loaded");

    let machine = StateMachine::new(
        Arc::new(questions),
        Arc::new(ThreadRandomness),
        GameQuotas::from(&config.game),
    );
    let backends = open_backends(&config.storage).await?;
    info!(backend = %config.storage.backend, "session storage ready");

    let lock = SessionLock::new(
        backends.lock.clone(),
        Arc::new(SystemClock),
        LockSettings::from(&config.lock),
    );
    Ok(SessionCoordinator::new(
        traced(machine, config.bot.trace_states),
        backends.store,
        lock,
    ))
}
