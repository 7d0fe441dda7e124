// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Logging decorator for state transitions.

use std::sync::Arc;

use tracing::{debug, info};
use trivia_core::{ChatId, Event, OutMessage, TriviaError};
use trivia_game::{Response, SessionState, Transition};

/// Wraps a [`Transition`] and logs every dispatch into a state.
pub struct LoggingTransition<T> {
    inner: T,
}

impl<T: Transition> LoggingTransition<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

fn operation(event: &Event) -> &'static str {
    match event {
        Event::Message { .. } => "process_message",
        Event::Command { .. } => "process_command",
        Event::CallbackQuery(_) => "process_callback_query",
    }
}

impl<T: Transition> Transition for LoggingTransition<T> {
    fn transition(
        &self,
        state: &mut SessionState,
        event: &Event,
    ) -> Result<Option<Response>, TriviaError> {
        let from = state.name();
        info!(
            chat_id = %event.chat_id(),
            state = from,
            operation = operation(event),
            "dispatching event to state"
        );
        let result = self.inner.transition(state, event);
        if let Ok(Some(Response {
            next_state: Some(next),
            ..
        })) = &result
        {
            debug!(chat_id = %event.chat_id(), from, to = next.name(), "state replaced");
        }
        result
    }

    fn on_enter(&self, state: &SessionState, chat_id: ChatId) -> Option<OutMessage> {
        info!(%chat_id, state = state.name(), operation = "on_enter", "entering state");
        self.inner.on_enter(state, chat_id)
    }

    fn is_logging(&self) -> bool {
        true
    }
}

/// Wraps `machine` in the logging decorator when `enabled`.
pub fn traced<T: Transition + 'static>(machine: T, enabled: bool) -> Arc<dyn Transition> {
    if enabled {
        Arc::new(LoggingTransition::new(machine))
    } else {
        Arc::new(machine)
    }
}
