// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The session coordinator: one event in, persisted state and actions out.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tracing::{debug, error, warn};
use trivia_core::{
    Action, ActionExecutor, CallbackQuery, ChatId, Event, OutMessage, SessionStore, TriviaError,
};
use trivia_game::{Response, SessionState, Transition};

use crate::bijection::StateBijection;
use crate::lock::SessionLock;

/// Serializes event handling per chat and owns the load, transition, save cycle.
pub struct SessionCoordinator {
    machine: Arc<dyn Transition>,
    bijection: StateBijection,
    store: Arc<dyn SessionStore>,
    lock: SessionLock,
}

impl SessionCoordinator {
    pub fn new(machine: Arc<dyn Transition>, store: Arc<dyn SessionStore>, lock: SessionLock) -> Self {
        let bijection = StateBijection::for_transition(machine.as_ref());
        Self {
            machine,
            bijection,
            store,
            lock,
        }
    }

    /// Handle one inbound event.
    ///
    /// The chat's lock is held while its state is loaded, transitioned and
    /// saved, and is released on every exit path, including a panic in the
    /// state machine. The returned actions are ordered: callback
    /// acknowledgement, reply, edit, entry message.
    pub async fn handle(&self, event: Event) -> Result<Vec<Action>, TriviaError> {
        let chat_id = event.chat_id();
        let guard = self.lock.acquire(&chat_id.lock_key()).await?;

        let outcome = AssertUnwindSafe(self.process(chat_id, &event))
            .catch_unwind()
            .await;

        let key = guard.key().to_string();
        if let Err(e) = self.lock.release(guard).await {
            warn!(%chat_id, key, error = %e, "failed to release session lock; it will expire");
        }

        match outcome {
            Ok(result) => result,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }

    async fn process(&self, chat_id: ChatId, event: &Event) -> Result<Vec<Action>, TriviaError> {
        let mut state = match self.store.get(chat_id).await? {
            Some(stored) => self.bijection.backward(&stored)?,
            None => SessionState::Greeting,
        };
        event.validate()?;

        let mut actions = Vec::new();
        if let Event::CallbackQuery(CallbackQuery { id: Some(id), .. }) = event {
            actions.push(Action::AnswerCallback {
                callback_id: id.clone(),
            });
        }

        let Some(response) = self.machine.transition(&mut state, event)? else {
            debug!(%chat_id, state = state.name(), kind = event.kind(), "event ignored");
            return Ok(actions);
        };

        let Response {
            reply,
            edit,
            next_state,
        } = response;
        actions.extend(reply.map(Action::SendMessage));
        actions.extend(edit.map(Action::EditMessage));

        match next_state {
            Some(next) => {
                self.store.set(chat_id, self.bijection.forward(&next)?).await?;
                debug!(%chat_id, from = state.name(), to = next.name(), "session state replaced");
                actions.extend(
                    self.machine
                        .on_enter(&next, chat_id)
                        .map(Action::SendMessage),
                );
            }
            None => {
                self.store.set(chat_id, self.bijection.forward(&state)?).await?;
            }
        }

        Ok(actions)
    }
}

/// Handle `event` and perform the resulting actions.
///
/// On failure the user gets a generic notice for the failure kind (never the
/// internal error text) and the error is returned for the transport to map.
pub async fn dispatch(
    coordinator: &SessionCoordinator,
    executor: &dyn ActionExecutor,
    event: Event,
) -> Result<(), TriviaError> {
    let chat_id = event.chat_id();
    match coordinator.handle(event).await {
        Ok(actions) => {
            for action in actions {
                executor.execute(action).await?;
            }
            Ok(())
        }
        Err(e) => {
            let kind = e.kind();
            error!(%chat_id, error = %e, status = kind.status_code(), "event handling failed");
            let notice = OutMessage::text(chat_id, kind.user_message());
            if let Err(send_err) = executor.execute(Action::SendMessage(notice)).await {
                warn!(%chat_id, error = %send_err, "failed to send failure notice");
            }
            Err(e)
        }
    }
}
