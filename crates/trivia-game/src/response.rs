// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Result of one state transition.

use trivia_core::{MessageEdit, OutMessage};

use crate::state::SessionState;

/// What a state produced for one event.
///
/// `next_state: None` keeps the current state (including any in-place
/// changes); `Some` replaces it and runs the new state's entry hook.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Response {
    pub reply: Option<OutMessage>,
    pub edit: Option<MessageEdit>,
    pub next_state: Option<SessionState>,
}

impl Response {
    pub fn reply(message: OutMessage) -> Self {
        Self {
            reply: Some(message),
            ..Self::default()
        }
    }

    pub fn with_edit(mut self, edit: MessageEdit) -> Self {
        self.edit = Some(edit);
        self
    }

    pub fn with_next_state(mut self, state: SessionState) -> Self {
        self.next_state = Some(state);
        self
    }
}
