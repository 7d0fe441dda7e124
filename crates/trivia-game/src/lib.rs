// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trivia game logic.
//!
//! [`SessionState`] is the per-chat conversation state and [`StateMachine`]
//! maps a state and an inbound event to a [`Response`]. Everything here is
//! synchronous and free of I/O; the question bank and randomness are injected.

pub mod format;
pub mod keyboard;
pub mod machine;
pub mod random;
pub mod response;
pub mod selection;
pub mod state;

pub use keyboard::{CallbackPayload, question_keyboard};
pub use machine::{StateMachine, Transition};
pub use random::ThreadRandomness;
pub use response::Response;
pub use selection::{GameQuotas, select_questions, shuffle_answers};
pub use state::{InGame, SessionState};
