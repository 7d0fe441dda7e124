// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session coordination for the trivia bot.
//!
//! [`SessionCoordinator::handle`] is the single entry point for inbound
//! events: it locks the chat, loads its state through the [`StateBijection`],
//! runs the state machine, persists the result, and unlocks the chat before
//! handing the resulting actions back to the caller.

pub mod bijection;
pub mod coordinator;
pub mod lock;
pub mod logging;

pub use bijection::StateBijection;
pub use coordinator::{SessionCoordinator, dispatch};
pub use lock::{LockGuard, LockSettings, SessionLock, SystemClock};
pub use logging::{LoggingTransition, traced};
