// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence for the trivia bot.
//!
//! Two interchangeable backend pairs implement [`SessionStore`] and
//! [`LockBackend`]: process-local maps, and a WAL-mode SQLite database that
//! several processes on one host can share. Question banks are read from JSON.
//!
//! [`SessionStore`]: trivia_core::SessionStore
//! [`LockBackend`]: trivia_core::LockBackend

pub mod adapter;
pub mod database;
pub mod memory;
pub mod migrations;
pub mod queries;
pub mod questions;

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use trivia_core::TriviaError;

pub use adapter::{SessionBackends, SqliteLockBackend, SqliteSessionStore, open_backends};
pub use database::Database;
pub use memory::{MemoryLockBackend, MemorySessionStore};
pub use questions::JsonQuestionSource;

/// Instant at which a lock taken at `now` with `ttl` expires.
pub(crate) fn lock_expiry(now: DateTime<Utc>, ttl: Duration) -> Result<DateTime<Utc>, TriviaError> {
    TimeDelta::from_std(ttl)
        .ok()
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| TriviaError::Internal(format!("lock ttl {ttl:?} out of range")))
}
