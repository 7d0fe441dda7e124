// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lock backend trait: one conditional set-if-absent with expiry per call.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::TriviaError;

/// Storage primitive behind the per-chat session lock.
///
/// The retry policy lives in the caller; a backend makes exactly one attempt
/// per `try_acquire`.
#[async_trait]
pub trait LockBackend: Send + Sync {
    /// Sets `key` to `token` if the key is absent or its previous entry expired
    /// at or before `now`. The new entry expires at `now + ttl`.
    ///
    /// Returns `true` when this call took the lock.
    async fn try_acquire(
        &self,
        key: &str,
        token: &str,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<bool, TriviaError>;

    /// Deletes `key` if it is still held with `token`. Releasing a key that is
    /// unheld, or held under another token, is a no-op.
    async fn release(&self, key: &str, token: &str) -> Result<(), TriviaError>;
}
