// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Time source injected into the lock retry loop.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait Clock: Send + Sync {
    /// Current wall-clock time, used to stamp lock expiries.
    fn now(&self) -> DateTime<Utc>;

    /// Waits for `duration` without blocking the executor thread.
    async fn sleep(&self, duration: Duration);
}
