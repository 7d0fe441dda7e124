// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Virtual clock for lock retry tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use trivia_core::Clock;

/// A clock that only moves when told to, or when something sleeps on it.
///
/// `sleep` returns immediately after advancing virtual time, so retry loops
/// run at full speed while still observing the passage of time.
pub struct ManualClock {
    inner: Mutex<ClockState>,
}

struct ClockState {
    now: DateTime<Utc>,
    sleeps: Vec<Duration>,
}

impl ManualClock {
    /// Create a clock starting at `start`.
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            inner: Mutex::new(ClockState {
                now: start,
                sleeps: Vec::new(),
            }),
        }
    }

    /// Create a clock starting at the real current time.
    pub fn new() -> Self {
        Self::starting_at(Utc::now())
    }

    /// Move virtual time forward without recording a sleep.
    pub fn advance(&self, by: Duration) {
        let mut state = self.lock();
        state.now += to_delta(by);
    }

    /// Every duration passed to `sleep`, in call order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.lock().sleeps.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ClockState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.lock().now
    }

    async fn sleep(&self, duration: Duration) {
        let mut state = self.lock();
        state.now += to_delta(duration);
        state.sleeps.push(duration);
    }
}

fn to_delta(duration: Duration) -> TimeDelta {
    TimeDelta::from_std(duration).unwrap_or(TimeDelta::MAX)
}
