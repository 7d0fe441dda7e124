// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-chat session lock with bounded retry.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use trivia_config::LockConfig;
use trivia_core::{Clock, LockBackend, TriviaError};

/// Wall clock with tokio timers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Lock timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockSettings {
    /// Lifetime of a held lock. Bounds how long a crashed holder blocks a chat.
    pub ttl: Duration,
    pub max_attempts: u32,
    /// Pause between failed attempts.
    pub delay: Duration,
}

impl Default for LockSettings {
    fn default() -> Self {
        Self::from(&LockConfig::default())
    }
}

impl From<&LockConfig> for LockSettings {
    fn from(config: &LockConfig) -> Self {
        Self {
            ttl: Duration::from_secs(config.expire_sec),
            max_attempts: config.max_attempts,
            delay: Duration::from_millis(config.delay_ms),
        }
    }
}

/// Proof of a held lock. Pass it back to [`SessionLock::release`].
#[derive(Debug)]
#[must_use = "a held lock must be released"]
pub struct LockGuard {
    key: String,
    token: String,
}

impl LockGuard {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Mutual exclusion per lock key across every process sharing `backend`.
pub struct SessionLock {
    backend: Arc<dyn LockBackend>,
    clock: Arc<dyn Clock>,
    settings: LockSettings,
}

impl SessionLock {
    pub fn new(backend: Arc<dyn LockBackend>, clock: Arc<dyn Clock>, settings: LockSettings) -> Self {
        Self {
            backend,
            clock,
            settings,
        }
    }

    pub fn settings(&self) -> LockSettings {
        self.settings
    }

    /// Take `key`, retrying up to `max_attempts` times with a fixed delay.
    pub async fn acquire(&self, key: &str) -> Result<LockGuard, TriviaError> {
        let token = uuid::Uuid::new_v4().to_string();
        let max_attempts = self.settings.max_attempts;

        for attempt in 1..=max_attempts {
            let now = self.clock.now();
            if self
                .backend
                .try_acquire(key, &token, now, self.settings.ttl)
                .await?
            {
                debug!(key, attempt, "lock acquired");
                return Ok(LockGuard {
                    key: key.to_string(),
                    token,
                });
            }
            debug!(key, attempt, max_attempts, "lock busy");
            if attempt < max_attempts {
                self.clock.sleep(self.settings.delay).await;
            }
        }

        warn!(key, max_attempts, "giving up on lock");
        Err(TriviaError::LockAcquisition {
            key: key.to_string(),
            max_attempts,
        })
    }

    /// Release a held lock. A lock that already expired and was taken over is
    /// left with its new holder.
    pub async fn release(&self, guard: LockGuard) -> Result<(), TriviaError> {
        self.backend.release(&guard.key, &guard.token).await?;
        debug!(key = %guard.key, "lock released");
        Ok(())
    }
}
