// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementations of the session store and lock backend, and
//! backend selection from configuration.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info};
use trivia_config::{StorageBackend, StorageConfig};
use trivia_core::{ChatId, LockBackend, SerializedState, SessionStore, TriviaError};

use crate::database::Database;
use crate::lock_expiry;
use crate::memory::{MemoryLockBackend, MemorySessionStore};
use crate::queries;

/// Session store over the `sessions` table. Values are JSON documents.
pub struct SqliteSessionStore {
    db: Arc<Database>,
}

impl SqliteSessionStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn get(&self, chat_id: ChatId) -> Result<Option<SerializedState>, TriviaError> {
        let Some(value) = queries::sessions::get_session(&self.db, &chat_id.session_key()).await?
        else {
            return Ok(None);
        };
        serde_json::from_str(&value)
            .map(Some)
            .map_err(|e| TriviaError::StateDecode(format!("session for chat {chat_id}: {e}")))
    }

    async fn set(&self, chat_id: ChatId, state: SerializedState) -> Result<(), TriviaError> {
        let value = serde_json::to_string(&state).map_err(TriviaError::storage)?;
        queries::sessions::put_session(&self.db, &chat_id.session_key(), value).await
    }
}

/// Lock backend over the `session_locks` table.
pub struct SqliteLockBackend {
    db: Arc<Database>,
}

impl SqliteLockBackend {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LockBackend for SqliteLockBackend {
    async fn try_acquire(
        &self,
        key: &str,
        token: &str,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<bool, TriviaError> {
        let expires_at = lock_expiry(now, ttl)?;
        queries::locks::try_acquire(
            &self.db,
            key,
            token,
            now.timestamp_millis(),
            expires_at.timestamp_millis(),
        )
        .await
    }

    async fn release(&self, key: &str, token: &str) -> Result<(), TriviaError> {
        queries::locks::release(&self.db, key, token).await
    }
}

/// A matched session store and lock backend.
#[derive(Clone)]
pub struct SessionBackends {
    pub store: Arc<dyn SessionStore>,
    pub lock: Arc<dyn LockBackend>,
}

impl SessionBackends {
    /// Fresh in-process backends.
    pub fn memory() -> Self {
        Self {
            store: Arc::new(MemorySessionStore::new()),
            lock: Arc::new(MemoryLockBackend::new()),
        }
    }

    /// Both backends over one SQLite database.
    pub fn sqlite(db: Arc<Database>) -> Self {
        Self {
            store: Arc::new(SqliteSessionStore::new(db.clone())),
            lock: Arc::new(SqliteLockBackend::new(db)),
        }
    }
}

/// Open the backends selected by `config.backend`.
pub async fn open_backends(config: &StorageConfig) -> Result<SessionBackends, TriviaError> {
    let backends = match config.backend {
        StorageBackend::Memory => SessionBackends::memory(),
        StorageBackend::Sqlite => {
            let db = Database::open_with(&config.database_path, config.wal_mode).await?;
            debug!(path = %config.database_path, "SQLite session storage initialized");
            SessionBackends::sqlite(Arc::new(db))
        }
    };
    info!(backend = %config.backend, "session backends ready");
    Ok(backends)
}
