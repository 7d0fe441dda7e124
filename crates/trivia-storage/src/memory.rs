// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-local session store and lock backend.
//!
//! Suitable for a single bot process. Everything is lost on restart.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use trivia_core::{ChatId, LockBackend, SerializedState, SessionStore, TriviaError};

use crate::lock_expiry;

/// Session store backed by a concurrent map.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: DashMap<ChatId, SerializedState>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of chats with a stored session.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, chat_id: ChatId) -> Result<Option<SerializedState>, TriviaError> {
        Ok(self.sessions.get(&chat_id).map(|entry| entry.value().clone()))
    }

    async fn set(&self, chat_id: ChatId, state: SerializedState) -> Result<(), TriviaError> {
        self.sessions.insert(chat_id, state);
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct LockEntry {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Lock backend backed by a concurrent map with per-entry expiry.
#[derive(Debug, Default)]
pub struct MemoryLockBackend {
    locks: DashMap<String, LockEntry>,
}

impl MemoryLockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token currently holding `key`, ignoring expiry.
    pub fn holder(&self, key: &str) -> Option<String> {
        self.locks.get(key).map(|entry| entry.token.clone())
    }
}

#[async_trait]
impl LockBackend for MemoryLockBackend {
    async fn try_acquire(
        &self,
        key: &str,
        token: &str,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<bool, TriviaError> {
        let entry = LockEntry {
            token: token.to_string(),
            expires_at: lock_expiry(now, ttl)?,
        };
        match self.locks.entry(key.to_string()) {
            Entry::Vacant(vacant) => {
                vacant.insert(entry);
                Ok(true)
            }
            Entry::Occupied(mut occupied) if occupied.get().expires_at <= now => {
                occupied.insert(entry);
                Ok(true)
            }
            Entry::Occupied(_) => Ok(false),
        }
    }

    async fn release(&self, key: &str, token: &str) -> Result<(), TriviaError> {
        self.locks.remove_if(key, |_, entry| entry.token == token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const TTL: Duration = Duration::from_secs(5);

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn state(tag: &str) -> SerializedState {
        SerializedState {
            variant_tag: tag.into(),
            payload: serde_json::Map::new(),
            is_logging_wrapper: false,
        }
    }

    #[tokio::test]
    async fn store_returns_none_for_unseen_chat() {
        let store = MemorySessionStore::new();
        assert!(store.get(ChatId(1)).await.unwrap().is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn store_overwrites_per_chat() {
        let store = MemorySessionStore::new();
        store.set(ChatId(1), state("Greeting")).await.unwrap();
        store.set(ChatId(1), state("Idle")).await.unwrap();
        store.set(ChatId(2), state("Greeting")).await.unwrap();
        assert_eq!(store.get(ChatId(1)).await.unwrap(), Some(state("Idle")));
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn lock_is_exclusive_until_expiry() {
        let locks = MemoryLockBackend::new();
        assert!(locks.try_acquire("lock_1", "a", at(0), TTL).await.unwrap());
        assert!(!locks.try_acquire("lock_1", "b", at(4), TTL).await.unwrap());
        assert!(locks.try_acquire("lock_2", "b", at(4), TTL).await.unwrap());
        assert!(locks.try_acquire("lock_1", "b", at(5), TTL).await.unwrap());
        assert_eq!(locks.holder("lock_1").as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn expired_holder_cannot_release_new_holder() {
        let locks = MemoryLockBackend::new();
        assert!(locks.try_acquire("lock_1", "a", at(0), TTL).await.unwrap());
        assert!(locks.try_acquire("lock_1", "b", at(10), TTL).await.unwrap());
        locks.release("lock_1", "a").await.unwrap();
        assert_eq!(locks.holder("lock_1").as_deref(), Some("b"));

        locks.release("lock_1", "b").await.unwrap();
        assert!(locks.holder("lock_1").is_none());
        locks.release("lock_1", "b").await.unwrap();
    }
}
