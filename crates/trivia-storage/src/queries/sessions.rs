// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session value reads and writes.

use rusqlite::{OptionalExtension, params};
use trivia_core::TriviaError;

use crate::database::{Database, map_tr_err};

/// Get the stored value for a session key.
pub async fn get_session(db: &Database, key: &str) -> Result<Option<String>, TriviaError> {
    let key = key.to_string();
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT value FROM sessions WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

/// Insert or replace the stored value for a session key.
pub async fn put_session(db: &Database, key: &str, value: String) -> Result<(), TriviaError> {
    let key = key.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO sessions (key, value, updated_at)
                 VALUES (?1, ?2, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
                 ON CONFLICT(key) DO UPDATE SET
                     value = excluded.value,
                     updated_at = excluded.updated_at",
                params![key, value],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}
