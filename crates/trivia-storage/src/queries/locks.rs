// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Set-if-absent lock rows with expiry.

use rusqlite::{TransactionBehavior, params};
use trivia_core::TriviaError;

use crate::database::{Database, map_tr_err};

/// Take `key` for `token` unless a live row holds it.
///
/// Runs as one immediate transaction: expired rows for the key are swept,
/// then the new row is inserted only if none remains. Times are Unix
/// milliseconds.
pub async fn try_acquire(
    db: &Database,
    key: &str,
    token: &str,
    now_ms: i64,
    expires_at_ms: i64,
) -> Result<bool, TriviaError> {
    let key = key.to_string();
    let token = token.to_string();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            tx.execute(
                "DELETE FROM session_locks WHERE key = ?1 AND expires_at <= ?2",
                params![key, now_ms],
            )?;
            let inserted = tx.execute(
                "INSERT OR IGNORE INTO session_locks (key, token, expires_at) VALUES (?1, ?2, ?3)",
                params![key, token, expires_at_ms],
            )?;
            tx.commit()?;
            Ok(inserted == 1)
        })
        .await
        .map_err(map_tr_err)
}

/// Delete `key` only while it is still held by `token`.
pub async fn release(db: &Database, key: &str, token: &str) -> Result<(), TriviaError> {
    let key = key.to_string();
    let token = token.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "DELETE FROM session_locks WHERE key = ?1 AND token = ?2",
                params![key, token],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}
