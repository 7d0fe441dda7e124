// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All statements run on tokio-rusqlite's single background thread. Other
//! processes may open the same file; SQLite's file locking and the busy
//! timeout serialize them.

use std::time::Duration;

use tracing::debug;
use trivia_core::TriviaError;

use crate::migrations::run_migrations;

/// How long a statement waits for another process's write lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// An open, migrated SQLite database.
pub struct Database {
    conn: tokio_rusqlite::Connection,
    wal_mode: bool,
}

impl Database {
    /// Open (or create) the database at `path` in WAL mode and apply migrations.
    pub async fn open(path: &str) -> Result<Self, TriviaError> {
        Self::open_with(path, true).await
    }

    /// Open the database, choosing the journal mode.
    pub async fn open_with(path: &str, wal_mode: bool) -> Result<Self, TriviaError> {
        if let Some(parent) = std::path::Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(TriviaError::storage)?;
        }

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(TriviaError::storage)?;

        conn.call(move |conn| -> Result<(), rusqlite::Error> {
            conn.busy_timeout(BUSY_TIMEOUT)?;
            if wal_mode {
                let mode: String =
                    conn.query_row("PRAGMA journal_mode = WAL;", [], |row| row.get(0))?;
                debug!(journal_mode = %mode, "journal mode set");
            }
            conn.execute_batch("PRAGMA synchronous = NORMAL; PRAGMA foreign_keys = ON;")?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        conn.call(|conn| -> Result<(), TriviaError> { run_migrations(conn) })
            .await
            .map_err(TriviaError::storage)?;

        debug!(path, wal_mode, "database opened");
        Ok(Self { conn, wal_mode })
    }

    /// The underlying async connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoint the WAL and close the connection.
    pub async fn close(self) -> Result<(), TriviaError> {
        if self.wal_mode {
            self.conn
                .call(|conn| -> Result<(), rusqlite::Error> {
                    conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                    Ok(())
                })
                .await
                .map_err(map_tr_err)?;
            debug!("WAL checkpoint complete");
        }
        self.conn.close().await.map_err(TriviaError::storage)
    }
}

/// Convert tokio-rusqlite errors to [`TriviaError::Storage`].
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> TriviaError {
    TriviaError::storage(e)
}
