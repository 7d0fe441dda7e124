// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the trivia bot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use strum::Display;

/// Top-level trivia bot configuration.
///
/// Every section is optional and defaults to values that run a one question
/// per difficulty game against in-process storage.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TriviaConfig {
    /// Bot identity and logging settings.
    #[serde(default)]
    pub bot: BotConfig,

    /// Game construction settings.
    #[serde(default)]
    pub game: GameConfig,

    /// Session storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Per-chat session lock settings.
    #[serde(default)]
    pub lock: LockConfig,
}

/// Bot identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    /// Display name, also stripped from `/command@name` suffixes.
    #[serde(default = "default_bot_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log every dispatch into a session state.
    #[serde(default = "default_trace_states")]
    pub trace_states: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
            log_level: default_log_level(),
            trace_states: default_trace_states(),
        }
    }
}

fn default_bot_name() -> String {
    "trivia_bot".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_trace_states() -> bool {
    true
}

/// Game construction configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    #[serde(default = "default_question_count")]
    pub easy_question_count: usize,

    #[serde(default = "default_question_count")]
    pub medium_question_count: usize,

    #[serde(default = "default_question_count")]
    pub hard_question_count: usize,

    /// JSON question bank. `None` uses the built-in bank.
    #[serde(default)]
    pub questions_path: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            easy_question_count: default_question_count(),
            medium_question_count: default_question_count(),
            hard_question_count: default_question_count(),
            questions_path: None,
        }
    }
}

impl GameConfig {
    /// Number of questions in one game.
    pub fn total_questions(&self) -> usize {
        self.easy_question_count + self.medium_question_count + self.hard_question_count
    }
}

fn default_question_count() -> usize {
    1
}

/// Which session store and lock backend to run against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local maps. Sessions are lost on restart.
    #[default]
    Memory,
    /// A SQLite database file, shareable by processes on one host.
    Sqlite,
}

/// Session storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Path to the SQLite database file (sqlite backend only).
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("trivia").join("trivia.db"))
        .unwrap_or_else(|| PathBuf::from("trivia.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// Per-chat session lock configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LockConfig {
    /// Lock entry lifetime. A holder that dies keeps the chat blocked at most this long.
    #[serde(default = "default_expire_sec")]
    pub expire_sec: u64,

    /// Acquisition attempts before giving up.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Sleep between attempts, in milliseconds.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            expire_sec: default_expire_sec(),
            max_attempts: default_max_attempts(),
            delay_ms: default_delay_ms(),
        }
    }
}

fn default_expire_sec() -> u64 {
    5
}

fn default_max_attempts() -> u32 {
    10
}

fn default_delay_ms() -> u64 {
    100
}
