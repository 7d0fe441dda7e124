// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::{StorageBackend, TriviaConfig};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &TriviaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.bot.log_level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "bot.log_level `{}` is not one of {}",
                config.bot.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.bot.name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "bot.name must not be empty".to_string(),
        });
    }

    if config.game.total_questions() == 0 {
        errors.push(ConfigError::Validation {
            message: "game must ask at least one question; all question counts are 0".to_string(),
        });
    }

    if let Some(path) = &config.game.questions_path
        && path.as_os_str().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "game.questions_path must not be empty when set".to_string(),
        });
    }

    if config.storage.backend == StorageBackend::Sqlite
        && config.storage.database_path.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty for the sqlite backend".to_string(),
        });
    }

    if config.lock.expire_sec == 0 {
        errors.push(ConfigError::Validation {
            message: "lock.expire_sec must be greater than 0".to_string(),
        });
    }

    if config.lock.max_attempts < 1 {
        errors.push(ConfigError::Validation {
            message: "lock.max_attempts must be at least 1".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
