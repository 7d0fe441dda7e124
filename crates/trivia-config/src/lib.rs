// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the trivia bot.
//!
//! Provides TOML configuration parsing with strict validation (`deny_unknown_fields`),
//! XDG file hierarchy lookup, `TRIVIA_*` environment variable overrides, and
//! diagnostic error rendering with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use trivia_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("Lock attempts: {}", config.lock.max_attempts);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

use tracing::debug;

pub use diagnostic::{ConfigError, render_errors, render_report};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{BotConfig, GameConfig, LockConfig, StorageBackend, StorageConfig, TriviaConfig};

/// Load configuration from the XDG hierarchy and validate it.
///
/// On a Figment error the failure is converted to diagnostics carrying source
/// spans from whichever TOML files were read.
pub fn load_and_validate() -> Result<TriviaConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            debug!(backend = %config.storage.backend, "configuration loaded");
            Ok(config)
        }
        Err(err) => {
            let toml_sources = collect_toml_sources();
            Err(diagnostic::figment_to_config_errors(err, &toml_sources))
        }
    }
}

/// Load one explicit config file (plus env overrides) and validate it.
pub fn load_and_validate_path(path: &Path) -> Result<TriviaConfig, Vec<ConfigError>> {
    match loader::load_config_from_path(path) {
        Ok(config) => {
            validation::validate_config(&config)?;
            debug!(path = %path.display(), "configuration loaded");
            Ok(config)
        }
        Err(err) => {
            let sources = std::fs::read_to_string(path)
                .map(|content| vec![(path.display().to_string(), content)])
                .unwrap_or_default();
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<TriviaConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

fn collect_toml_sources() -> Vec<(String, String)> {
    let mut sources = Vec::new();

    if let Ok(content) = std::fs::read_to_string("trivia.toml") {
        let path = std::env::current_dir()
            .map(|d| d.join("trivia.toml").display().to_string())
            .unwrap_or_else(|_| "trivia.toml".to_string());
        sources.push((path, content));
    }

    if let Some(config_dir) = dirs::config_dir() {
        let path = config_dir.join("trivia/trivia.toml");
        if let Ok(content) = std::fs::read_to_string(&path) {
            sources.push((path.display().to_string(), content));
        }
    }

    let system_path = Path::new(loader::SYSTEM_CONFIG_PATH);
    if let Ok(content) = std::fs::read_to_string(system_path) {
        sources.push((system_path.display().to_string(), content));
    }

    sources
}
