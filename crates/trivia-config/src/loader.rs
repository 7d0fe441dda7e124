// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./trivia.toml` > `~/.config/trivia/trivia.toml` > `/etc/trivia/trivia.toml`
//! with environment variable overrides via the `TRIVIA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::TriviaConfig;

pub(crate) const SYSTEM_CONFIG_PATH: &str = "/etc/trivia/trivia.toml";

/// Sections recognised in `TRIVIA_<SECTION>_<KEY>` variable names.
const ENV_SECTIONS: [&str; 4] = ["bot", "game", "storage", "lock"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/trivia/trivia.toml`
/// 3. `~/.config/trivia/trivia.toml`
/// 4. `./trivia.toml`
/// 5. `TRIVIA_*` environment variables
pub fn load_config() -> Result<TriviaConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<TriviaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TriviaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TriviaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TriviaConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the layered Figment before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(TriviaConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("trivia/trivia.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("trivia.toml"))
        .merge(env_provider())
}

/// Environment provider with explicit section mapping.
///
/// Only the first underscore after the section name becomes a dot, so
/// `TRIVIA_LOCK_MAX_ATTEMPTS` maps to `lock.max_attempts`.
fn env_provider() -> Env {
    Env::prefixed("TRIVIA_").map(|key| map_env_key(key.as_str()).into())
}

fn map_env_key(key: &str) -> String {
    for section in ENV_SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}
