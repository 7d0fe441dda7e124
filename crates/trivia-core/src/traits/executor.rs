// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Action executor trait: the platform side of a handled event.

use async_trait::async_trait;

use crate::error::TriviaError;
use crate::types::Action;

/// Performs platform I/O for actions produced by the session coordinator.
#[async_trait]
pub trait ActionExecutor: Send + Sync {
    async fn execute(&self, action: Action) -> Result<(), TriviaError>;
}
