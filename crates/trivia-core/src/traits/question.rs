// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Question bank access.

use crate::error::TriviaError;
use crate::types::Question;

/// Read-only supplier of the full question bank, in bank order.
pub trait QuestionSource: Send + Sync {
    fn load_questions(&self) -> Result<Vec<Question>, TriviaError>;
}
