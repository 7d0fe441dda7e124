// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON flat-file question bank.

use std::path::Path;

use tracing::debug;
use trivia_core::{Question, QuestionSource, TriviaError};

const BUILTIN_BANK: &str = include_str!("../questions/builtin.json");

/// Question bank parsed and validated once, then served from memory.
///
/// The file is a JSON array of objects with `text`, `answers`, `points`,
/// `difficulty` (`easy`, `medium` or `hard`) and a zero-based `correct_answer`.
#[derive(Debug, Clone)]
pub struct JsonQuestionSource {
    questions: Vec<Question>,
}

impl JsonQuestionSource {
    /// Read and validate the bank at `path`.
    pub fn open(path: &Path) -> Result<Self, TriviaError> {
        let content = std::fs::read_to_string(path).map_err(|e| TriviaError::QuestionSource {
            message: format!("cannot read {}", path.display()),
            source: Some(Box::new(e)),
        })?;
        let source = Self::from_json(&content)?;
        debug!(path = %path.display(), questions = source.questions.len(), "question bank loaded");
        Ok(source)
    }

    /// The bank compiled into the binary.
    pub fn builtin() -> Result<Self, TriviaError> {
        Self::from_json(BUILTIN_BANK)
    }

    /// Parse and validate a bank from JSON text.
    pub fn from_json(content: &str) -> Result<Self, TriviaError> {
        let questions: Vec<Question> =
            serde_json::from_str(content).map_err(|e| TriviaError::QuestionSource {
                message: "invalid question bank JSON".to_string(),
                source: Some(Box::new(e)),
            })?;
        for (i, question) in questions.iter().enumerate() {
            question
                .validate()
                .map_err(|reason| TriviaError::QuestionSource {
                    message: format!("question {i}: {reason}"),
                    source: None,
                })?;
        }
        Ok(Self { questions })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl QuestionSource for JsonQuestionSource {
    fn load_questions(&self) -> Result<Vec<Question>, TriviaError> {
        Ok(self.questions.clone())
    }
}
