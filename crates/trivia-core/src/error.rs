// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the trivia bot core.

use thiserror::Error;

use crate::types::Difficulty;

/// The primary error type used across the session core and its collaborators.
#[derive(Debug, Error)]
pub enum TriviaError {
    /// The per-chat session lock could not be taken within the attempt budget.
    #[error("failed to lock {key} after {max_attempts} attempts")]
    LockAcquisition { key: String, max_attempts: u32 },

    /// The inbound event is missing fields the state machine depends on.
    #[error("malformed event: {0}")]
    MalformedEvent(String),

    /// The question bank cannot satisfy the configured difficulty quota.
    #[error(
        "not enough {difficulty} questions to start a game: requested {requested}, available {available}"
    )]
    InsufficientQuestions {
        difficulty: Difficulty,
        requested: usize,
        available: usize,
    },

    /// A persisted session could not be turned back into a state.
    #[error("failed to decode session state: {0}")]
    StateDecode(String),

    /// Storage backend errors (connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The question bank could not be read or contains invalid entries.
    #[error("question source error: {message}")]
    QuestionSource {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration errors surfaced at runtime.
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

/// How a failure should be reported by whatever transport delivered the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Worth retrying later (lock contention, backend hiccup).
    Transient,
    /// The event itself was bad; retrying the same payload will not help.
    ClientInput,
    /// The service cannot serve the request with its current resources.
    Capacity,
    /// Corrupted data or a bug; needs an operator.
    Fatal,
}

impl FailureKind {
    /// HTTP status a webhook transport should answer with.
    pub fn status_code(self) -> u16 {
        match self {
            FailureKind::Transient => 503,
            FailureKind::ClientInput => 400,
            FailureKind::Capacity => 503,
            FailureKind::Fatal => 500,
        }
    }

    /// Text safe to show to an end user. Never includes internal error detail.
    pub fn user_message(self) -> &'static str {
        match self {
            FailureKind::ClientInput => "Sorry, I could not read that. Please try again.",
            FailureKind::Transient | FailureKind::Capacity | FailureKind::Fatal => {
                "Something went wrong on our side. Please try again later."
            }
        }
    }
}

impl TriviaError {
    /// Classifies this error for reporting.
    pub fn kind(&self) -> FailureKind {
        match self {
            TriviaError::LockAcquisition { .. } | TriviaError::Storage { .. } => {
                FailureKind::Transient
            }
            TriviaError::MalformedEvent(_) => FailureKind::ClientInput,
            TriviaError::InsufficientQuestions { .. } => FailureKind::Capacity,
            TriviaError::StateDecode(_)
            | TriviaError::QuestionSource { .. }
            | TriviaError::Config(_)
            | TriviaError::Internal(_) => FailureKind::Fatal,
        }
    }

    /// Wraps any error as a storage failure.
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        TriviaError::Storage {
            source: Box::new(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_error_message_names_key_and_attempts() {
        let err = TriviaError::LockAcquisition {
            key: "lock_42".into(),
            max_attempts: 3,
        };
        assert_eq!(err.to_string(), "failed to lock lock_42 after 3 attempts");
        assert_eq!(err.kind(), FailureKind::Transient);
        assert_eq!(err.kind().status_code(), 503);
    }

    #[test]
    fn insufficient_questions_is_a_capacity_failure() {
        let err = TriviaError::InsufficientQuestions {
            difficulty: Difficulty::Hard,
            requested: 2,
            available: 1,
        };
        assert!(err.to_string().contains("hard"));
        assert_eq!(err.kind(), FailureKind::Capacity);
    }

    #[test]
    fn malformed_event_is_client_input() {
        let err = TriviaError::MalformedEvent("empty text".into());
        assert_eq!(err.kind(), FailureKind::ClientInput);
        assert_eq!(err.kind().status_code(), 400);
    }

    #[test]
    fn decode_errors_are_fatal() {
        let err = TriviaError::StateDecode("unknown tag".into());
        assert_eq!(err.kind(), FailureKind::Fatal);
        assert_eq!(err.kind().status_code(), 500);
    }

    #[test]
    fn user_message_never_leaks_detail() {
        let err = TriviaError::Internal("secret connection string".into());
        assert!(!err.kind().user_message().contains("secret"));
    }
}
