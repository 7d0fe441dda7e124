// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Answer keyboards and the callback data embedded in their buttons.

use std::fmt;
use std::str::FromStr;

use trivia_core::{Button, Keyboard};

/// Data carried by an answer button: `{game_id}.{question_index}.{answer}`.
///
/// `answer` stays raw text so a tampered button is answered with the same
/// correction a typed answer would get.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackPayload {
    pub game_id: String,
    pub question_index: usize,
    pub answer: String,
}

impl CallbackPayload {
    pub fn new(game_id: impl Into<String>, question_index: usize, answer: usize) -> Self {
        Self {
            game_id: game_id.into(),
            question_index,
            answer: answer.to_string(),
        }
    }
}

impl fmt::Display for CallbackPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.game_id, self.question_index, self.answer)
    }
}

/// Error for callback data that was not produced by [`question_keyboard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPayload;

impl FromStr for CallbackPayload {
    type Err = InvalidPayload;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('.');
        let (Some(game_id), Some(index), Some(answer), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(InvalidPayload);
        };
        if game_id.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidPayload);
        }
        let question_index = index.parse().map_err(|_| InvalidPayload)?;
        Ok(Self {
            game_id: game_id.to_string(),
            question_index,
            answer: answer.to_string(),
        })
    }
}

/// Buttons `1..=answer_count` for one question.
///
/// Two answers share a row, four answers form a 2x2 grid, anything else is a
/// single row.
pub fn question_keyboard(game_id: &str, question_index: usize, answer_count: usize) -> Keyboard {
    let button = |answer: usize| Button {
        text: answer.to_string(),
        callback_data: CallbackPayload::new(game_id, question_index, answer).to_string(),
    };

    let rows = match answer_count {
        4 => vec![vec![button(1), button(2)], vec![button(3), button(4)]],
        n => vec![(1..=n).map(button).collect()],
    };
    Keyboard { rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_round_trips_through_text() {
        let payload = CallbackPayload::new("abc", 2, 3);
        assert_eq!(payload.to_string(), "abc.2.3");
        assert_eq!("abc.2.3".parse::<CallbackPayload>(), Ok(payload));
    }

    #[test]
    fn payload_rejects_wrong_shapes() {
        assert!("abc.2".parse::<CallbackPayload>().is_err());
        assert!("abc.2.3.4".parse::<CallbackPayload>().is_err());
        assert!("abc.x.3".parse::<CallbackPayload>().is_err());
        assert!("abc.-1.3".parse::<CallbackPayload>().is_err());
        assert!(".0.1".parse::<CallbackPayload>().is_err());
    }

    #[test]
    fn non_numeric_answer_is_kept_raw() {
        let payload: CallbackPayload = "g.0.nope".parse().unwrap();
        assert_eq!(payload.answer, "nope");
    }

    #[test]
    fn two_answers_fill_one_row() {
        let keyboard = question_keyboard("g", 0, 2);
        assert_eq!(keyboard.rows.len(), 1);
        assert_eq!(keyboard.rows[0].len(), 2);
        assert_eq!(keyboard.rows[0][1].callback_data, "g.0.2");
    }

    #[test]
    fn four_answers_form_a_grid() {
        let keyboard = question_keyboard("g", 1, 4);
        assert_eq!(keyboard.rows.len(), 2);
        assert_eq!(keyboard.rows[1][0].text, "3");
        assert_eq!(keyboard.rows[1][1].callback_data, "g.1.4");
    }

    #[test]
    fn other_counts_use_one_row() {
        let keyboard = question_keyboard("g", 0, 3);
        assert_eq!(keyboard.rows.len(), 1);
        assert_eq!(keyboard.buttons().count(), 3);
    }
}
