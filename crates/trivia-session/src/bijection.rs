// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lossless conversion between [`SessionState`] and its stored form.

use serde_json::{Map, Value};
use trivia_core::{SerializedState, TriviaError};
use trivia_game::{InGame, SessionState, Transition};

const TAG_GREETING: &str = "Greeting";
const TAG_IDLE: &str = "Idle";
const TAG_IN_GAME: &str = "InGame";

/// Converts states to tagged documents and back.
///
/// The only trace the logging decorator leaves in storage is the
/// `is_logging_wrapper` flag; decoding ignores it because the decorator is
/// reapplied from configuration, not from stored data.
#[derive(Debug, Clone, Copy, Default)]
pub struct StateBijection {
    logging: bool,
}

impl StateBijection {
    pub fn new(logging: bool) -> Self {
        Self { logging }
    }

    /// Bijection matching whether `machine` runs behind the logging decorator.
    pub fn for_transition(machine: &dyn Transition) -> Self {
        Self::new(machine.is_logging())
    }

    pub fn forward(&self, state: &SessionState) -> Result<SerializedState, TriviaError> {
        let payload = match state {
            SessionState::Greeting | SessionState::Idle => Map::new(),
            SessionState::InGame(game) => match serde_json::to_value(game) {
                Ok(Value::Object(map)) => map,
                Ok(other) => {
                    return Err(TriviaError::Internal(format!(
                        "game encoded as non-object: {other}"
                    )));
                }
                Err(e) => return Err(TriviaError::storage(e)),
            },
        };
        Ok(SerializedState {
            variant_tag: state.name().to_string(),
            payload,
            is_logging_wrapper: self.logging,
        })
    }

    pub fn backward(&self, serialized: &SerializedState) -> Result<SessionState, TriviaError> {
        match serialized.variant_tag.as_str() {
            TAG_GREETING => Ok(SessionState::Greeting),
            TAG_IDLE => Ok(SessionState::Idle),
            TAG_IN_GAME => {
                let game: InGame = serde_json::from_value(Value::Object(serialized.payload.clone()))
                    .map_err(|e| TriviaError::StateDecode(format!("InGame payload: {e}")))?;
                check_game(&game)?;
                Ok(SessionState::InGame(game))
            }
            "" => Err(TriviaError::StateDecode("missing variant tag".to_string())),
            other => Err(TriviaError::StateDecode(format!("unknown variant tag `{other}`"))),
        }
    }
}

/// Rejects decoded games that could never have been persisted.
fn check_game(game: &InGame) -> Result<(), TriviaError> {
    if game.current_index >= game.questions.len() {
        return Err(TriviaError::StateDecode(format!(
            "game {} has current_index {} but {} questions",
            game.game_id,
            game.current_index,
            game.questions.len()
        )));
    }
    for (i, question) in game.questions.iter().enumerate() {
        question
            .validate()
            .map_err(|reason| TriviaError::StateDecode(format!("question {i}: {reason}")))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use trivia_core::{Difficulty, Question};

    fn arb_difficulty() -> impl Strategy<Value = Difficulty> {
        prop_oneof![
            Just(Difficulty::Easy),
            Just(Difficulty::Medium),
            Just(Difficulty::Hard)
        ]
    }

    fn arb_question() -> impl Strategy<Value = Question> {
        (
            ".{0,20}",
            proptest::collection::vec(".{0,8}", 2..6),
            1u32..10,
            arb_difficulty(),
        )
            .prop_flat_map(|(text, answers, points, difficulty)| {
                let len = answers.len();
                (0..len).prop_map(move |correct| {
                    Question::new(text.clone(), answers.clone(), points, difficulty, correct)
                })
            })
    }

    fn arb_game() -> impl Strategy<Value = InGame> {
        (
            proptest::collection::vec(arb_question(), 1..5),
            "[a-f0-9]{32}",
            0u32..100,
        )
            .prop_flat_map(|(questions, game_id, score)| {
                let len = questions.len();
                (0..len).prop_map(move |current_index| InGame {
                    questions: questions.clone(),
                    game_id: game_id.clone(),
                    current_index,
                    score,
                })
            })
    }

    fn arb_state() -> impl Strategy<Value = SessionState> {
        prop_oneof![
            Just(SessionState::Greeting),
            Just(SessionState::Idle),
            arb_game().prop_map(SessionState::InGame),
        ]
    }

    proptest! {
        #[test]
        fn backward_inverts_forward(state in arb_state(), logging in any::<bool>()) {
            let bijection = StateBijection::new(logging);
            let serialized = bijection.forward(&state).unwrap();
            prop_assert_eq!(serialized.is_logging_wrapper, logging);
            prop_assert_eq!(bijection.backward(&serialized).unwrap(), state);
        }

        #[test]
        fn survives_a_json_round_trip(state in arb_state()) {
            let bijection = StateBijection::default();
            let json = serde_json::to_string(&bijection.forward(&state).unwrap()).unwrap();
            let stored: SerializedState = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(bijection.backward(&stored).unwrap(), state);
        }
    }

    fn tagged(tag: &str) -> SerializedState {
        SerializedState {
            variant_tag: tag.to_string(),
            payload: Map::new(),
            is_logging_wrapper: false,
        }
    }

    #[test]
    fn unknown_or_missing_tag_is_fatal() {
        let bijection = StateBijection::default();
        assert!(matches!(
            bijection.backward(&tagged("Paused")),
            Err(TriviaError::StateDecode(_))
        ));
        assert!(matches!(
            bijection.backward(&tagged("")),
            Err(TriviaError::StateDecode(_))
        ));
    }

    #[test]
    fn wrapper_flag_does_not_change_decoded_state() {
        let bijection = StateBijection::new(false);
        let mut stored = tagged("Idle");
        stored.is_logging_wrapper = true;
        assert_eq!(bijection.backward(&stored).unwrap(), SessionState::Idle);
    }

    #[test]
    fn in_game_payload_uses_field_names() {
        let game = InGame::new(
            vec![Question::new("q", vec!["a".into(), "b".into()], 1, Difficulty::Easy, 0)],
            "g1",
        );
        let serialized = StateBijection::default()
            .forward(&SessionState::InGame(game))
            .unwrap();
        assert_eq!(serialized.variant_tag, "InGame");
        assert_eq!(serialized.payload["game_id"], "g1");
        assert_eq!(serialized.payload["current_index"], 0);
        assert_eq!(serialized.payload["questions"][0]["difficulty"], "easy");
    }

    #[test]
    fn finished_game_cannot_be_decoded() {
        let mut stored = tagged("InGame");
        stored.payload = serde_json::json!({
            "questions": [{"text": "q", "answers": ["a", "b"], "points": 1, "difficulty": "easy", "correct_answer": 0}],
            "game_id": "g",
            "current_index": 1,
            "score": 1
        })
        .as_object()
        .cloned()
        .unwrap();
        assert!(matches!(
            StateBijection::default().backward(&stored),
            Err(TriviaError::StateDecode(_))
        ));
    }

    #[test]
    fn malformed_payload_is_fatal() {
        let mut stored = tagged("InGame");
        stored.payload.insert("score".into(), Value::from("lots"));
        assert!(matches!(
            StateBijection::default().backward(&stored),
            Err(TriviaError::StateDecode(_))
        ));
    }
}
