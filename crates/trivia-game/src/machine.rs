// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The session state machine.
//!
//! | state    | event              | reply                        | next state |
//! |----------|--------------------|------------------------------|------------|
//! | Greeting | message            | greeting                     | Idle       |
//! | Greeting | `/start`           | greeting and help            | Idle       |
//! | Greeting | other command      | "something went wrong"       | -          |
//! | Idle     | `/start`           | "starting game"              | InGame     |
//! | Idle     | `/help`            | help                         | -          |
//! | Idle     | anything else      | "did not understand"         | -          |
//! | InGame   | `/stop`            | "game over"                  | Idle       |
//! | InGame   | other command      | "not available in the game"  | -          |
//! | InGame   | message / callback | next question or final score | Idle after the last question |
//!
//! Callbacks outside a game, and callbacks for another game or question,
//! produce no response at all.

use std::sync::Arc;

use tracing::debug;
use trivia_core::{
    CallbackQuery, ChatId, Event, MessageEdit, OutMessage, ParseMode, QuestionSource, Randomness,
    TriviaError,
};

use crate::format;
use crate::keyboard::{CallbackPayload, question_keyboard};
use crate::response::Response;
use crate::selection::{GameQuotas, select_questions, shuffle_answers};
use crate::state::{InGame, SessionState};

/// Maps a state and an event to a response.
///
/// `Ok(None)` means the event was deliberately ignored: nothing is sent and
/// nothing is persisted. Implementations may mutate `state` in place for
/// changes that do not replace the variant.
pub trait Transition: Send + Sync {
    fn transition(
        &self,
        state: &mut SessionState,
        event: &Event,
    ) -> Result<Option<Response>, TriviaError>;

    /// Optional message sent when a chat enters `state`.
    fn on_enter(&self, state: &SessionState, chat_id: ChatId) -> Option<OutMessage>;

    /// Whether this transition is running behind the logging decorator.
    fn is_logging(&self) -> bool {
        false
    }
}

/// The trivia game rules.
pub struct StateMachine {
    questions: Arc<dyn QuestionSource>,
    random: Arc<dyn Randomness>,
    quotas: GameQuotas,
}

impl StateMachine {
    pub fn new(
        questions: Arc<dyn QuestionSource>,
        random: Arc<dyn Randomness>,
        quotas: GameQuotas,
    ) -> Self {
        Self {
            questions,
            random,
            quotas,
        }
    }

    fn new_game(&self) -> Result<InGame, TriviaError> {
        let bank = self.questions.load_questions()?;
        let questions = select_questions(&bank, self.quotas)?
            .iter()
            .map(|q| shuffle_answers(q, self.random.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        let game = InGame::new(questions, self.random.new_game_id());
        debug!(
            game_id = %game.game_id,
            questions = game.questions.len(),
            "constructed new game"
        );
        Ok(game)
    }

    fn greeting(&self, event: &Event) -> Option<Response> {
        match event {
            Event::Message { chat_id, .. } => Some(
                Response::reply(OutMessage::html(*chat_id, format::GREETING))
                    .with_next_state(SessionState::Idle),
            ),
            Event::Command { chat_id, text } => Some(match command_name(text) {
                "/start" => Response::reply(OutMessage::html(*chat_id, format::GREETING_WITH_HELP))
                    .with_next_state(SessionState::Idle),
                _ => Response::reply(OutMessage::html(*chat_id, format::GREETING_UNKNOWN_COMMAND)),
            }),
            Event::CallbackQuery(_) => None,
        }
    }

    fn idle(&self, event: &Event) -> Result<Option<Response>, TriviaError> {
        let response = match event {
            Event::Command { chat_id, text } => match command_name(text) {
                "/start" => {
                    let game = self.new_game()?;
                    Response::reply(OutMessage::html(*chat_id, format::STARTING_GAME))
                        .with_next_state(SessionState::InGame(game))
                }
                "/help" => Response::reply(OutMessage::html(*chat_id, format::HELP)),
                _ => Response::reply(OutMessage::html(*chat_id, format::NOT_UNDERSTOOD)),
            },
            Event::Message { chat_id, .. } => {
                Response::reply(OutMessage::html(*chat_id, format::NOT_UNDERSTOOD))
            }
            Event::CallbackQuery(_) => return Ok(None),
        };
        Ok(Some(response))
    }

    fn in_game(game: &mut InGame, event: &Event) -> Result<Option<Response>, TriviaError> {
        match event {
            Event::Command { chat_id, text } => Ok(Some(match command_name(text) {
                "/stop" => Response::reply(OutMessage::html(*chat_id, format::GAME_STOPPED))
                    .with_next_state(SessionState::Idle),
                _ => Response::reply(OutMessage::html(
                    *chat_id,
                    format::COMMAND_UNAVAILABLE_IN_GAME,
                )),
            })),
            Event::Message { chat_id, text } => {
                Ok(Some(Self::answer(game, *chat_id, text)?.into_response()))
            }
            Event::CallbackQuery(query) => Self::callback(game, query),
        }
    }

    fn callback(game: &mut InGame, query: &CallbackQuery) -> Result<Option<Response>, TriviaError> {
        let Ok(payload) = query.data.parse::<CallbackPayload>() else {
            debug!(data = %query.data, "ignoring unparseable callback data");
            return Ok(None);
        };
        if payload.game_id != game.game_id || payload.question_index != game.current_index {
            debug!(
                data = %query.data,
                game_id = %game.game_id,
                current_index = game.current_index,
                "ignoring stale callback"
            );
            return Ok(None);
        }

        let chat_id = query.message.chat_id;
        let answered_index = game.current_index;
        let answered = game
            .current_question()
            .cloned()
            .ok_or_else(|| index_out_of_range(game))?;

        Ok(Some(match Self::answer(game, chat_id, &payload.answer)? {
            Answer::Invalid(response) => response,
            Answer::Accepted { response, chosen } => response.with_edit(MessageEdit {
                chat_id,
                message_id: query.message_id,
                text: format::question_text(
                    format::question_header(answered_index),
                    &answered,
                    Some(chosen),
                ),
                parse_mode: Some(ParseMode::Html),
            }),
        }))
    }

    /// Scores `text` against the current question and advances the game.
    fn answer(game: &mut InGame, chat_id: ChatId, text: &str) -> Result<Answer, TriviaError> {
        let question = game
            .current_question()
            .ok_or_else(|| index_out_of_range(game))?;
        let (answer_count, correct_answer, points) =
            (question.answers.len(), question.correct_answer, question.points);

        let Some(chosen) = parse_answer(text, answer_count) else {
            return Ok(Answer::Invalid(Response::reply(OutMessage::html(
                chat_id,
                format::number_of_answers_help(answer_count),
            ))));
        };

        if chosen - 1 == correct_answer {
            game.score = game.score.saturating_add(points);
        }

        let response = if game.is_last_question() {
            Response::reply(OutMessage::html(chat_id, format::game_over(game.score)))
                .with_next_state(SessionState::Idle)
        } else {
            game.current_index += 1;
            let next = game
                .current_question()
                .ok_or_else(|| index_out_of_range(game))?;
            let keyboard = question_keyboard(&game.game_id, game.current_index, next.answers.len());
            Response::reply(
                OutMessage::html(
                    chat_id,
                    format::question_text(format::question_header(game.current_index), next, None),
                )
                .with_keyboard(keyboard),
            )
        };

        Ok(Answer::Accepted { response, chosen })
    }
}

impl Transition for StateMachine {
    fn transition(
        &self,
        state: &mut SessionState,
        event: &Event,
    ) -> Result<Option<Response>, TriviaError> {
        match state {
            SessionState::Greeting => Ok(self.greeting(event)),
            SessionState::Idle => self.idle(event),
            SessionState::InGame(game) => Self::in_game(game, event),
        }
    }

    fn on_enter(&self, state: &SessionState, chat_id: ChatId) -> Option<OutMessage> {
        let SessionState::InGame(game) = state else {
            return None;
        };
        let question = game.current_question()?;
        let keyboard = question_keyboard(&game.game_id, game.current_index, question.answers.len());
        Some(
            OutMessage::html(
                chat_id,
                format::question_text(format::question_header(game.current_index), question, None),
            )
            .with_keyboard(keyboard),
        )
    }
}

enum Answer {
    Invalid(Response),
    Accepted { response: Response, chosen: usize },
}

impl Answer {
    fn into_response(self) -> Response {
        match self {
            Answer::Invalid(response) | Answer::Accepted { response, .. } => response,
        }
    }
}

fn index_out_of_range(game: &InGame) -> TriviaError {
    TriviaError::Internal(format!(
        "game {} has no question at index {}",
        game.game_id, game.current_index
    ))
}

/// First word of a command with any `@botname` suffix removed.
pub fn command_name(text: &str) -> &str {
    let word = text.split_whitespace().next().unwrap_or("");
    word.split('@').next().unwrap_or(word)
}

/// Parses a 1-based answer number, accepting only `1..=answer_count`.
fn parse_answer(text: &str, answer_count: usize) -> Option<usize> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse::<usize>()
        .ok()
        .filter(|n| (1..=answer_count).contains(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use trivia_core::{Difficulty, MessageRef, Question};

    struct Bank(Vec<Question>);

    impl QuestionSource for Bank {
        fn load_questions(&self) -> Result<Vec<Question>, TriviaError> {
            Ok(self.0.clone())
        }
    }

    struct Identity;

    impl Randomness for Identity {
        fn shuffle(&self, _indices: &mut [usize]) {}

        fn new_game_id(&self) -> String {
            "game1".to_string()
        }
    }

    const CHAT: ChatId = ChatId(1);

    fn bank() -> Vec<Question> {
        vec![
            Question::new("7+3", vec!["10".into(), "11".into()], 1, Difficulty::Easy, 0),
            Question::new("17+3", vec!["20".into(), "21".into()], 2, Difficulty::Medium, 0),
            Question::new("27+3", vec!["30".into(), "31".into()], 3, Difficulty::Hard, 0),
        ]
    }

    fn machine() -> StateMachine {
        StateMachine::new(
            Arc::new(Bank(bank())),
            Arc::new(Identity),
            GameQuotas::new(1, 1, 1),
        )
    }

    fn message(text: &str) -> Event {
        Event::Message {
            chat_id: CHAT,
            text: text.into(),
        }
    }

    fn command(text: &str) -> Event {
        Event::Command {
            chat_id: CHAT,
            text: text.into(),
        }
    }

    fn callback(data: &str) -> Event {
        Event::CallbackQuery(CallbackQuery {
            id: None,
            data: data.into(),
            message: MessageRef {
                chat_id: CHAT,
                text: "question".into(),
            },
            message_id: 10,
        })
    }

    fn reply_text(response: &Response) -> &str {
        response.reply.as_ref().map(|m| m.text.as_str()).unwrap_or("")
    }

    /// Runs one event and applies `next_state` the way the coordinator does.
    fn step(machine: &StateMachine, state: &mut SessionState, event: Event) -> Response {
        let response = machine
            .transition(state, &event)
            .unwrap()
            .expect("event should produce a response");
        if let Some(next) = &response.next_state {
            *state = next.clone();
        }
        response
    }

    fn started(machine: &StateMachine) -> SessionState {
        let mut state = SessionState::Idle;
        step(machine, &mut state, command("/start"));
        state
    }

    fn game(state: &SessionState) -> &InGame {
        match state {
            SessionState::InGame(game) => game,
            other => panic!("expected InGame, got {other:?}"),
        }
    }

    #[test]
    fn greeting_message_moves_to_idle() {
        let mut state = SessionState::Greeting;
        let response = step(&machine(), &mut state, message("hi"));
        assert_eq!(reply_text(&response), format::GREETING);
        assert_eq!(state, SessionState::Idle);
    }

    #[test]
    fn greeting_start_moves_to_idle_with_help() {
        let mut state = SessionState::Greeting;
        let response = step(&machine(), &mut state, command("/start"));
        assert_eq!(reply_text(&response), format::GREETING_WITH_HELP);
        assert_eq!(state, SessionState::Idle);
    }

    #[test]
    fn greeting_other_command_stays() {
        let mut state = SessionState::Greeting;
        let response = step(&machine(), &mut state, command("/help"));
        assert_eq!(reply_text(&response), format::GREETING_UNKNOWN_COMMAND);
        assert!(response.next_state.is_none());
        assert_eq!(state, SessionState::Greeting);
    }

    #[test]
    fn idle_help_and_unknown_input() {
        let machine = machine();
        let mut state = SessionState::Idle;
        assert_eq!(reply_text(&step(&machine, &mut state, command("/help"))), format::HELP);
        assert_eq!(
            reply_text(&step(&machine, &mut state, command("/quit"))),
            format::NOT_UNDERSTOOD
        );
        assert_eq!(
            reply_text(&step(&machine, &mut state, message("hello"))),
            format::NOT_UNDERSTOOD
        );
        assert_eq!(state, SessionState::Idle);
    }

    #[test]
    fn idle_start_constructs_game() {
        let machine = machine();
        let mut state = SessionState::Idle;
        let response = step(&machine, &mut state, command("/start"));
        assert_eq!(reply_text(&response), format::STARTING_GAME);

        let game = game(&state);
        assert_eq!(game.current_index, 0);
        assert_eq!(game.score, 0);
        assert_eq!(game.game_id, "game1");
        assert_eq!(game.questions, bank());
    }

    #[test]
    fn command_with_bot_suffix_is_normalized() {
        let machine = machine();
        let mut state = SessionState::Idle;
        step(&machine, &mut state, command("/start@trivia_bot"));
        assert!(matches!(state, SessionState::InGame(_)));
        assert_eq!(command_name("/stop now"), "/stop");
    }

    #[test]
    fn entry_hook_sends_first_question_with_keyboard() {
        let machine = machine();
        let state = started(&machine);
        let message = machine.on_enter(&state, CHAT).expect("entry message");
        assert!(message.text.contains("Question:"));
        assert!(message.text.contains("<b>7+3</b>"));
        let keyboard = message.keyboard.expect("keyboard");
        assert_eq!(keyboard.rows[0][0].callback_data, "game1.0.1");

        assert!(machine.on_enter(&SessionState::Idle, CHAT).is_none());
        assert!(machine.on_enter(&SessionState::Greeting, CHAT).is_none());
    }

    #[test]
    fn arithmetic_game_scores_every_question() {
        let machine = machine();
        let mut state = started(&machine);

        step(&machine, &mut state, message("1"));
        assert_eq!((game(&state).score, game(&state).current_index), (1, 1));

        let response = step(&machine, &mut state, message("1"));
        assert_eq!((game(&state).score, game(&state).current_index), (3, 2));
        let keyboard = response.reply.unwrap().keyboard.unwrap();
        assert_eq!(keyboard.rows[0][1].callback_data, "game1.2.2");

        let response = step(&machine, &mut state, message("1"));
        assert_eq!(reply_text(&response), format::game_over(6));
        assert_eq!(response.next_state, Some(SessionState::Idle));
        assert_eq!(state, SessionState::Idle);
    }

    #[test]
    fn wrong_answers_advance_without_points() {
        let machine = machine();
        let mut state = started(&machine);
        step(&machine, &mut state, message("2"));
        assert_eq!((game(&state).score, game(&state).current_index), (0, 1));
    }

    #[test]
    fn score_saturates_instead_of_overflowing() {
        let bank = vec![
            Question::new("big", vec!["a".into(), "b".into()], u32::MAX, Difficulty::Easy, 0),
            Question::new("small", vec!["a".into(), "b".into()], 1, Difficulty::Medium, 0),
            Question::new("last", vec!["a".into(), "b".into()], 1, Difficulty::Hard, 0),
        ];
        let machine = StateMachine::new(
            Arc::new(Bank(bank)),
            Arc::new(Identity),
            GameQuotas::new(1, 1, 1),
        );
        let mut state = started(&machine);

        step(&machine, &mut state, message("1"));
        step(&machine, &mut state, message("1"));
        assert_eq!((game(&state).score, game(&state).current_index), (u32::MAX, 2));

        let response = step(&machine, &mut state, message("1"));
        assert_eq!(reply_text(&response), format::game_over(u32::MAX));
        assert_eq!(state, SessionState::Idle);
    }

    #[test]
    fn bad_answers_get_correction_and_change_nothing() {
        let machine = machine();
        let mut state = started(&machine);
        let before = state.clone();
        for text in ["foo", "0", "3", "-1", "1.0", "99999999999999999999999"] {
            let response = step(&machine, &mut state, message(text));
            assert_eq!(reply_text(&response), format::number_of_answers_help(2));
            assert!(response.next_state.is_none());
            assert_eq!(state, before, "input {text:?} mutated state");
        }
    }

    #[test]
    fn stop_ends_the_game() {
        let machine = machine();
        let mut state = started(&machine);
        let response = step(&machine, &mut state, command("/stop"));
        assert_eq!(reply_text(&response), format::GAME_STOPPED);
        assert_eq!(state, SessionState::Idle);
    }

    #[test]
    fn other_commands_are_refused_in_game() {
        let machine = machine();
        let mut state = started(&machine);
        let before = state.clone();
        let response = step(&machine, &mut state, command("/start"));
        assert_eq!(reply_text(&response), format::COMMAND_UNAVAILABLE_IN_GAME);
        assert_eq!(state, before);
    }

    #[test]
    fn callback_answer_edits_original_message() {
        let machine = machine();
        let mut state = started(&machine);
        let response = step(&machine, &mut state, callback("game1.0.2"));

        let edit = response.edit.expect("edit");
        assert_eq!(edit.message_id, 10);
        assert!(edit.text.starts_with("<b>&#10006 Question:</b>"));
        assert!(edit.text.contains("&#128308 2: 11"));
        assert!(edit.text.contains("&#128994 1: 10"));
        assert!(response.reply.unwrap().text.contains("17+3"));
        assert_eq!(game(&state).current_index, 1);
    }

    #[test]
    fn stale_callbacks_are_ignored() {
        let machine = machine();
        let mut state = started(&machine);
        let before = state.clone();
        for data in ["other.0.1", "game1.1.1", "garbage"] {
            let result = machine.transition(&mut state, &callback(data)).unwrap();
            assert!(result.is_none(), "callback {data:?} was not ignored");
            assert_eq!(state, before);
        }
    }

    #[test]
    fn out_of_range_callback_answer_gets_correction_without_edit() {
        let machine = machine();
        let mut state = started(&machine);
        let response = step(&machine, &mut state, callback("game1.0.7"));
        assert!(response.edit.is_none());
        assert_eq!(reply_text(&response), format::number_of_answers_help(2));
        assert_eq!(game(&state).current_index, 0);
    }

    #[test]
    fn callbacks_outside_a_game_are_ignored() {
        let machine = machine();
        for mut state in [SessionState::Greeting, SessionState::Idle] {
            assert!(machine.transition(&mut state, &callback("game1.0.1")).unwrap().is_none());
        }
    }

    #[test]
    fn insufficient_bank_fails_start_without_state_change() {
        let machine = StateMachine::new(
            Arc::new(Bank(bank())),
            Arc::new(Identity),
            GameQuotas::new(2, 1, 1),
        );
        let mut state = SessionState::Idle;
        let err = machine.transition(&mut state, &command("/start")).unwrap_err();
        assert!(matches!(
            err,
            TriviaError::InsufficientQuestions {
                difficulty: Difficulty::Easy,
                ..
            }
        ));
        assert_eq!(state, SessionState::Idle);
    }

    proptest! {
        #[test]
        fn score_never_decreases(answers in proptest::collection::vec("[0-9a-z]{0,3}", 1..12)) {
            let machine = machine();
            let mut state = started(&machine);
            let mut last_score = 0;
            for text in answers {
                if text.trim().is_empty() {
                    continue;
                }
                let SessionState::InGame(_) = state else { break };
                let response = machine.transition(&mut state, &message(&text)).unwrap().unwrap();
                if let SessionState::InGame(game) = &state {
                    prop_assert!(game.score >= last_score);
                    prop_assert!(game.current_index < game.questions.len());
                    last_score = game.score;
                }
                if let Some(next) = response.next_state {
                    state = next;
                }
            }
        }
    }
}
