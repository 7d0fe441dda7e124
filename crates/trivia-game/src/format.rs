// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTML reply texts.

use trivia_core::Question;

const MARK_HAT: &str = "&#127891";
const MARK_CHECK: &str = "&#10004";
const MARK_CROSS: &str = "&#10006";
const MARK_GREEN: &str = "&#128994";
const MARK_RED: &str = "&#128308";
const MARK_WHITE: &str = "&#9898";

pub const GREETING: &str = "<i>&#129417Trivia bot greeting you</i>";
pub const GREETING_WITH_HELP: &str =
    "<i>&#129417Trivia bot greeting you. Enter command /start or /help </i>";
pub const GREETING_UNKNOWN_COMMAND: &str = "<i>Something went wrong. Try again</i>";
pub const STARTING_GAME: &str = "<i>Starting game</i>";
pub const HELP: &str = "<i>Enter /start or /help</i>";
pub const NOT_UNDERSTOOD: &str = "<i>I did not understand the command. Enter /start or /help</i>";
pub const GAME_STOPPED: &str = "<i>The game is over.</i>";
pub const COMMAND_UNAVAILABLE_IN_GAME: &str = "<i>Other commands are not available in the game</i>";

/// Header used for the question at `index` within a game.
pub fn question_header(index: usize) -> &'static str {
    if index == 0 { "Question" } else { "Next question" }
}

/// Correction sent when an answer cannot be mapped to a button.
pub fn number_of_answers_help(answer_count: usize) -> String {
    format!("<i>I don't understand you. You can enter a number from 1 to {answer_count}</i>")
}

/// Final message of a completed game.
pub fn game_over(score: u32) -> String {
    format!("<i>The game is over. Your points: {score}</i>")
}

/// Renders a question with its numbered answers.
///
/// `chosen` is the 1-based answer the user picked. Without it the question is
/// shown fresh; with it the header and the answer markers reveal the outcome.
pub fn question_text(header: &str, question: &Question, chosen: Option<usize>) -> String {
    let correct = question.correct_answer + 1;
    let mark = match chosen {
        None => MARK_HAT,
        Some(answer) if answer == correct => MARK_CHECK,
        Some(_) => MARK_CROSS,
    };

    let mut rows = Vec::with_capacity(question.answers.len() + 2);
    rows.push(format!("<b>{mark} {header}:</b>"));
    rows.push(format!("    <b>{}</b>", question.text));
    for (i, answer) in question.answers.iter().enumerate() {
        let number = i + 1;
        let marker = match chosen {
            Some(_) if number == correct => MARK_GREEN,
            Some(answer) if answer == number => MARK_RED,
            _ => MARK_WHITE,
        };
        rows.push(format!("{marker} {number}: {answer}"));
    }
    rows.join("\n")
}
