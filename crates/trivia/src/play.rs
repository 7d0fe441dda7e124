// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `trivia play` command implementation.
//!
//! A readline console standing in for a messaging platform: each line is one
//! event for a single chat, and the resulting actions are printed. Typing
//! `!N` presses button N of the last keyboard shown.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;
use trivia_config::TriviaConfig;
use trivia_core::{
    Action, ActionExecutor, CallbackQuery, ChatId, Event, Keyboard, MessageRef, TriviaError,
};
use trivia_session::dispatch;

use crate::runtime::build_coordinator;

/// The last message that carried a keyboard.
#[derive(Debug, Clone)]
struct ShownKeyboard {
    message_id: i64,
    text: String,
    keyboard: Keyboard,
}

#[derive(Debug, Default)]
struct ConsoleState {
    next_message_id: i64,
    last_keyboard: Option<ShownKeyboard>,
}

/// Prints actions to the terminal and remembers the last keyboard.
#[derive(Clone, Default)]
pub struct ConsoleExecutor {
    state: Arc<Mutex<ConsoleState>>,
}

impl ConsoleExecutor {
    fn state(&self) -> std::sync::MutexGuard<'_, ConsoleState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Turns a line of input into an event for `chat_id`.
    ///
    /// Returns `None` for a `!N` press when there is no such button.
    pub fn event_for(&self, chat_id: ChatId, line: &str) -> Option<Event> {
        let Some(number) = line.strip_prefix('!') else {
            return Some(Event::from_text(chat_id, line));
        };
        let number: usize = number.trim().parse().ok()?;
        let state = self.state();
        let shown = state.last_keyboard.as_ref()?;
        let button = shown.keyboard.buttons().nth(number.checked_sub(1)?)?;
        Some(Event::CallbackQuery(CallbackQuery {
            id: Some(uuid::Uuid::new_v4().simple().to_string()),
            data: button.callback_data.clone(),
            message: MessageRef {
                chat_id,
                text: shown.text.clone(),
            },
            message_id: shown.message_id,
        }))
    }
}

#[async_trait]
impl ActionExecutor for ConsoleExecutor {
    async fn execute(&self, action: Action) -> Result<(), TriviaError> {
        match action {
            Action::SendMessage(message) => {
                let mut state = self.state();
                state.next_message_id += 1;
                let message_id = state.next_message_id;
                println!("{} {}", format!("#{message_id}").dimmed(), render_html(&message.text));
                if let Some(keyboard) = message.keyboard {
                    println!("{}", render_keyboard(&keyboard).cyan());
                    state.last_keyboard = Some(ShownKeyboard {
                        message_id,
                        text: message.text,
                        keyboard,
                    });
                }
            }
            Action::EditMessage(edit) => {
                println!(
                    "{} {}",
                    format!("#{} (edited)", edit.message_id).dimmed(),
                    render_html(&edit.text)
                );
            }
            Action::AnswerCallback { callback_id } => {
                debug!(%callback_id, "callback answered");
            }
        }
        Ok(())
    }
}

/// Strips markup tags and expands numeric character references.
///
/// References may omit the trailing `;`, as the question markers do.
pub fn render_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(c) = rest.chars().next() {
        if c == '<'
            && let Some(end) = rest.find('>')
        {
            rest = &rest[end + 1..];
            continue;
        }
        if let Some(after) = rest.strip_prefix("&#") {
            let digits = after.bytes().take_while(u8::is_ascii_digit).count();
            if let Some(ch) = after[..digits].parse::<u32>().ok().and_then(char::from_u32) {
                out.push(ch);
                rest = &after[digits..];
                rest = rest.strip_prefix(';').unwrap_or(rest);
                continue;
            }
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    out
}

fn render_keyboard(keyboard: &Keyboard) -> String {
    keyboard
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|button| format!("[!{}]", button.text))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Runs the `trivia play` console.
pub async fn run_play(config: &TriviaConfig, chat_id: i64) -> Result<(), TriviaError> {
    let coordinator = build_coordinator(config).await?;
    let executor = ConsoleExecutor::default();
    let chat_id = ChatId(chat_id);

    let mut rl = DefaultEditor::new()
        .map_err(|e| TriviaError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", config.bot.name.bold().green());
    println!(
        "Type {} to begin, {} to press a button, {} to exit.\n",
        "/start".yellow(),
        "!N".yellow(),
        "/quit".yellow()
    );

    let prompt = format!("{}> ", "you".green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed == "/quit" || trimmed == "/exit" {
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                let Some(event) = executor.event_for(chat_id, trimmed) else {
                    eprintln!("{}", "no such button".yellow());
                    continue;
                };
                if let Err(e) = dispatch(&coordinator, &executor, event).await {
                    eprintln!("{}: {e}", "error".red());
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }
    Ok(())
}
