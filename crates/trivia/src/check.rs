// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `trivia check` command implementation.
//!
//! Verifies that the question bank loads and can fill a game at the
//! configured difficulty quotas, and that the session storage opens.

use colored::Colorize;
use trivia_config::TriviaConfig;
use trivia_core::{Difficulty, QuestionSource, TriviaError};
use trivia_game::{GameQuotas, select_questions};
use trivia_storage::open_backends;

use crate::runtime::question_source;

/// Per-difficulty availability in the bank against the configured quota.
#[derive(Debug, PartialEq, Eq)]
pub struct BankReport {
    pub rows: Vec<(Difficulty, usize, usize)>,
}

/// Counts bank questions per difficulty and checks the quotas can be met.
pub fn check_bank(source: &dyn QuestionSource, quotas: GameQuotas) -> Result<BankReport, TriviaError> {
    let bank = source.load_questions()?;
    let rows = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
        .into_iter()
        .map(|difficulty| {
            let available = bank.iter().filter(|q| q.difficulty == difficulty).count();
            (difficulty, quotas.quota(difficulty), available)
        })
        .collect();
    select_questions(&bank, quotas)?;
    Ok(BankReport { rows })
}

pub async fn run_check(config: &TriviaConfig) -> Result<(), TriviaError> {
    println!("{} config is valid", "ok".green());

    let source = question_source(&config.game)?;
    let report = check_bank(&source, GameQuotas::from(&config.game))?;
    for (difficulty, quota, available) in &report.rows {
        println!("   {difficulty:<6} {available} available, {quota} per game");
    }
    println!("{} question bank can fill a game", "ok".green());

    open_backends(&config.storage).await?;
    println!("{} {} session storage opens", "ok".green(), config.storage.backend);
    Ok(())
}
