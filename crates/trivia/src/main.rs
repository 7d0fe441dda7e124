// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trivia - a quiz chat bot.
//!
//! This is the binary entry point.

mod check;
mod play;
mod runtime;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use trivia_config::TriviaConfig;

/// Trivia - a quiz chat bot.
#[derive(Parser, Debug)]
#[command(name = "trivia", version, about, long_about = None)]
struct Cli {
    /// Load this config file instead of the default search path.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a game in the terminal as a single chat.
    Play {
        /// Chat id to play as. Sessions are keyed by it.
        #[arg(long, default_value_t = 1)]
        chat_id: i64,
    },
    /// Validate the configuration and the question bank.
    Check,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => trivia_config::load_and_validate_path(path),
        None => trivia_config::load_and_validate(),
    };
    let config: TriviaConfig = match loaded {
        Ok(config) => config,
        Err(errors) => {
            trivia_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.bot.log_level);

    let result = match cli.command {
        Some(Commands::Play { chat_id }) => play::run_play(&config, chat_id).await,
        Some(Commands::Check) => check::run_check(&config).await,
        None => {
            println!("trivia: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("trivia={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
