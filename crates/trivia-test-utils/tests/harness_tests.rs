// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end chats driven through the test harness.

use std::sync::Arc;
use std::time::Duration;

use trivia_core::{Action, ChatId, Clock, FailureKind, LockBackend, TriviaError};
use trivia_game::{GameQuotas, SessionState, format};
use trivia_test_utils::{HarnessBackend, ReverseRandomness, TestHarness};

const CHAT: ChatId = ChatId(42);

async fn in_game(harness: &TestHarness) -> (u32, usize) {
    match harness.state(CHAT).await.unwrap() {
        Some(SessionState::InGame(game)) => (game.score, game.current_index),
        other => panic!("expected a game, found {other:?}"),
    }
}

#[tokio::test]
async fn game_played_with_buttons() {
    let harness = TestHarness::builder().build().await.unwrap();
    harness.send_text(CHAT, "/start").await.unwrap();
    harness.send_text(CHAT, "/start").await.unwrap();

    let keyboard = harness.executor.last_keyboard().await.unwrap();
    assert_eq!(keyboard.buttons().count(), 2);
    assert_eq!(keyboard.rows[0][0].callback_data, "game1.0.1");

    harness.press_button(CHAT, 1).await.unwrap();
    harness.press_button(CHAT, 1).await.unwrap();
    assert_eq!(in_game(&harness).await, (3, 2));
    harness.press_button(CHAT, 1).await.unwrap();

    let texts = harness.sent_texts().await;
    assert_eq!(texts.last().unwrap(), &format::game_over(6));
    assert_eq!(harness.state(CHAT).await.unwrap(), Some(SessionState::Idle));

    let edits = harness
        .executor
        .actions()
        .await
        .into_iter()
        .filter(|a| matches!(a, Action::EditMessage(_)))
        .count();
    assert_eq!(edits, 3);
}

#[tokio::test]
async fn shuffled_answers_move_the_correct_button() {
    let harness = TestHarness::builder()
        .with_randomness(Arc::new(ReverseRandomness::new()))
        .build()
        .await
        .unwrap();
    harness.send_text(CHAT, "/start").await.unwrap();
    harness.send_text(CHAT, "/start").await.unwrap();

    harness.send_text(CHAT, "1").await.unwrap();
    assert_eq!(in_game(&harness).await, (0, 1));
    harness.send_text(CHAT, "2").await.unwrap();
    assert_eq!(in_game(&harness).await, (2, 2));
}

#[tokio::test]
async fn new_game_after_game_over_gets_a_new_id() {
    let harness = TestHarness::builder().build().await.unwrap();
    harness.send_text(CHAT, "/start").await.unwrap();
    harness.send_text(CHAT, "/start").await.unwrap();
    harness.send_text(CHAT, "/stop").await.unwrap();
    harness.send_text(CHAT, "/start").await.unwrap();

    match harness.state(CHAT).await.unwrap() {
        Some(SessionState::InGame(game)) => assert_eq!(game.game_id, "game2"),
        other => panic!("expected a game, found {other:?}"),
    }
    // A button from the first game no longer does anything.
    let before = harness.executor.actions().await.len();
    harness.press(CHAT, 3, "game1.0.1").await.unwrap();
    let after = harness.executor.actions().await;
    assert_eq!(after.len(), before + 1);
    assert!(matches!(after.last(), Some(Action::AnswerCallback { .. })));
}

#[tokio::test]
async fn short_bank_reports_capacity_failure() {
    let harness = TestHarness::builder()
        .with_quotas(GameQuotas::new(2, 1, 1))
        .build()
        .await
        .unwrap();
    harness.send_text(CHAT, "/start").await.unwrap();

    let err = harness.send_text(CHAT, "/start").await.unwrap_err();
    assert!(matches!(err, TriviaError::InsufficientQuestions { available: 1, .. }));
    assert_eq!(err.kind(), FailureKind::Capacity);
    assert_eq!(
        harness.sent_texts().await.last().unwrap(),
        FailureKind::Capacity.user_message()
    );
    assert_eq!(harness.state(CHAT).await.unwrap(), Some(SessionState::Idle));
}

#[tokio::test]
async fn contended_chat_gives_up_then_recovers_after_expiry() {
    let harness = TestHarness::builder().build().await.unwrap();
    harness
        .backends
        .lock
        .try_acquire(
            &CHAT.lock_key(),
            "crashed-worker",
            harness.clock.now(),
            Duration::from_secs(60),
        )
        .await
        .unwrap();

    let err = harness.send_text(CHAT, "hi").await.unwrap_err();
    assert!(matches!(err, TriviaError::LockAcquisition { max_attempts: 10, .. }));
    assert_eq!(harness.clock.sleeps().len(), 9);
    assert_eq!(harness.state(CHAT).await.unwrap(), None);

    harness.clock.advance(Duration::from_secs(60));
    harness.send_text(CHAT, "hi").await.unwrap();
    assert_eq!(harness.state(CHAT).await.unwrap(), Some(SessionState::Idle));
}

#[tokio::test]
async fn sqlite_backend_plays_the_same_game() {
    let harness = TestHarness::builder()
        .with_backend(HarnessBackend::Sqlite)
        .with_trace_states(true)
        .build()
        .await
        .unwrap();
    harness.send_text(CHAT, "/start").await.unwrap();
    harness.send_text(CHAT, "/start").await.unwrap();
    for _ in 0..3 {
        harness.send_text(CHAT, "1").await.unwrap();
    }
    assert_eq!(
        harness.sent_texts().await.last().unwrap(),
        &format::game_over(6)
    );
}
