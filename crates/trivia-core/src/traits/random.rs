// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Injected randomness used when a game is constructed.

/// Source of every random decision the state machine makes.
///
/// Tests substitute deterministic orderings so game construction is
/// reproducible.
pub trait Randomness: Send + Sync {
    /// Permutes `indices` in place.
    fn shuffle(&self, indices: &mut [usize]);

    /// Returns an identifier for a new game, unique across the chat's history.
    fn new_game_id(&self) -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }
}
