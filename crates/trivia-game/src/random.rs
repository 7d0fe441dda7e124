// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Production randomness backed by the thread-local RNG.

use rand::seq::SliceRandom;
use trivia_core::Randomness;

#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandomness;

impl Randomness for ThreadRandomness {
    fn shuffle(&self, indices: &mut [usize]) {
        indices.shuffle(&mut rand::thread_rng());
    }
}
