// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for trivia bot integration tests.
//!
//! Deterministic stand-ins for every injected collaborator, plus a harness
//! that assembles a complete coordinator over temporary storage.
//!
//! # Components
//!
//! - [`IdentityRandomness`] / [`ReverseRandomness`] - reproducible answer orders
//! - [`ManualClock`] - virtual time whose `sleep` advances instantly
//! - [`RecordingExecutor`] - captures every action for assertions
//! - [`StaticQuestionSource`] and [`arithmetic_bank`] - fixture question banks
//! - [`TestHarness`] - coordinator, backends and executor wired together

pub mod clock;
pub mod executor;
pub mod fixtures;
pub mod harness;

pub use clock::ManualClock;
pub use executor::RecordingExecutor;
pub use fixtures::{
    IdentityRandomness, ReverseRandomness, StaticQuestionSource, arithmetic_bank,
};
pub use harness::{HarnessBackend, TestHarness, TestHarnessBuilder};
