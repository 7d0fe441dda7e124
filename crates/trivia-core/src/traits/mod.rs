// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits consumed by the session core.
//!
//! Async traits use `#[async_trait]` so they can be held as `Arc<dyn ...>`.

pub mod clock;
pub mod executor;
pub mod lock;
pub mod question;
pub mod random;
pub mod store;

pub use clock::Clock;
pub use executor::ActionExecutor;
pub use lock::LockBackend;
pub use question::QuestionSource;
pub use random::Randomness;
pub use store::SessionStore;
