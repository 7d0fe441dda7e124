// SPDX-FileCopyrightText: 2026 Trivia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQL operations on the session and lock tables.

pub mod locks;
pub mod sessions;
