// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The inverted index: term → location → positions, plus per-location counts.
//!
//! One index type serves both single-threaded and shared use. What changes is
//! the [`LockStrategy`](crate::sync::LockStrategy) chosen at construction:
//! `InvertedIndex::new()` runs lock-free, `InvertedIndex::concurrent()` puts a
//! writer-reentrant read/write lock in front of every operation.

mod inverted;
mod snapshot;

pub use inverted::*;
pub use snapshot::*;
