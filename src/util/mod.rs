// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text helpers shared by the builders, the crawler and the query engine.
//!
//! Normalization turns raw lines into stemmed terms, the HTML cleaner turns
//! fetched pages into plain text, and the JSON writer produces the exported
//! index, counts and results files.

pub mod html;
pub mod json;
pub mod normalize;

pub use normalize::Normalizer;
