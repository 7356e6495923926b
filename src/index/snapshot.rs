// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;
use std::collections::BTreeMap;

/// Point-in-time copy of an index, shaped for JSON export.
///
/// `terms` serializes as `{term: {location: [positions...]}}` and `counts` as
/// `{location: count}`, both with keys in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexSnapshot {
    pub terms: BTreeMap<String, BTreeMap<String, Vec<usize>>>,
    pub counts: BTreeMap<String, usize>,
}
