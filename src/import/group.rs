// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Grouping of importable records by type.

use crate::records::{ParsedRecord, RecordType};
use std::collections::BTreeMap;

/// Group records by type, preserving within-type input order.
///
/// The `BTreeMap` keys iterate in [`RecordType`] declaration order, which is
/// the per-type order of the import report. Pure bookkeeping; no merging.
#[must_use]
pub fn group_by_type(records: Vec<ParsedRecord>) -> BTreeMap<RecordType, Vec<ParsedRecord>> {
    let mut groups: BTreeMap<RecordType, Vec<ParsedRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.record_type()).or_default().push(record);
    }
    groups
}

#[cfg(test)]
#[path = "group_tests.rs"]
mod group_tests;
