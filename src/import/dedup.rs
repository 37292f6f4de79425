// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Exact-duplicate removal for import batches.

use crate::records::{DedupKey, ParsedRecord};
use std::collections::HashSet;

/// Result of a deduplication pass.
#[derive(Debug, Clone, Default)]
pub struct DedupOutcome {
    /// First occurrence of every distinct record, in input order.
    pub unique: Vec<ParsedRecord>,
    /// Later occurrences removed from the batch, in input order.
    pub duplicates: Vec<ParsedRecord>,
}

impl DedupOutcome {
    /// Number of records removed as duplicates.
    #[must_use]
    pub fn removed(&self) -> usize {
        self.duplicates.len()
    }
}

/// Remove exact duplicates from a batch of parsed records.
///
/// Two records are duplicates iff `(name, type, value, ttl)` are all equal
/// after normalization (one trailing dot stripped from the name and from
/// domain-valued fields, ASCII case folded). The first occurrence wins;
/// removed occurrences are returned for reporting, never silently dropped.
///
/// Idempotent: deduplicating an already-deduplicated batch removes nothing.
#[must_use]
pub fn dedup_records(records: Vec<ParsedRecord>) -> DedupOutcome {
    let mut seen: HashSet<DedupKey> = HashSet::with_capacity(records.len());
    let mut outcome = DedupOutcome::default();

    for record in records {
        if seen.insert(record.dedup_key()) {
            outcome.unique.push(record);
        } else {
            outcome.duplicates.push(record);
        }
    }

    outcome
}

#[cfg(test)]
#[path = "dedup_tests.rs"]
mod dedup_tests;
