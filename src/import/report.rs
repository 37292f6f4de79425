// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Import options, per-record outcomes, and aggregate reporting.

use crate::records::{ParsedRecord, RecordType};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How incoming records combine with an existing `RecordSet`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MergeStrategy {
    /// Add incoming records to the existing array (the default).
    #[default]
    Append,
    /// The incoming group becomes the whole `records` array.
    Replace,
}

/// User-selectable options of one import request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportOptions {
    /// Skip records already present in the target `RecordSet` instead of
    /// appending a second copy.
    #[serde(default = "default_skip_duplicates")]
    pub skip_duplicates: bool,

    /// Append to or replace the existing records.
    #[serde(default)]
    pub merge_strategy: MergeStrategy,
}

fn default_skip_duplicates() -> bool {
    true
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            skip_duplicates: true,
            merge_strategy: MergeStrategy::Append,
        }
    }
}

/// What happened to one record during an import.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ImportAction {
    /// Imported into a `RecordSet` created by this import.
    Created,
    /// Imported into a `RecordSet` that already existed.
    Updated,
    /// Not imported: a duplicate of an existing record or of an earlier
    /// record in the same batch.
    Skipped,
    /// Not imported: the lookup or write for its record type failed.
    Failed,
}

/// One outcome row of an import report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportRecordDetail {
    /// Type of the record.
    pub record_type: RecordType,
    /// Owner name as imported.
    pub name: String,
    /// Rendered record value.
    pub value: String,
    /// Record TTL, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// What happened to the record.
    pub action: ImportAction,
    /// Failure or skip reason, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ImportRecordDetail {
    /// Build a detail row for `record` with the given action.
    #[must_use]
    pub fn for_record(record: &ParsedRecord, action: ImportAction) -> Self {
        Self {
            record_type: record.record_type(),
            name: record.name.clone(),
            value: record.data.value(),
            ttl: record.ttl,
            action,
            message: None,
        }
    }

    /// Attach a human-readable message to the row.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Aggregate counts of one import.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    /// Number of `RecordSet` resources touched (created or updated).
    pub total_record_sets: usize,
    /// Number of records considered by the import.
    pub total_records: usize,
    /// Records imported into newly created `RecordSet`s.
    pub created: usize,
    /// Records imported into pre-existing `RecordSet`s.
    pub updated: usize,
    /// Records skipped as duplicates.
    pub skipped: usize,
    /// Records that failed to import.
    pub failed: usize,
}

impl ImportSummary {
    /// Count one detail row into the summary.
    pub fn count(&mut self, action: ImportAction) {
        self.total_records += 1;
        match action {
            ImportAction::Created => self.created += 1,
            ImportAction::Updated => self.updated += 1,
            ImportAction::Skipped => self.skipped += 1,
            ImportAction::Failed => self.failed += 1,
        }
    }

    /// Merge another summary into this one.
    pub fn absorb(&mut self, other: Self) {
        self.total_record_sets += other.total_record_sets;
        self.total_records += other.total_records;
        self.created += other.created;
        self.updated += other.updated;
        self.skipped += other.skipped;
        self.failed += other.failed;
    }

    /// True when every row failed and nothing was imported or skipped.
    #[must_use]
    pub fn is_total_failure(&self) -> bool {
        self.failed > 0 && self.created == 0 && self.updated == 0 && self.skipped == 0
    }

    /// HTTP status for the hosting API boundary: 200 on full success,
    /// 207 Multi-Status on partial success, 400 on total failure.
    #[must_use]
    pub fn http_status(&self) -> u16 {
        if self.failed == 0 {
            200
        } else if self.is_total_failure() {
            400
        } else {
            207
        }
    }
}

/// Full result of one import: aggregate counts plus per-record rows in
/// per-type, then per-record order.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ImportOutcome {
    /// Aggregate counts.
    pub summary: ImportSummary,
    /// Per-record outcome rows.
    pub details: Vec<ImportRecordDetail>,
}

impl ImportOutcome {
    /// Append a detail row, keeping the summary in sync.
    pub fn push(&mut self, detail: ImportRecordDetail) {
        self.summary.count(detail.action);
        self.details.push(detail);
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod report_tests;
