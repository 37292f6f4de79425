// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! The bulk-import pipeline.
//!
//! Stages, in order:
//!
//! 1. [`dedup`] - remove exact intra-batch duplicates
//! 2. [`apex`] - rewrite apex CNAMEs to ALIAS, filter apex SOA/NS
//! 3. [`group`] - group the importable records by type
//! 4. [`reconciler`] - merge each group into its `RecordSet`
//! 5. [`report`] - per-record outcomes and aggregate counts
//!
//! [`run_import`] wires the stages together for one `(project, zone)`.

pub mod apex;
pub mod dedup;
pub mod group;
pub mod reconciler;
pub mod report;

pub use apex::{filter_apex_records, is_apex_record, transform_apex_cnames, SkippedApexRecords};
pub use dedup::dedup_records;
pub use group::group_by_type;
pub use reconciler::reconcile_groups;
pub use report::{
    ImportAction, ImportOptions, ImportOutcome, ImportRecordDetail, ImportSummary, MergeStrategy,
};

use crate::controlplane::RecordSetStore;
use crate::records::ParsedRecord;
use tracing::debug;

/// The normalized batch produced by the local pipeline stages, before any
/// network call.
#[derive(Debug, Clone, Default)]
pub struct ImportPlan {
    /// Records eligible for reconciliation.
    pub importable: Vec<ParsedRecord>,
    /// Intra-batch duplicates removed by the dedup pass; reported `Skipped`.
    pub duplicates: Vec<ParsedRecord>,
    /// Number of apex CNAMEs rewritten to ALIAS.
    pub alias_rewrites: usize,
    /// Apex SOA/NS records removed for disclosure.
    pub skipped_apex: SkippedApexRecords,
}

/// Run the local stages: dedup, apex transform, apex filter.
///
/// Pure; no control-plane access. The result can be inspected (UI preview)
/// before committing to [`run_import`].
#[must_use]
pub fn plan_import(records: Vec<ParsedRecord>, origin: Option<&str>) -> ImportPlan {
    let deduped = dedup_records(records);
    let transformed = transform_apex_cnames(deduped.unique, origin);
    let alias_rewrites = transformed.rewritten.len();
    let filtered = filter_apex_records(transformed.records, origin);

    debug!(
        importable = filtered.importable.len(),
        duplicates = deduped.duplicates.len(),
        alias_rewrites,
        skipped_apex = filtered.skipped.total_count,
        "Planned import batch"
    );

    ImportPlan {
        importable: filtered.importable,
        duplicates: deduped.duplicates,
        alias_rewrites,
        skipped_apex: filtered.skipped,
    }
}

/// Result of a full import run.
#[derive(Debug, Clone, Default)]
pub struct ImportRun {
    /// Per-record outcomes and aggregate counts.
    pub outcome: ImportOutcome,
    /// Apex SOA/NS records removed before reconciliation.
    pub skipped_apex: SkippedApexRecords,
    /// Number of apex CNAMEs imported as ALIAS.
    pub alias_rewrites: usize,
}

/// Run the whole pipeline for one `(project, zone)`.
///
/// Intra-batch duplicates surface as `Skipped` rows after the reconciled
/// rows; apex SOA/NS records are disclosed in `skipped_apex` and do not
/// appear in the outcome details.
pub async fn run_import<S: RecordSetStore + ?Sized>(
    store: &S,
    project: &str,
    zone: &str,
    records: Vec<ParsedRecord>,
    origin: Option<&str>,
    options: ImportOptions,
) -> ImportRun {
    let plan = plan_import(records, origin);

    let groups = group_by_type(plan.importable);
    let mut outcome = reconcile_groups(store, project, zone, groups, options).await;

    for duplicate in &plan.duplicates {
        outcome.push(
            ImportRecordDetail::for_record(duplicate, ImportAction::Skipped)
                .with_message("duplicate in import batch"),
        );
    }

    ImportRun {
        outcome,
        skipped_apex: plan.skipped_apex,
        alias_rewrites: plan.alias_rewrites,
    }
}
