// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! RecordSet reconciliation: the core of the import flow.
//!
//! For each `(type, records)` group the reconciler looks up the existing
//! `RecordSet` of that type for the zone, merges or replaces its records
//! according to [`ImportOptions`], and writes the result back with a dry-run
//! admission check ahead of the real write.
//!
//! Failures are isolated per record type: an error while reconciling the MX
//! group marks every MX record `Failed` and the A group still proceeds.

use crate::controlplane::RecordSetStore;
use crate::errors::ControlPlaneError;
use crate::import::report::{
    ImportAction, ImportOptions, ImportOutcome, ImportRecordDetail, MergeStrategy,
};
use crate::metrics::{CONTROL_PLANE_FAILURES_TOTAL, RECORDS_IMPORTED_TOTAL};
use crate::records::{DedupKey, ParsedRecord, RecordType};
use crate::resources::RecordSet;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info, warn};

/// Result of reconciling one record type group.
struct GroupOutcome {
    details: Vec<ImportRecordDetail>,
    /// True when a `RecordSet` was created or updated on the control plane.
    wrote: bool,
}

/// Reconcile every group against the control plane, sequentially.
///
/// The per-type loop is deliberately sequential: there is no cross-type
/// ordering requirement, and one in-flight write at a time keeps the
/// admission failure modes easy to attribute.
///
/// The returned [`ImportOutcome`] carries a detail row for every record in
/// `groups`, in per-type then per-record order.
pub async fn reconcile_groups<S: RecordSetStore + ?Sized>(
    store: &S,
    project: &str,
    zone: &str,
    groups: BTreeMap<RecordType, Vec<ParsedRecord>>,
    options: ImportOptions,
) -> ImportOutcome {
    let mut outcome = ImportOutcome::default();

    for (record_type, records) in groups {
        if !record_type.is_importable() {
            // The apex filter removes SOA groups before reconciliation; this
            // guards direct callers of the reconciler.
            warn!(record_type = %record_type, "Dropping non-importable group");
            continue;
        }

        match reconcile_group(store, project, zone, record_type, &records, options).await {
            Ok(group) => {
                if group.wrote {
                    outcome.summary.total_record_sets += 1;
                }
                for detail in group.details {
                    RECORDS_IMPORTED_TOTAL
                        .with_label_values(&[record_type.as_str(), action_label(detail.action)])
                        .inc();
                    outcome.push(detail);
                }
            }
            Err(e) => {
                warn!(
                    record_type = %record_type,
                    error = %e,
                    transient = e.is_transient(),
                    "Reconciliation failed for record type"
                );
                CONTROL_PLANE_FAILURES_TOTAL
                    .with_label_values(&[e.reason()])
                    .inc();
                for record in &records {
                    RECORDS_IMPORTED_TOTAL
                        .with_label_values(&[record_type.as_str(), "failed"])
                        .inc();
                    outcome.push(
                        ImportRecordDetail::for_record(record, ImportAction::Failed)
                            .with_message(e.to_string()),
                    );
                }
            }
        }
    }

    info!(
        project,
        zone,
        record_sets = outcome.summary.total_record_sets,
        created = outcome.summary.created,
        updated = outcome.summary.updated,
        skipped = outcome.summary.skipped,
        failed = outcome.summary.failed,
        "Import reconciliation finished"
    );
    outcome
}

/// Reconcile one record type group.
///
/// Duplicate detection in the Append path compares incoming records against
/// the *pre-existing* `RecordSet` only. Intra-batch duplicates are expected
/// to have been removed by the deduplication pass upstream.
///
/// # Errors
///
/// Any lookup or write failure is returned whole; the caller converts it
/// into `Failed` rows for the entire group.
async fn reconcile_group<S: RecordSetStore + ?Sized>(
    store: &S,
    project: &str,
    zone: &str,
    record_type: RecordType,
    records: &[ParsedRecord],
    options: ImportOptions,
) -> Result<GroupOutcome, ControlPlaneError> {
    let existing = store.find_by_type_and_zone(project, zone, record_type).await?;
    let is_new = existing.is_none();
    let imported_action = if is_new {
        ImportAction::Created
    } else {
        ImportAction::Updated
    };

    let existing_records = existing
        .as_ref()
        .map(|set| set.spec.records.clone())
        .unwrap_or_default();

    let mut details = Vec::with_capacity(records.len());
    let merged = match options.merge_strategy {
        MergeStrategy::Replace => {
            // The incoming group becomes the whole array. Per-record labels
            // reflect whether the RecordSet itself is new, a presentation
            // choice carried over from the original flow.
            for record in records {
                details.push(ImportRecordDetail::for_record(record, imported_action));
            }
            records.to_vec()
        }
        MergeStrategy::Append => {
            let existing_keys: HashSet<DedupKey> =
                existing_records.iter().map(ParsedRecord::dedup_key).collect();

            let mut merged = existing_records.clone();
            for record in records {
                if options.skip_duplicates && existing_keys.contains(&record.dedup_key()) {
                    details.push(
                        ImportRecordDetail::for_record(record, ImportAction::Skipped)
                            .with_message("duplicate of existing record"),
                    );
                } else {
                    merged.push(record.clone());
                    details.push(ImportRecordDetail::for_record(record, imported_action));
                }
            }
            merged
        }
    };

    let write_needed = options.merge_strategy == MergeStrategy::Replace
        || merged.len() != existing_records.len();
    if !write_needed {
        debug!(
            record_type = %record_type,
            "RecordSet unchanged, skipping write"
        );
        return Ok(GroupOutcome {
            details,
            wrote: false,
        });
    }

    match existing {
        None => {
            let payload = RecordSet::new(zone, record_type, merged);
            // Admission check first; a dry-run rejection suppresses the
            // real write entirely.
            store.create(project, &payload, true).await?;
            store.create(project, &payload, false).await?;
            debug!(record_type = %record_type, records = payload.spec.records.len(), "Created RecordSet");
        }
        Some(mut set) => {
            let name = set
                .name()
                .ok_or_else(|| ControlPlaneError::NotFound {
                    kind: "RecordSet",
                    name: zone.to_string(),
                    project: project.to_string(),
                })?
                .to_string();
            set.spec.records = merged;
            store.update(project, &name, &set, true).await?;
            store.update(project, &name, &set, false).await?;
            debug!(record_type = %record_type, name = %name, records = set.spec.records.len(), "Updated RecordSet");
        }
    }

    Ok(GroupOutcome {
        details,
        wrote: true,
    })
}

fn action_label(action: ImportAction) -> &'static str {
    match action {
        ImportAction::Created => "created",
        ImportAction::Updated => "updated",
        ImportAction::Skipped => "skipped",
        ImportAction::Failed => "failed",
    }
}

#[cfg(test)]
#[path = "reconciler_tests.rs"]
mod reconciler_tests;
