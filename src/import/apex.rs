// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Zone-apex handling: CNAME-to-ALIAS rewriting and SOA/NS filtering.
//!
//! CNAME records are invalid at a zone apex, so an imported apex CNAME is
//! rewritten to the platform's ALIAS type. Apex SOA and NS records are
//! platform-managed and must not be user-imported; they are removed and
//! returned separately so the caller can disclose them instead of dropping
//! them silently.

use crate::constants::APEX_NAME;
use crate::records::{normalize_name, AliasValue, ParsedRecord, RecordData, RecordType};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Whether `name` denotes the zone apex.
///
/// A name is apex if it is `"@"`, the empty string, or equal to the zone
/// origin; one trailing dot is stripped from both sides before comparing.
#[must_use]
pub fn is_apex_record(name: &str, origin: Option<&str>) -> bool {
    let normalized = normalize_name(name);
    if normalized.is_empty() || normalized == APEX_NAME {
        return true;
    }
    origin.is_some_and(|origin| normalize_name(origin) == normalized)
}

/// Result of the apex CNAME transformation.
#[derive(Debug, Clone, Default)]
pub struct ApexTransform {
    /// The batch with every apex CNAME rewritten to ALIAS.
    pub records: Vec<ParsedRecord>,
    /// Indices (into `records`) that were rewritten.
    pub rewritten: BTreeSet<usize>,
}

/// Rewrite apex CNAME records to ALIAS, keeping name, target, and TTL.
///
/// Non-apex CNAMEs and every other record pass through untouched.
#[must_use]
pub fn transform_apex_cnames(records: Vec<ParsedRecord>, origin: Option<&str>) -> ApexTransform {
    let mut out = ApexTransform::default();

    for (index, mut record) in records.into_iter().enumerate() {
        if is_apex_record(&record.name, origin) {
            if let RecordData::CNAME(cname) = record.data {
                debug!(name = %record.name, target = %cname.target, "Rewriting apex CNAME to ALIAS");
                record.data = RecordData::ALIAS(AliasValue {
                    target: cname.target,
                });
                out.rewritten.insert(index);
            }
        }
        out.records.push(record);
    }

    out
}

/// Apex SOA/NS records removed from an import, disclosed to the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SkippedApexRecords {
    /// Apex SOA records removed from the batch.
    pub soa: Vec<ParsedRecord>,
    /// Apex NS records removed from the batch.
    pub ns: Vec<ParsedRecord>,
    /// `soa.len() + ns.len()`, precomputed for display.
    pub total_count: usize,
}

/// Result of the apex SOA/NS filter.
#[derive(Debug, Clone, Default)]
pub struct ApexFilter {
    /// Records eligible for import.
    pub importable: Vec<ParsedRecord>,
    /// Platform-managed apex records removed from the batch.
    pub skipped: SkippedApexRecords,
}

/// Remove apex SOA and NS records from the batch.
///
/// Non-apex NS records (subdomain delegations) are importable and pass
/// through. SOA records only ever occur at the apex in well-formed zones,
/// but the apex check is applied regardless.
#[must_use]
pub fn filter_apex_records(records: Vec<ParsedRecord>, origin: Option<&str>) -> ApexFilter {
    let mut out = ApexFilter::default();

    for record in records {
        if is_apex_record(&record.name, origin) {
            match record.record_type() {
                RecordType::SOA => {
                    out.skipped.soa.push(record);
                    continue;
                }
                RecordType::NS => {
                    out.skipped.ns.push(record);
                    continue;
                }
                _ => {}
            }
        }
        out.importable.push(record);
    }

    out.skipped.total_count = out.skipped.soa.len() + out.skipped.ns.len();
    out
}

#[cfg(test)]
#[path = "apex_tests.rs"]
mod apex_tests;
