// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Control-plane resource types for DNS imports.
//!
//! This module defines the Kubernetes-style resources zoneport reads and
//! writes on the DNS control plane.
//!
//! # Resource Types
//!
//! - [`RecordSet`] - the persisted grouping of all records of one type for
//!   one zone. The control plane maintains the invariant that at most one
//!   `RecordSet` exists per `(zone, type)` pair; the reconciler must never
//!   create a second one.
//! - [`ZoneDiscovery`] - an asynchronous platform job that probes an external
//!   DNS provider for a domain's existing records.
//!
//! # Example: a RecordSet on the wire
//!
//! ```yaml
//! apiVersion: dns.firestoned.io/v1alpha1
//! kind: RecordSet
//! metadata:
//!   name: example-com-a
//!   resourceVersion: "42"
//! spec:
//!   dnsZoneRef:
//!     name: example-com
//!   recordType: A
//!   records:
//!     - name: www
//!       ttl: 300
//!       type: A
//!       address: 192.0.2.1
//! ```

use crate::records::{ParsedRecord, RecordType};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Object metadata carried by every control-plane resource.
///
/// A pared-down Kubernetes `ObjectMeta`: only the fields the importer reads
/// or round-trips. `resource_version` must be echoed back on updates so the
/// control plane can reject writes based on a stale read.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    /// Server-assigned resource name, unique within the project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Opaque version string for optimistic concurrency on updates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,

    /// Server-assigned unique identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    /// Creation timestamp set by the control plane.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<chrono::DateTime<chrono::Utc>>,
}

/// Reference to another resource in the same project by name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LocalObjectReference {
    /// Name of the referenced resource.
    pub name: String,
}

/// Desired state of a [`RecordSet`]: every record of one type for one zone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordSetSpec {
    /// The zone this record set belongs to.
    pub dns_zone_ref: LocalObjectReference,

    /// The single record type every entry in `records` must have.
    pub record_type: RecordType,

    /// The records of this set, in storage order.
    #[serde(default)]
    pub records: Vec<ParsedRecord>,
}

/// The platform's persisted grouping of all DNS records of one type for one
/// zone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RecordSet {
    /// Standard object metadata.
    #[serde(default)]
    pub metadata: ObjectMeta,

    /// Desired record data.
    pub spec: RecordSetSpec,
}

impl RecordSet {
    /// Build a new, unnamed `RecordSet` for `(zone, record_type)`.
    ///
    /// The control plane assigns `metadata.name` on create.
    #[must_use]
    pub fn new(zone: &str, record_type: RecordType, records: Vec<ParsedRecord>) -> Self {
        Self {
            metadata: ObjectMeta::default(),
            spec: RecordSetSpec {
                dns_zone_ref: LocalObjectReference {
                    name: zone.to_string(),
                },
                record_type,
                records,
            },
        }
    }

    /// The server-assigned name, if the resource has been persisted.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.metadata.name.as_deref()
    }
}

/// List body returned by the control plane for collection reads.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct RecordSetList {
    /// The matching record sets.
    #[serde(default)]
    pub items: Vec<RecordSet>,
}

/// Lifecycle phase of a [`ZoneDiscovery`] job.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum DiscoveryPhase {
    /// The probe has not started or produced results yet.
    Pending,
    /// The probe finished and `recordSets` is populated.
    Ready,
    /// The probe failed; see `status.message`.
    Failed,
}

impl Default for DiscoveryPhase {
    fn default() -> Self {
        Self::Pending
    }
}

/// Desired state of a [`ZoneDiscovery`].
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ZoneDiscoverySpec {
    /// The domain whose provider records the platform probes.
    pub domain: String,
}

/// Observed state of a [`ZoneDiscovery`].
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ZoneDiscoveryStatus {
    /// Current phase of the discovery job.
    #[serde(default)]
    pub phase: DiscoveryPhase,

    /// Failure detail when `phase` is `Failed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Records found at the external provider, grouped by type the same way
    /// `RecordSet` resources are.
    #[serde(default)]
    pub record_sets: Vec<RecordSet>,

    /// When the probe last completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probed_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// An asynchronous platform job probing an external DNS provider for a
/// domain's existing records, offered to the user as an import source.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ZoneDiscovery {
    /// Standard object metadata.
    #[serde(default)]
    pub metadata: ObjectMeta,

    /// Probe target.
    pub spec: ZoneDiscoverySpec,

    /// Probe results; absent until the job first reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ZoneDiscoveryStatus>,
}

impl ZoneDiscovery {
    /// True once the discovery can feed an import: the job reached `Ready`
    /// or any record set is already populated.
    #[must_use]
    pub fn is_populated(&self) -> bool {
        self.status.as_ref().is_some_and(|status| {
            status.phase == DiscoveryPhase::Ready || !status.record_sets.is_empty()
        })
    }
}

#[cfg(test)]
#[path = "resources_tests.rs"]
mod resources_tests;
