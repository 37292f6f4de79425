// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! In-memory [`RecordSetStore`] used by unit tests.

use crate::controlplane::RecordSetStore;
use crate::errors::ControlPlaneError;
use crate::records::RecordType;
use crate::resources::{RecordSet, ZoneDiscovery};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

/// An in-memory control plane.
///
/// Keyed by `(project, zone, type)`. Operations are appended to `ops` so
/// tests can assert ordering (e.g., dry-run before the real write). Failures
/// are injected per record type, separately for dry-run and real writes.
#[derive(Default)]
pub(crate) struct MemoryStore {
    sets: Mutex<HashMap<(String, String, RecordType), RecordSet>>,
    /// Operation log: `"find:A"`, `"create-dry:A"`, `"create:A"`, ...
    pub ops: Mutex<Vec<String>>,
    /// Types whose lookups fail.
    pub fail_find: Mutex<HashSet<RecordType>>,
    /// Types whose dry-run writes fail admission.
    pub fail_dry_run: Mutex<HashSet<RecordType>>,
    /// Types whose real writes fail.
    pub fail_write: Mutex<HashSet<RecordType>>,
    /// Responses handed out by successive `get_zone_discovery` calls; the
    /// last entry repeats once the queue drains.
    pub discoveries: Mutex<VecDeque<Option<ZoneDiscovery>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an existing record set.
    pub fn insert(&self, project: &str, set: RecordSet) {
        let key = (
            project.to_string(),
            set.spec.dns_zone_ref.name.clone(),
            set.spec.record_type,
        );
        self.sets.lock().unwrap().insert(key, set);
    }

    /// Fetch a stored record set by `(project, zone, type)`.
    pub fn get(&self, project: &str, zone: &str, record_type: RecordType) -> Option<RecordSet> {
        self.sets
            .lock()
            .unwrap()
            .get(&(project.to_string(), zone.to_string(), record_type))
            .cloned()
    }

    pub fn log(&self, op: impl Into<String>) {
        self.ops.lock().unwrap().push(op.into());
    }

    pub fn ops_snapshot(&self) -> Vec<String> {
        self.ops.lock().unwrap().clone()
    }

    fn unreachable(record_type: RecordType, what: &str) -> ControlPlaneError {
        ControlPlaneError::Unreachable {
            endpoint: "memory://control-plane".to_string(),
            reason: format!("injected {what} failure for {record_type}"),
        }
    }
}

#[async_trait]
impl RecordSetStore for MemoryStore {
    async fn find_by_type_and_zone(
        &self,
        project: &str,
        zone: &str,
        record_type: RecordType,
    ) -> Result<Option<RecordSet>, ControlPlaneError> {
        self.log(format!("find:{record_type}"));
        if self.fail_find.lock().unwrap().contains(&record_type) {
            return Err(Self::unreachable(record_type, "lookup"));
        }
        Ok(self.get(project, zone, record_type))
    }

    async fn create(
        &self,
        project: &str,
        record_set: &RecordSet,
        dry_run: bool,
    ) -> Result<RecordSet, ControlPlaneError> {
        let record_type = record_set.spec.record_type;
        if dry_run {
            self.log(format!("create-dry:{record_type}"));
            if self.fail_dry_run.lock().unwrap().contains(&record_type) {
                return Err(ControlPlaneError::AdmissionDenied {
                    kind: "RecordSet",
                    name: record_set.spec.dns_zone_ref.name.clone(),
                    reason: format!("injected dry-run failure for {record_type}"),
                });
            }
            return Ok(record_set.clone());
        }

        self.log(format!("create:{record_type}"));
        if self.fail_write.lock().unwrap().contains(&record_type) {
            return Err(Self::unreachable(record_type, "create"));
        }

        let zone = record_set.spec.dns_zone_ref.name.clone();
        let mut stored = record_set.clone();
        stored.metadata.name = Some(format!(
            "{zone}-{}",
            record_type.as_str().to_ascii_lowercase()
        ));
        stored.metadata.resource_version = Some("1".to_string());
        self.insert(project, stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        project: &str,
        name: &str,
        record_set: &RecordSet,
        dry_run: bool,
    ) -> Result<RecordSet, ControlPlaneError> {
        let record_type = record_set.spec.record_type;
        if dry_run {
            self.log(format!("update-dry:{record_type}"));
            if self.fail_dry_run.lock().unwrap().contains(&record_type) {
                return Err(ControlPlaneError::AdmissionDenied {
                    kind: "RecordSet",
                    name: name.to_string(),
                    reason: format!("injected dry-run failure for {record_type}"),
                });
            }
            return Ok(record_set.clone());
        }

        self.log(format!("update:{record_type}"));
        if self.fail_write.lock().unwrap().contains(&record_type) {
            return Err(Self::unreachable(record_type, "update"));
        }

        let mut stored = record_set.clone();
        let version: u64 = stored
            .metadata
            .resource_version
            .as_deref()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        stored.metadata.resource_version = Some((version + 1).to_string());
        self.insert(project, stored.clone());
        Ok(stored)
    }

    async fn delete(&self, project: &str, name: &str) -> Result<(), ControlPlaneError> {
        self.log(format!("delete:{name}"));
        self.sets
            .lock()
            .unwrap()
            .retain(|key, set| key.0 != project || set.name() != Some(name));
        Ok(())
    }

    async fn get_zone_discovery(
        &self,
        _project: &str,
        _domain: &str,
    ) -> Result<Option<ZoneDiscovery>, ControlPlaneError> {
        self.log("discovery");
        let mut queue = self.discoveries.lock().unwrap();
        if queue.len() > 1 {
            Ok(queue.pop_front().unwrap_or(None))
        } else {
            Ok(queue.front().cloned().flatten())
        }
    }
}
