// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Control-plane REST client for `RecordSet` and `ZoneDiscovery` resources.
//!
//! The control plane exposes a Kubernetes-style resource API, namespaced by
//! project, with `dryRun=All` support on writes and `resourceVersion`-based
//! optimistic concurrency on updates. The reconciler talks to it through the
//! [`RecordSetStore`] trait so tests can substitute an in-memory store; the
//! production implementation is [`ControlPlaneClient`] over `reqwest`.
//!
//! No automatic retry: a failed write becomes a `Failed` row in the import
//! report and the user re-attempts.

use crate::constants::{API_GROUP, API_VERSION, CONTROL_PLANE_TIMEOUT_SECS, DRY_RUN_ALL};
use crate::errors::ControlPlaneError;
use crate::records::RecordType;
use crate::resources::{RecordSet, RecordSetList, ZoneDiscovery};
use async_trait::async_trait;
use reqwest::{Client as HttpClient, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Storage interface the reconciler depends on.
///
/// Absence of a `RecordSet` on lookup is not an error; it signals the create
/// path, so reads return `Option`.
#[async_trait]
pub trait RecordSetStore: Send + Sync {
    /// Find the single `RecordSet` of `record_type` for `zone`, if any.
    async fn find_by_type_and_zone(
        &self,
        project: &str,
        zone: &str,
        record_type: RecordType,
    ) -> Result<Option<RecordSet>, ControlPlaneError>;

    /// Create a new `RecordSet`. With `dry_run`, the write is validated by
    /// server-side admission but not persisted.
    async fn create(
        &self,
        project: &str,
        record_set: &RecordSet,
        dry_run: bool,
    ) -> Result<RecordSet, ControlPlaneError>;

    /// Replace an existing `RecordSet` by name. The payload must carry the
    /// `resourceVersion` of the read it was derived from.
    async fn update(
        &self,
        project: &str,
        name: &str,
        record_set: &RecordSet,
        dry_run: bool,
    ) -> Result<RecordSet, ControlPlaneError>;

    /// Delete a `RecordSet` by name.
    async fn delete(&self, project: &str, name: &str) -> Result<(), ControlPlaneError>;

    /// Fetch the `ZoneDiscovery` for `domain`, if the platform has one.
    async fn get_zone_discovery(
        &self,
        project: &str,
        domain: &str,
    ) -> Result<Option<ZoneDiscovery>, ControlPlaneError>;
}

/// HTTP client for the DNS control plane.
#[derive(Clone)]
pub struct ControlPlaneClient {
    http: HttpClient,
    base_url: Url,
    token: Option<String>,
}

impl ControlPlaneClient {
    /// Build a client for the control plane at `base_url`.
    ///
    /// `token` is sent as a bearer token on every request when present.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(base_url: Url, token: Option<String>) -> Result<Self, ControlPlaneError> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(CONTROL_PLANE_TIMEOUT_SECS))
            .build()
            .map_err(|e| ControlPlaneError::Unreachable {
                endpoint: base_url.to_string(),
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    /// Resource collection URL: `/apis/<group>/<version>/projects/<project>/<plural>`.
    fn collection_url(&self, project: &str, plural: &str) -> Result<Url, ControlPlaneError> {
        self.base_url
            .join(&format!(
                "apis/{API_GROUP}/{API_VERSION}/projects/{project}/{plural}"
            ))
            .map_err(|e| ControlPlaneError::Unreachable {
                endpoint: self.base_url.to_string(),
                reason: format!("invalid resource URL: {e}"),
            })
    }

    /// Named resource URL under a collection.
    fn resource_url(
        &self,
        project: &str,
        plural: &str,
        name: &str,
    ) -> Result<Url, ControlPlaneError> {
        let mut url = self.collection_url(project, plural)?;
        url.path_segments_mut()
            .map_err(|()| ControlPlaneError::Unreachable {
                endpoint: self.base_url.to_string(),
                reason: "control-plane base URL cannot carry paths".to_string(),
            })?
            .push(name);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and decode the JSON body, mapping failure statuses to
    /// [`ControlPlaneError`]. `Ok(None)` is returned for 404 so read paths
    /// can treat absence as "create".
    async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        kind: &'static str,
        name: &str,
        project: &str,
    ) -> Result<Option<T>, ControlPlaneError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ControlPlaneError::Unreachable {
                endpoint: self.base_url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            let body = response
                .json::<T>()
                .await
                .map_err(|e| ControlPlaneError::Decode {
                    reason: e.to_string(),
                })?;
            return Ok(Some(body));
        }

        match status.as_u16() {
            404 => Ok(None),
            409 => Err(ControlPlaneError::Conflict {
                kind,
                name: name.to_string(),
            }),
            400 | 422 => Err(ControlPlaneError::AdmissionDenied {
                kind,
                name: name.to_string(),
                reason: failure_message(response).await,
            }),
            401 | 403 => Err(ControlPlaneError::Unauthorized {
                status_code: status.as_u16(),
            }),
            502 | 503 | 504 => Err(ControlPlaneError::Unreachable {
                endpoint: self.base_url.to_string(),
                reason: format!("gateway error (HTTP {})", status.as_u16()),
            }),
            _ => Err(ControlPlaneError::Unexpected {
                status_code: status.as_u16(),
                body: failure_message(response).await,
            }),
        }
    }
}

/// Extract the `message` of a Kubernetes-style Status body, falling back to
/// the raw body text.
async fn failure_message(response: reqwest::Response) -> String {
    let text = response.text().await.unwrap_or_default();
    serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or(text)
}

#[async_trait]
impl RecordSetStore for ControlPlaneClient {
    async fn find_by_type_and_zone(
        &self,
        project: &str,
        zone: &str,
        record_type: RecordType,
    ) -> Result<Option<RecordSet>, ControlPlaneError> {
        let mut url = self.collection_url(project, "recordsets")?;
        url.query_pairs_mut()
            .append_pair("dnsZone", zone)
            .append_pair("recordType", record_type.as_str());

        debug!(project, zone, record_type = %record_type, "Looking up RecordSet");
        let list: RecordSetList = self
            .send(self.request(Method::GET, url), "RecordSet", zone, project)
            .await?
            .unwrap_or_default();

        if list.items.len() > 1 {
            // One RecordSet per (zone, type) is a control-plane invariant;
            // seeing more means it is already violated upstream.
            warn!(
                project,
                zone,
                record_type = %record_type,
                count = list.items.len(),
                "Control plane returned multiple RecordSets for one (zone, type)"
            );
        }
        Ok(list.items.into_iter().next())
    }

    async fn create(
        &self,
        project: &str,
        record_set: &RecordSet,
        dry_run: bool,
    ) -> Result<RecordSet, ControlPlaneError> {
        let mut url = self.collection_url(project, "recordsets")?;
        if dry_run {
            url.query_pairs_mut().append_pair("dryRun", DRY_RUN_ALL);
        }
        let zone = record_set.spec.dns_zone_ref.name.clone();

        debug!(project, zone = %zone, dry_run, "Creating RecordSet");
        self.send(
            self.request(Method::POST, url).json(record_set),
            "RecordSet",
            &zone,
            project,
        )
        .await?
        .ok_or(ControlPlaneError::NotFound {
            kind: "RecordSet",
            name: zone,
            project: project.to_string(),
        })
    }

    async fn update(
        &self,
        project: &str,
        name: &str,
        record_set: &RecordSet,
        dry_run: bool,
    ) -> Result<RecordSet, ControlPlaneError> {
        let mut url = self.resource_url(project, "recordsets", name)?;
        if dry_run {
            url.query_pairs_mut().append_pair("dryRun", DRY_RUN_ALL);
        }

        debug!(project, name, dry_run, "Updating RecordSet");
        self.send(
            self.request(Method::PUT, url).json(record_set),
            "RecordSet",
            name,
            project,
        )
        .await?
        .ok_or(ControlPlaneError::NotFound {
            kind: "RecordSet",
            name: name.to_string(),
            project: project.to_string(),
        })
    }

    async fn delete(&self, project: &str, name: &str) -> Result<(), ControlPlaneError> {
        let url = self.resource_url(project, "recordsets", name)?;

        debug!(project, name, "Deleting RecordSet");
        let deleted: Option<serde_json::Value> = self
            .send(self.request(Method::DELETE, url), "RecordSet", name, project)
            .await?;
        if deleted.is_none() {
            // Deleting an already-absent RecordSet is idempotent success.
            debug!(project, name, "RecordSet already absent");
        }
        Ok(())
    }

    async fn get_zone_discovery(
        &self,
        project: &str,
        domain: &str,
    ) -> Result<Option<ZoneDiscovery>, ControlPlaneError> {
        let url = self.resource_url(project, "zonediscoveries", domain)?;
        self.send(
            self.request(Method::GET, url),
            "ZoneDiscovery",
            domain,
            project,
        )
        .await
    }
}

#[cfg(test)]
#[path = "controlplane_tests.rs"]
mod controlplane_tests;
