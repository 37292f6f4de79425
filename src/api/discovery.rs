// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Zone discovery preview endpoint.

use super::{api_error, AppState};
use crate::api::import::ImportRecordSet;
use crate::discovery::await_zone_discovery;
use crate::errors::ImportError;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Query of `GET /v1/dns/discovery`.
#[derive(Clone, Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryQuery {
    /// Project owning the discovery.
    pub project_id: String,
    /// Domain the platform probed.
    pub domain: String,
}

/// Body of the discovery preview response.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryResponse {
    /// The probed domain.
    pub domain: String,
    /// Discovered record groups, ready to post to the import endpoint.
    pub record_sets: Vec<ImportRecordSet>,
}

/// `GET /v1/dns/discovery`.
///
/// Waits for the discovery job to populate (bounded polling per
/// [`AppState::poll_settings`]) and returns its record sets in the shape the
/// bulk-import endpoint accepts, so the preview's one-click import is a
/// straight re-post. A still-pending discovery yields 202 Accepted.
pub async fn handle_preview(
    State(state): State<AppState>,
    Query(query): Query<DiscoveryQuery>,
) -> Response {
    let discovery = await_zone_discovery(
        state.store.as_ref(),
        &query.project_id,
        &query.domain,
        state.poll_settings,
    )
    .await;

    match discovery {
        Ok(discovery) => {
            let record_sets = discovery
                .status
                .map(|status| status.record_sets)
                .unwrap_or_default()
                .into_iter()
                .map(|set| ImportRecordSet {
                    record_type: set.spec.record_type,
                    records: set.spec.records,
                })
                .collect();
            Json(DiscoveryResponse {
                domain: query.domain,
                record_sets,
            })
            .into_response()
        }
        Err(ImportError::DiscoveryTimeout { domain, attempts }) => (
            StatusCode::ACCEPTED,
            Json(serde_json::json!({
                "domain": domain,
                "status": "pending",
                "attempts": attempts,
            })),
        )
            .into_response(),
        Err(e) => {
            warn!(domain = %query.domain, error = %e, "Discovery preview failed");
            api_error(StatusCode::BAD_GATEWAY, e.to_string())
        }
    }
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod discovery_tests;
