// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Single-record create and delete endpoints.

use super::{api_error, AppState};
use crate::csrf::validate_token;
use crate::errors::ImportError;
use crate::import::{reconcile_groups, ImportAction, ImportOptions, ImportRecordDetail};
use crate::records::ParsedRecord;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Body of the single-record endpoints.
#[derive(Clone, Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordRequest {
    /// Project owning the zone.
    pub project_id: String,
    /// Zone resource the record belongs to.
    pub dns_zone_id: String,
    /// The record to create or delete.
    pub record: ParsedRecord,
    /// CSRF token; must match the `x-csrf-token` header.
    pub csrf: String,
}

/// Body of the single-record create response.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct RecordResponse {
    /// True when the operation succeeded.
    pub success: bool,
    /// Outcome row for the record.
    pub detail: ImportRecordDetail,
}

fn csrf_ok(headers: &HeaderMap, token: &str) -> bool {
    let header_token = headers
        .get(crate::constants::CSRF_HEADER)
        .and_then(|v| v.to_str().ok());
    validate_token(token, header_token)
}

/// `POST /v1/dns/records`: create-or-append one record.
///
/// Runs the reconciler on a single-record group, so the behavior (duplicate
/// skipping, dry-run before write, one `RecordSet` per type) is identical to
/// a bulk import of one record.
pub async fn handle_create_record(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<RecordRequest>,
) -> Response {
    if !csrf_ok(&headers, &request.csrf) {
        return api_error(
            StatusCode::FORBIDDEN,
            ImportError::CsrfRejected.to_string(),
        );
    }
    if !request.record.record_type().is_importable() {
        return api_error(
            StatusCode::BAD_REQUEST,
            format!(
                "{} records are platform-managed and cannot be created",
                request.record.record_type()
            ),
        );
    }

    let mut groups = BTreeMap::new();
    groups.insert(request.record.record_type(), vec![request.record.clone()]);

    let outcome = reconcile_groups(
        state.store.as_ref(),
        &request.project_id,
        &request.dns_zone_id,
        groups,
        ImportOptions::default(),
    )
    .await;

    let Some(detail) = outcome.details.into_iter().next() else {
        return api_error(StatusCode::BAD_REQUEST, "no record in request");
    };

    let status = match detail.action {
        ImportAction::Failed => StatusCode::BAD_REQUEST,
        _ => StatusCode::OK,
    };
    (
        status,
        Json(RecordResponse {
            success: detail.action != ImportAction::Failed,
            detail,
        }),
    )
        .into_response()
}

/// `DELETE /v1/dns/records`: remove one record, deleting the whole
/// `RecordSet` when it becomes empty.
pub async fn handle_delete_record(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<RecordRequest>,
) -> Response {
    if !csrf_ok(&headers, &request.csrf) {
        return api_error(
            StatusCode::FORBIDDEN,
            ImportError::CsrfRejected.to_string(),
        );
    }

    let record_type = request.record.record_type();
    let existing = match state
        .store
        .find_by_type_and_zone(&request.project_id, &request.dns_zone_id, record_type)
        .await
    {
        Ok(Some(set)) => set,
        Ok(None) => {
            return api_error(
                StatusCode::NOT_FOUND,
                format!("no {record_type} RecordSet for zone {}", request.dns_zone_id),
            );
        }
        Err(e) => {
            warn!(error = %e, "RecordSet lookup failed during delete");
            return api_error(StatusCode::BAD_GATEWAY, e.to_string());
        }
    };

    let Some(name) = existing.name().map(String::from) else {
        return api_error(StatusCode::BAD_GATEWAY, "control plane returned an unnamed RecordSet");
    };

    let target_key = request.record.dedup_key();
    let mut set = existing;
    let before = set.spec.records.len();
    set.spec.records.retain(|r| r.dedup_key() != target_key);

    if set.spec.records.len() == before {
        return api_error(
            StatusCode::NOT_FOUND,
            format!(
                "record {} {} not found in RecordSet {name}",
                request.record.name,
                request.record.data.value()
            ),
        );
    }

    let result = if set.spec.records.is_empty() {
        state.store.delete(&request.project_id, &name).await
    } else {
        match state
            .store
            .update(&request.project_id, &name, &set, true)
            .await
        {
            Ok(_) => state
                .store
                .update(&request.project_id, &name, &set, false)
                .await
                .map(|_| ()),
            Err(e) => Err(e),
        }
    };

    match result {
        Ok(()) => {
            info!(
                record_set = %name,
                remaining = set.spec.records.len(),
                "Removed record"
            );
            Json(json!({ "success": true, "remainingRecords": set.spec.records.len() }))
                .into_response()
        }
        Err(e) => {
            warn!(error = %e, record_set = %name, "Record delete failed");
            api_error(StatusCode::BAD_GATEWAY, e.to_string())
        }
    }
}

#[cfg(test)]
#[path = "records_tests.rs"]
mod records_tests;
