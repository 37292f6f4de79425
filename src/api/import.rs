// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Bulk-import endpoint.

use super::{api_error, AppState};
use crate::csrf::validate_token;
use crate::errors::ImportError;
use crate::import::{run_import, ImportOptions, ImportRecordDetail, ImportSummary, SkippedApexRecords};
use crate::metrics::record_import_request;
use crate::records::{ParsedRecord, RecordType};
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{info, warn};

/// One incoming record group, shaped like a `RecordSet` spec fragment.
///
/// Discovery previews hand their record sets straight back to this endpoint.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportRecordSet {
    /// Declared type of every record in `records`.
    pub record_type: RecordType,
    /// The records to import.
    #[serde(default)]
    pub records: Vec<ParsedRecord>,
}

/// Body of `POST /v1/dns/import`.
#[derive(Clone, Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    /// Project owning the zone.
    pub project_id: String,
    /// Zone resource the records import into.
    pub dns_zone_id: String,
    /// Zone origin for apex detection (e.g., `example.com.`).
    #[serde(default)]
    pub zone_origin: Option<String>,
    /// The record groups to import.
    #[serde(default)]
    pub record_sets: Vec<ImportRecordSet>,
    /// Duplicate handling and merge strategy.
    #[serde(default)]
    pub import_options: ImportOptions,
    /// CSRF token; must match the `x-csrf-token` header.
    pub csrf: String,
    /// When set, respond with a redirect to this URI carrying outcome
    /// query parameters instead of a JSON body.
    #[serde(default)]
    pub redirect_uri: Option<String>,
}

/// Body of the bulk-import response.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    /// True when no record failed.
    pub success: bool,
    /// Aggregate counts.
    pub summary: ImportSummary,
    /// Per-record outcome rows.
    pub details: Vec<ImportRecordDetail>,
    /// Apex SOA/NS records removed before reconciliation.
    pub skipped_apex_records: SkippedApexRecords,
    /// Number of apex CNAMEs imported as ALIAS.
    pub alias_rewrites: usize,
}

/// `POST /v1/dns/import`.
///
/// Validates the CSRF token before any write, flattens the record groups,
/// and runs the import pipeline. Status is 200 on full success, 207 on
/// partial success, 400 on total failure.
pub async fn handle_import(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ImportRequest>,
) -> Response {
    let header_token = headers
        .get(crate::constants::CSRF_HEADER)
        .and_then(|v| v.to_str().ok());
    if !validate_token(&request.csrf, header_token) {
        warn!(project = %request.project_id, "Rejecting import with invalid CSRF token");
        return api_error(
            StatusCode::FORBIDDEN,
            ImportError::CsrfRejected.to_string(),
        );
    }

    // Reject groups whose declared type disagrees with their records before
    // touching the control plane.
    for group in &request.record_sets {
        if let Some(bad) = group
            .records
            .iter()
            .find(|r| r.record_type() != group.record_type)
        {
            return api_error(
                StatusCode::BAD_REQUEST,
                format!(
                    "record '{}' has type {} but its group declares {}",
                    bad.name,
                    bad.record_type(),
                    group.record_type
                ),
            );
        }
    }

    let records: Vec<ParsedRecord> = request
        .record_sets
        .into_iter()
        .flat_map(|group| group.records)
        .collect();

    info!(
        project = %request.project_id,
        zone = %request.dns_zone_id,
        records = records.len(),
        strategy = ?request.import_options.merge_strategy,
        "Starting bulk import"
    );

    let started = Instant::now();
    let run = run_import(
        state.store.as_ref(),
        &request.project_id,
        &request.dns_zone_id,
        records,
        request.zone_origin.as_deref(),
        request.import_options,
    )
    .await;

    let status = run.outcome.summary.http_status();
    let strategy = match request.import_options.merge_strategy {
        crate::import::MergeStrategy::Append => "append",
        crate::import::MergeStrategy::Replace => "replace",
    };
    record_import_request(status, strategy, started.elapsed());

    if let Some(redirect_uri) = request.redirect_uri {
        return redirect_with_outcome(&redirect_uri, &run.outcome.summary);
    }

    let body = ImportResponse {
        success: run.outcome.summary.failed == 0,
        summary: run.outcome.summary,
        details: run.outcome.details,
        skipped_apex_records: run.skipped_apex,
        alias_rewrites: run.alias_rewrites,
    };
    (
        StatusCode::from_u16(status).unwrap_or(StatusCode::OK),
        Json(body),
    )
        .into_response()
}

/// 303 redirect carrying the outcome as query parameters, for browser form
/// posts that want a toast on the far side.
fn redirect_with_outcome(redirect_uri: &str, summary: &ImportSummary) -> Response {
    let separator = if redirect_uri.contains('?') { '&' } else { '?' };
    let location = format!(
        "{redirect_uri}{separator}imported={}&skipped={}&failed={}",
        summary.created + summary.updated,
        summary.skipped,
        summary.failed
    );
    match header::HeaderValue::from_str(&location) {
        Ok(value) => {
            (StatusCode::SEE_OTHER, [(header::LOCATION, value)]).into_response()
        }
        Err(_) => api_error(StatusCode::BAD_REQUEST, "invalid redirect URI"),
    }
}

#[cfg(test)]
#[path = "import_tests.rs"]
mod import_tests;
