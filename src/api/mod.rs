// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! HTTP API of the zoneport server.
//!
//! Routes:
//!
//! - `POST /v1/dns/import` - bulk import into a zone ([`import`])
//! - `POST /v1/dns/records` - create-or-append one record ([`records`])
//! - `DELETE /v1/dns/records` - remove one record ([`records`])
//! - `GET /v1/dns/discovery` - zone discovery preview ([`discovery`])
//! - `GET /v1/csrf` - mint a CSRF token for the double-submit check
//! - `GET /healthz`, `GET /metrics` - operational endpoints
//!
//! The state is constructor-injected: the server owns one control-plane
//! client for its lifetime and hands it to handlers through [`AppState`];
//! there are no module-level singletons beyond the metrics registry.

pub mod discovery;
pub mod import;
pub mod records;

use crate::controlplane::RecordSetStore;
use crate::discovery::PollSettings;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde_json::json;
use std::sync::Arc;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Control-plane client used for all reads and writes.
    pub store: Arc<dyn RecordSetStore>,
    /// Polling budget for discovery previews.
    pub poll_settings: PollSettings,
}

impl AppState {
    /// Build state around a control-plane client with default polling.
    #[must_use]
    pub fn new(store: Arc<dyn RecordSetStore>) -> Self {
        Self {
            store,
            poll_settings: PollSettings::default(),
        }
    }
}

/// Build the API router.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/metrics", get(metrics))
        .route("/v1/csrf", get(csrf_token))
        .route("/v1/dns/import", post(import::handle_import))
        .route(
            "/v1/dns/records",
            post(records::handle_create_record).delete(records::handle_delete_record),
        )
        .route("/v1/dns/discovery", get(discovery::handle_preview))
        .with_state(state)
}

/// Liveness probe.
async fn healthz() -> &'static str {
    "ok"
}

/// Prometheus metrics in text format.
async fn metrics() -> String {
    crate::metrics::render_metrics()
}

/// Mint a CSRF token for the double-submit check.
async fn csrf_token(State(_state): State<AppState>) -> Response {
    Json(json!({ "token": crate::csrf::issue_token() })).into_response()
}

/// JSON error body used by every handler.
pub(crate) fn api_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}
