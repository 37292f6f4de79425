// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for zone imports and control-plane operations.
//!
//! This module provides specialized error types for:
//! - Control-plane REST API operations (RecordSet lookup and writes)
//! - Import pipeline failures (parse errors, CSRF rejection)
//! - Zone discovery polling
//!
//! These errors provide structured error handling for import operations,
//! enabling per-record failure rows in import reports and consistent HTTP
//! responses at the API boundary.

use thiserror::Error;

/// Errors that can occur when talking to the DNS control plane.
///
/// These errors represent failures when interacting with the control plane's
/// Kubernetes-style REST API for `RecordSet` and `ZoneDiscovery` resources.
#[derive(Error, Debug, Clone)]
pub enum ControlPlaneError {
    /// Resource not found (HTTP 404)
    ///
    /// Note: an absent `RecordSet` during lookup is NOT an error; the client
    /// maps 404 on reads to `Ok(None)`. This variant surfaces 404s on writes,
    /// e.g. updating a `RecordSet` deleted by a concurrent actor.
    #[error("{kind} '{name}' not found in project '{project}' (HTTP 404)")]
    NotFound {
        /// Resource kind (e.g., `RecordSet`)
        kind: &'static str,
        /// Resource name that was not found
        name: String,
        /// Project the lookup ran against
        project: String,
    },

    /// Write rejected by server-side admission (dry-run or real write)
    ///
    /// Returned for HTTP 400/422 responses. The body message is preserved so
    /// the per-record failure rows can carry the admission reason.
    #[error("write of {kind} '{name}' rejected by admission: {reason}")]
    AdmissionDenied {
        /// Resource kind being written
        kind: &'static str,
        /// Resource name being written
        name: String,
        /// Admission failure reason from the response body
        reason: String,
    },

    /// Optimistic-concurrency conflict (HTTP 409)
    ///
    /// The `resourceVersion` sent with an update no longer matches the
    /// server's. The import does not retry; the caller re-attempts.
    #[error("conflict writing {kind} '{name}': resourceVersion is stale")]
    Conflict {
        /// Resource kind being written
        kind: &'static str,
        /// Resource name being written
        name: String,
    },

    /// Request not authorized (HTTP 401/403)
    #[error("control plane denied access (HTTP {status_code})")]
    Unauthorized {
        /// HTTP status code (401 or 403)
        status_code: u16,
    },

    /// Control plane unreachable (connect failure, timeout, gateway errors)
    #[error("control plane unreachable at {endpoint}: {reason}")]
    Unreachable {
        /// Base endpoint that could not be reached
        endpoint: String,
        /// Underlying failure description
        reason: String,
    },

    /// Unexpected HTTP response that maps to no known condition
    #[error("unexpected control-plane response (HTTP {status_code}): {body}")]
    Unexpected {
        /// HTTP status code
        status_code: u16,
        /// Response body or error message
        body: String,
    },

    /// Response body could not be decoded as the expected resource
    #[error("failed to decode control-plane response: {reason}")]
    Decode {
        /// Decode failure description
        reason: String,
    },
}

impl ControlPlaneError {
    /// Returns true if this error is transient and a later re-attempt of the
    /// whole import could succeed without operator intervention.
    ///
    /// Zoneport never retries automatically (the user re-attempts), but the
    /// flag is exported in metrics and surfaced in failure messages.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Unreachable { .. } | Self::Conflict { .. } => true,
            Self::NotFound { .. }
            | Self::AdmissionDenied { .. }
            | Self::Unauthorized { .. }
            | Self::Unexpected { .. }
            | Self::Decode { .. } => false,
        }
    }

    /// Short CamelCase reason code for metrics labels and report messages.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NotFound",
            Self::AdmissionDenied { .. } => "AdmissionDenied",
            Self::Conflict { .. } => "Conflict",
            Self::Unauthorized { .. } => "Unauthorized",
            Self::Unreachable { .. } => "Unreachable",
            Self::Unexpected { .. } => "UnexpectedResponse",
            Self::Decode { .. } => "DecodeError",
        }
    }
}

/// Errors that abort an import before any control-plane write.
///
/// Failures *during* reconciliation never surface here; they become `Failed`
/// rows in the import report so sibling record types keep processing.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The zone file failed to parse; nothing was imported.
    ///
    /// Carries every malformed line so the caller can fix the file in one
    /// pass instead of replaying the upload per error.
    #[error("zone file is malformed ({} error(s))", errors.len())]
    Malformed {
        /// Human-readable parse errors, one per offending line
        errors: Vec<String>,
    },

    /// The CSRF token was missing or did not match the request header.
    #[error("CSRF token validation failed")]
    CsrfRejected,

    /// Zone discovery did not populate within the polling budget.
    #[error("zone discovery for '{domain}' not ready after {attempts} attempts")]
    DiscoveryTimeout {
        /// Domain the discovery was probing
        domain: String,
        /// Number of fetch attempts made
        attempts: u32,
    },

    /// Zone discovery ended in a failed phase on the control plane.
    #[error("zone discovery for '{domain}' failed: {reason}")]
    DiscoveryFailed {
        /// Domain the discovery was probing
        domain: String,
        /// Failure reason reported by the discovery job
        reason: String,
    },

    /// Zone discovery polling was stopped before reaching a terminal state.
    #[error("zone discovery polling for '{domain}' was cancelled")]
    DiscoveryCancelled {
        /// Domain the discovery was probing
        domain: String,
    },

    /// Control-plane failure outside the per-type isolation boundary
    /// (e.g., fetching the discovery resource itself).
    #[error(transparent)]
    ControlPlane(#[from] ControlPlaneError),
}

#[cfg(test)]
#[path = "errors_tests.rs"]
mod errors_tests;
