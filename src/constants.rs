// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the zoneport importer.
//!
//! This module contains all numeric and string constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

// ============================================================================
// Control-Plane API Constants
// ============================================================================

/// API group of the DNS control-plane resources
pub const API_GROUP: &str = "dns.firestoned.io";

/// API version of the DNS control-plane resources
pub const API_VERSION: &str = "v1alpha1";

/// Fully qualified API version (group/version)
pub const API_GROUP_VERSION: &str = "dns.firestoned.io/v1alpha1";

/// Kind name for `RecordSet` resources
pub const KIND_RECORD_SET: &str = "RecordSet";

/// Kind name for `ZoneDiscovery` resources
pub const KIND_ZONE_DISCOVERY: &str = "ZoneDiscovery";

/// Value of the `dryRun` query parameter for admission-only writes
pub const DRY_RUN_ALL: &str = "All";

// ============================================================================
// DNS Constants
// ============================================================================

/// Default record TTL in seconds when neither the record nor the zone sets one
pub const DEFAULT_RECORD_TTL_SECS: u32 = 300;

/// Owner name token denoting the zone apex in master files
pub const APEX_NAME: &str = "@";

// ============================================================================
// Discovery Polling Constants
// ============================================================================

/// Maximum number of fetch attempts while waiting for a zone discovery to populate
pub const DISCOVERY_POLL_ATTEMPTS: u32 = 5;

/// Delay between discovery poll attempts in milliseconds
pub const DISCOVERY_POLL_INTERVAL_MS: u64 = 2000;

// ============================================================================
// HTTP Constants
// ============================================================================

/// Request header carrying the CSRF token for state-changing endpoints
pub const CSRF_HEADER: &str = "x-csrf-token";

/// Default listen address of the import API server
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

/// Default request timeout for control-plane calls in seconds
pub const CONTROL_PLANE_TIMEOUT_SECS: u64 = 30;
