// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

#![allow(unexpected_cfgs)]

//! # Zoneport - Bulk DNS Zone Import
//!
//! Zoneport is the import engine of the cloud DNS console: it parses BIND
//! zone files, normalizes the records, and reconciles them into per
//! `(zone, type)` `RecordSet` resources on the DNS control plane.
//!
//! ## Overview
//!
//! This library provides the core functionality for the importer, including:
//!
//! - An RFC 1035 master-file subset parser
//! - Deduplication, apex CNAME-to-ALIAS rewriting, and apex SOA/NS filtering
//! - RecordSet reconciliation with dry-run admission checks
//! - Per-record outcome reporting with aggregate counts
//! - Zone discovery polling with structural cancellation
//!
//! ## Modules
//!
//! - [`records`] - record types and the tagged record value union
//! - [`zonefile`] - BIND master-file parsing
//! - [`import`] - the dedup/apex/group/reconcile pipeline
//! - [`controlplane`] - the control-plane REST client
//! - [`resources`] - `RecordSet` and `ZoneDiscovery` resource types
//! - [`discovery`] - zone discovery polling
//! - [`api`] - the HTTP API of the server
//!
//! ## Example
//!
//! ```rust,no_run
//! use zoneport::import::{plan_import, ImportOptions};
//! use zoneport::zonefile::parse_zone_file;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let zone = parse_zone_file(
//!     "$ORIGIN example.com.\n\
//!      @ IN CNAME cdn.example.net.\n\
//!      www IN A 192.0.2.1\n",
//! )
//! .map_err(|errors| format!("{} parse error(s)", errors.len()))?;
//!
//! let plan = plan_import(zone.records, zone.origin.as_deref());
//! assert_eq!(plan.alias_rewrites, 1); // the apex CNAME imports as ALIAS
//! assert_eq!(plan.importable.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - **Typed records** - a closed union over record types, checked exhaustively
//! - **Per-type failure isolation** - one failing record type never aborts the rest
//! - **Dry-run writes** - server-side admission validates before anything persists
//! - **Status tracking** - per-record created/updated/skipped/failed outcomes

pub mod api;
pub mod config;
pub mod constants;
pub mod controlplane;
pub mod csrf;
pub mod discovery;
pub mod errors;
pub mod import;
pub mod metrics;
pub mod records;
pub mod resources;
pub mod zonefile;

#[cfg(test)]
pub(crate) mod test_support;
