// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! JSON Schema Generator
//!
//! Generates JSON Schemas for zoneport's wire types (import request/response
//! bodies and control-plane resources). This keeps the schemas consumed by
//! the console's form validation in sync with the Rust code.
//!
//! Usage:
//!   cargo run --bin schemagen
//!
//! Generated files are written to schemas/ with one .schema.json per type.

use schemars::{schema_for, JsonSchema};
use std::fs;
use std::path::Path;
use zoneport::api::discovery::DiscoveryResponse;
use zoneport::api::import::{ImportRequest, ImportResponse};
use zoneport::api::records::RecordRequest;
use zoneport::records::ParsedRecord;
use zoneport::resources::{RecordSet, ZoneDiscovery};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = Path::new("schemas");
    fs::create_dir_all(output_dir)?;

    println!("Generating JSON schemas...");

    generate::<ImportRequest>("import-request.schema.json", output_dir)?;
    generate::<ImportResponse>("import-response.schema.json", output_dir)?;
    generate::<RecordRequest>("record-request.schema.json", output_dir)?;
    generate::<DiscoveryResponse>("discovery-response.schema.json", output_dir)?;
    generate::<ParsedRecord>("parsed-record.schema.json", output_dir)?;
    generate::<RecordSet>("recordset.schema.json", output_dir)?;
    generate::<ZoneDiscovery>("zonediscovery.schema.json", output_dir)?;

    println!("✓ Successfully generated schemas in schemas/");
    Ok(())
}

fn generate<T: JsonSchema>(
    filename: &str,
    output_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let schema = schema_for!(T);
    let json = serde_json::to_string_pretty(&schema)?;
    let path = output_dir.join(filename);
    fs::write(&path, json)?;
    println!("  wrote {}", path.display());
    Ok(())
}
