// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Runtime configuration for the zoneport server and CLI.
//!
//! Configuration is layered, later sources winning:
//!
//! 1. YAML config file (`--config`)
//! 2. environment variables (`ZONEPORT_LISTEN_ADDR`,
//!    `ZONEPORT_CONTROL_PLANE_URL`, `ZONEPORT_CONTROL_PLANE_TOKEN`)
//! 3. command-line flags (applied by the binary)
//!
//! The control-plane URL is the one required setting; everything else has a
//! default.

use crate::constants::DEFAULT_LISTEN_ADDR;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use url::Url;

/// Raw, fully optional file form of the configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigFile {
    /// Listen address of the import API server.
    pub listen_addr: Option<String>,
    /// Base URL of the DNS control plane.
    pub control_plane_url: Option<Url>,
    /// Bearer token for control-plane requests.
    pub control_plane_token: Option<String>,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen address of the import API server.
    pub listen_addr: SocketAddr,
    /// Base URL of the DNS control plane.
    pub control_plane_url: Url,
    /// Bearer token for control-plane requests, if the control plane
    /// requires authentication.
    pub control_plane_token: Option<String>,
}

impl Config {
    /// Load configuration from an optional file plus process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, a value is
    /// malformed, or no control-plane URL is configured.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        Self::load_with_env(file, &|name| std::env::var(name).ok())
    }

    /// [`load`](Self::load) with an explicit environment lookup, for tests.
    ///
    /// # Errors
    ///
    /// Same conditions as [`load`](Self::load).
    pub fn load_with_env(
        file: Option<&Path>,
        env: &dyn Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut raw = match file {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config file {}", path.display()))?;
                serde_yaml::from_str::<ConfigFile>(&text)
                    .with_context(|| format!("failed to parse config file {}", path.display()))?
            }
            None => ConfigFile::default(),
        };

        if let Some(listen) = env("ZONEPORT_LISTEN_ADDR") {
            raw.listen_addr = Some(listen);
        }
        if let Some(url) = env("ZONEPORT_CONTROL_PLANE_URL") {
            raw.control_plane_url =
                Some(Url::parse(&url).context("invalid ZONEPORT_CONTROL_PLANE_URL")?);
        }
        if let Some(token) = env("ZONEPORT_CONTROL_PLANE_TOKEN") {
            raw.control_plane_token = Some(token);
        }

        let listen_addr = raw
            .listen_addr
            .as_deref()
            .unwrap_or(DEFAULT_LISTEN_ADDR)
            .parse::<SocketAddr>()
            .context("invalid listen address")?;

        let Some(control_plane_url) = raw.control_plane_url else {
            bail!(
                "no control-plane URL configured; set controlPlaneUrl in the \
                 config file, ZONEPORT_CONTROL_PLANE_URL, or --control-plane-url"
            );
        };

        Ok(Self {
            listen_addr,
            control_plane_url,
            control_plane_token: raw.control_plane_token,
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
