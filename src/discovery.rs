// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Zone discovery polling.
//!
//! A `ZoneDiscovery` is an asynchronous platform job probing an external DNS
//! provider for a domain's records. The job takes a few seconds to report, so
//! the preview flow fetches the resource a bounded number of times (by
//! default 5 attempts, 2 s apart) until it is populated.
//!
//! Cancellation is structural: [`DiscoveryPoll`] owns the polling task and
//! aborts it on [`DiscoveryPoll::stop`] or on drop, so no caller has to
//! remember to clear a timer.

use crate::constants::{DISCOVERY_POLL_ATTEMPTS, DISCOVERY_POLL_INTERVAL_MS};
use crate::controlplane::RecordSetStore;
use crate::errors::ImportError;
use crate::metrics::DISCOVERY_POLLS_TOTAL;
use crate::resources::{DiscoveryPhase, ZoneDiscovery};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Polling budget for one discovery wait.
#[derive(Clone, Copy, Debug)]
pub struct PollSettings {
    /// Maximum number of fetch attempts.
    pub attempts: u32,
    /// Delay between attempts.
    pub interval: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            attempts: DISCOVERY_POLL_ATTEMPTS,
            interval: Duration::from_millis(DISCOVERY_POLL_INTERVAL_MS),
        }
    }
}

/// Fetch the `ZoneDiscovery` for `domain` until it is populated.
///
/// Terminal conditions:
/// - populated (`Ready` phase or any record set present): returns the discovery
/// - `Failed` phase: [`ImportError::DiscoveryFailed`] without burning the
///   remaining attempts
/// - budget exhausted: [`ImportError::DiscoveryTimeout`]
///
/// # Errors
///
/// Control-plane errors while fetching the resource abort the wait.
pub async fn await_zone_discovery<S: RecordSetStore + ?Sized>(
    store: &S,
    project: &str,
    domain: &str,
    settings: PollSettings,
) -> Result<ZoneDiscovery, ImportError> {
    for attempt in 1..=settings.attempts {
        let discovery = store.get_zone_discovery(project, domain).await?;

        match discovery {
            Some(discovery) if discovery.status.as_ref().is_some_and(|s| s.phase == DiscoveryPhase::Failed) => {
                let reason = discovery
                    .status
                    .and_then(|s| s.message)
                    .unwrap_or_else(|| "discovery job reported failure".to_string());
                DISCOVERY_POLLS_TOTAL.with_label_values(&["failed"]).inc();
                warn!(domain, attempt, %reason, "Zone discovery failed");
                return Err(ImportError::DiscoveryFailed {
                    domain: domain.to_string(),
                    reason,
                });
            }
            Some(discovery) if discovery.is_populated() => {
                DISCOVERY_POLLS_TOTAL.with_label_values(&["ready"]).inc();
                info!(
                    domain,
                    attempt,
                    record_sets = discovery
                        .status
                        .as_ref()
                        .map_or(0, |s| s.record_sets.len()),
                    "Zone discovery ready"
                );
                return Ok(discovery);
            }
            _ => {
                DISCOVERY_POLLS_TOTAL.with_label_values(&["pending"]).inc();
                debug!(domain, attempt, "Zone discovery not yet populated");
            }
        }

        if attempt < settings.attempts {
            tokio::time::sleep(settings.interval).await;
        }
    }

    DISCOVERY_POLLS_TOTAL.with_label_values(&["timeout"]).inc();
    Err(ImportError::DiscoveryTimeout {
        domain: domain.to_string(),
        attempts: settings.attempts,
    })
}

/// Handle to an in-flight discovery wait.
///
/// The task is aborted when [`stop`](Self::stop) is called or the handle is
/// dropped without being joined.
pub struct DiscoveryPoll {
    domain: String,
    handle: JoinHandle<Result<ZoneDiscovery, ImportError>>,
}

impl DiscoveryPoll {
    /// Spawn the polling task for `domain`.
    #[must_use]
    pub fn spawn(
        store: Arc<dyn RecordSetStore>,
        project: String,
        domain: String,
        settings: PollSettings,
    ) -> Self {
        let task_domain = domain.clone();
        let handle = tokio::spawn(async move {
            await_zone_discovery(store.as_ref(), &project, &task_domain, settings).await
        });
        Self { domain, handle }
    }

    /// Abort the polling task. Idempotent; joining afterwards reports
    /// cancellation.
    pub fn stop(&self) {
        self.handle.abort();
    }

    /// Wait for the poll to finish.
    ///
    /// # Errors
    ///
    /// Propagates the polling result, or [`ImportError::DiscoveryCancelled`]
    /// if [`stop`](Self::stop) won the race.
    pub async fn join(mut self) -> Result<ZoneDiscovery, ImportError> {
        match (&mut self.handle).await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(ImportError::DiscoveryCancelled {
                domain: self.domain.clone(),
            }),
            Err(e) => Err(ImportError::DiscoveryFailed {
                domain: self.domain.clone(),
                reason: format!("poll task failed: {e}"),
            }),
        }
    }
}

impl Drop for DiscoveryPoll {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod discovery_tests;
