#[cfg(test)]
mod tests {
    use crate::discovery::{await_zone_discovery, DiscoveryPoll, PollSettings};
    use crate::errors::ImportError;
    use crate::records::{AValue, ParsedRecord, RecordData, RecordType};
    use crate::resources::{
        DiscoveryPhase, RecordSet, ZoneDiscovery, ZoneDiscoverySpec, ZoneDiscoveryStatus,
    };
    use crate::test_support::MemoryStore;
    use std::sync::Arc;
    use std::time::Duration;

    fn fast() -> PollSettings {
        PollSettings {
            attempts: 3,
            interval: Duration::from_millis(1),
        }
    }

    fn pending() -> ZoneDiscovery {
        ZoneDiscovery {
            spec: ZoneDiscoverySpec {
                domain: "example.com".to_string(),
            },
            status: Some(ZoneDiscoveryStatus::default()),
            ..ZoneDiscovery::default()
        }
    }

    fn ready() -> ZoneDiscovery {
        ZoneDiscovery {
            spec: ZoneDiscoverySpec {
                domain: "example.com".to_string(),
            },
            status: Some(ZoneDiscoveryStatus {
                phase: DiscoveryPhase::Ready,
                record_sets: vec![RecordSet::new(
                    "example-com",
                    RecordType::A,
                    vec![ParsedRecord {
                        name: "www".to_string(),
                        ttl: None,
                        data: RecordData::A(AValue {
                            address: "192.0.2.1".parse().unwrap(),
                        }),
                    }],
                )],
                ..ZoneDiscoveryStatus::default()
            }),
            ..ZoneDiscovery::default()
        }
    }

    fn failed() -> ZoneDiscovery {
        ZoneDiscovery {
            spec: ZoneDiscoverySpec {
                domain: "example.com".to_string(),
            },
            status: Some(ZoneDiscoveryStatus {
                phase: DiscoveryPhase::Failed,
                message: Some("provider refused zone transfer".to_string()),
                ..ZoneDiscoveryStatus::default()
            }),
            ..ZoneDiscovery::default()
        }
    }

    #[tokio::test]
    async fn test_ready_on_first_attempt() {
        let store = MemoryStore::new();
        store.discoveries.lock().unwrap().push_back(Some(ready()));

        let discovery = await_zone_discovery(&store, "proj-1", "example.com", fast())
            .await
            .unwrap();
        assert!(discovery.is_populated());
        assert_eq!(store.ops_snapshot(), vec!["discovery"]);
    }

    #[tokio::test]
    async fn test_pending_then_ready() {
        let store = MemoryStore::new();
        {
            let mut queue = store.discoveries.lock().unwrap();
            queue.push_back(None);
            queue.push_back(Some(pending()));
            queue.push_back(Some(ready()));
        }

        let discovery = await_zone_discovery(&store, "proj-1", "example.com", fast())
            .await
            .unwrap();
        assert!(discovery.is_populated());
        assert_eq!(store.ops_snapshot().len(), 3);
    }

    #[tokio::test]
    async fn test_timeout_after_budget() {
        let store = MemoryStore::new();
        store.discoveries.lock().unwrap().push_back(Some(pending()));

        let err = await_zone_discovery(&store, "proj-1", "example.com", fast())
            .await
            .unwrap_err();
        match err {
            ImportError::DiscoveryTimeout { domain, attempts } => {
                assert_eq!(domain, "example.com");
                assert_eq!(attempts, 3);
            }
            other => panic!("expected DiscoveryTimeout, got {other}"),
        }
        // Exactly the budgeted number of fetches
        assert_eq!(store.ops_snapshot().len(), 3);
    }

    #[tokio::test]
    async fn test_failed_phase_aborts_early() {
        let store = MemoryStore::new();
        {
            let mut queue = store.discoveries.lock().unwrap();
            queue.push_back(Some(failed()));
            queue.push_back(Some(ready()));
        }

        let err = await_zone_discovery(&store, "proj-1", "example.com", fast())
            .await
            .unwrap_err();
        match err {
            ImportError::DiscoveryFailed { reason, .. } => {
                assert!(reason.contains("provider refused"));
            }
            other => panic!("expected DiscoveryFailed, got {other}"),
        }
        // No second fetch after the terminal failure
        assert_eq!(store.ops_snapshot().len(), 1);
    }

    #[tokio::test]
    async fn test_poll_handle_join() {
        let store = Arc::new(MemoryStore::new());
        store.discoveries.lock().unwrap().push_back(Some(ready()));

        let poll = DiscoveryPoll::spawn(
            store.clone(),
            "proj-1".to_string(),
            "example.com".to_string(),
            fast(),
        );
        let discovery = poll.join().await.unwrap();
        assert!(discovery.is_populated());
    }

    #[tokio::test]
    async fn test_poll_handle_stop_cancels() {
        let store = Arc::new(MemoryStore::new());
        // Pending forever with a long interval: only cancellation ends it
        store.discoveries.lock().unwrap().push_back(Some(pending()));
        let settings = PollSettings {
            attempts: 100,
            interval: Duration::from_secs(60),
        };

        let poll = DiscoveryPoll::spawn(
            store.clone(),
            "proj-1".to_string(),
            "example.com".to_string(),
            settings,
        );
        poll.stop();

        match poll.join().await {
            Err(ImportError::DiscoveryCancelled { domain }) => {
                assert_eq!(domain, "example.com");
            }
            other => panic!("expected DiscoveryCancelled, got {other:?}"),
        }
    }
}
