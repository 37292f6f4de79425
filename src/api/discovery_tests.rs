#[cfg(test)]
mod tests {
    use crate::api::discovery::{handle_preview, DiscoveryQuery};
    use crate::api::AppState;
    use crate::discovery::PollSettings;
    use crate::records::{AValue, ParsedRecord, RecordData, RecordType};
    use crate::resources::{
        DiscoveryPhase, RecordSet, ZoneDiscovery, ZoneDiscoverySpec, ZoneDiscoveryStatus,
    };
    use crate::test_support::MemoryStore;
    use axum::extract::{Query, State};
    use axum::http::StatusCode;
    use axum::response::Response;
    use std::sync::Arc;
    use std::time::Duration;

    fn state_with(store: Arc<MemoryStore>) -> AppState {
        AppState {
            store,
            poll_settings: PollSettings {
                attempts: 2,
                interval: Duration::from_millis(1),
            },
        }
    }

    fn query() -> DiscoveryQuery {
        DiscoveryQuery {
            project_id: "proj-1".to_string(),
            domain: "example.com".to_string(),
        }
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn ready_discovery() -> ZoneDiscovery {
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
                        ttl: Some(300),
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

    #[tokio::test]
    async fn test_preview_ready_discovery() {
        let store = Arc::new(MemoryStore::new());
        store
            .discoveries
            .lock()
            .unwrap()
            .push_back(Some(ready_discovery()));

        let response = handle_preview(State(state_with(store)), Query(query())).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["domain"], "example.com");
        assert_eq!(body["recordSets"][0]["recordType"], "A");
        assert_eq!(body["recordSets"][0]["records"][0]["name"], "www");
    }

    #[tokio::test]
    async fn test_preview_pending_discovery_is_accepted() {
        let store = Arc::new(MemoryStore::new());
        // No discovery resource at all: every poll sees None
        let response = handle_preview(State(state_with(store.clone())), Query(query())).await;
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let body = body_json(response).await;
        assert_eq!(body["status"], "pending");
        // Budget respected
        assert_eq!(store.ops_snapshot().len(), 2);
    }

    #[tokio::test]
    async fn test_preview_failed_discovery_is_bad_gateway() {
        let store = Arc::new(MemoryStore::new());
        store.discoveries.lock().unwrap().push_back(Some(ZoneDiscovery {
            spec: ZoneDiscoverySpec {
                domain: "example.com".to_string(),
            },
            status: Some(ZoneDiscoveryStatus {
                phase: DiscoveryPhase::Failed,
                message: Some("provider unreachable".to_string()),
                ..ZoneDiscoveryStatus::default()
            }),
            ..ZoneDiscovery::default()
        }));

        let response = handle_preview(State(state_with(store)), Query(query())).await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
