#[cfg(test)]
mod tests {
    use crate::records::{AValue, ParsedRecord, RecordData, RecordType};
    use crate::resources::*;

    fn www_a() -> ParsedRecord {
        ParsedRecord {
            name: "www".to_string(),
            ttl: Some(300),
            data: RecordData::A(AValue {
                address: "192.0.2.1".parse().unwrap(),
            }),
        }
    }

    #[test]
    fn test_new_record_set_is_unnamed() {
        let set = RecordSet::new("example-com", RecordType::A, vec![www_a()]);
        assert!(set.name().is_none());
        assert_eq!(set.spec.dns_zone_ref.name, "example-com");
        assert_eq!(set.spec.record_type, RecordType::A);
        assert_eq!(set.spec.records.len(), 1);
    }

    #[test]
    fn test_record_set_round_trips_camel_case() {
        let mut set = RecordSet::new("example-com", RecordType::A, vec![www_a()]);
        set.metadata.name = Some("example-com-a".to_string());
        set.metadata.resource_version = Some("42".to_string());

        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["metadata"]["name"], "example-com-a");
        assert_eq!(json["metadata"]["resourceVersion"], "42");
        assert_eq!(json["spec"]["dnsZoneRef"]["name"], "example-com");
        assert_eq!(json["spec"]["recordType"], "A");

        let back: RecordSet = serde_json::from_value(json).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn test_record_set_list_defaults_to_empty() {
        let list: RecordSetList = serde_json::from_str("{}").unwrap();
        assert!(list.items.is_empty());
    }

    #[test]
    fn test_discovery_without_status_is_not_populated() {
        let discovery = ZoneDiscovery {
            spec: ZoneDiscoverySpec {
                domain: "example.com".to_string(),
            },
            ..ZoneDiscovery::default()
        };
        assert!(!discovery.is_populated());
    }

    #[test]
    fn test_discovery_ready_phase_is_populated() {
        let discovery = ZoneDiscovery {
            spec: ZoneDiscoverySpec {
                domain: "example.com".to_string(),
            },
            status: Some(ZoneDiscoveryStatus {
                phase: DiscoveryPhase::Ready,
                ..ZoneDiscoveryStatus::default()
            }),
            ..ZoneDiscovery::default()
        };
        assert!(discovery.is_populated());
    }

    #[test]
    fn test_discovery_with_record_sets_is_populated_even_if_pending() {
        let discovery = ZoneDiscovery {
            spec: ZoneDiscoverySpec {
                domain: "example.com".to_string(),
            },
            status: Some(ZoneDiscoveryStatus {
                phase: DiscoveryPhase::Pending,
                record_sets: vec![RecordSet::new("example-com", RecordType::A, vec![www_a()])],
                ..ZoneDiscoveryStatus::default()
            }),
            ..ZoneDiscovery::default()
        };
        assert!(discovery.is_populated());
    }
}
