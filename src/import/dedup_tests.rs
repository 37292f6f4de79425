#[cfg(test)]
mod tests {
    use crate::import::dedup::dedup_records;
    use crate::records::{AValue, CnameValue, ParsedRecord, RecordData};

    fn a(name: &str, addr: &str, ttl: Option<u32>) -> ParsedRecord {
        ParsedRecord {
            name: name.to_string(),
            ttl,
            data: RecordData::A(AValue {
                address: addr.parse().unwrap(),
            }),
        }
    }

    #[test]
    fn test_empty_batch() {
        let outcome = dedup_records(vec![]);
        assert!(outcome.unique.is_empty());
        assert_eq!(outcome.removed(), 0);
    }

    #[test]
    fn test_exact_duplicates_removed_first_wins() {
        let outcome = dedup_records(vec![
            a("www", "192.0.2.1", Some(300)),
            a("www", "192.0.2.1", Some(300)),
            a("www", "192.0.2.2", Some(300)),
        ]);
        assert_eq!(outcome.unique.len(), 2);
        assert_eq!(outcome.removed(), 1);
        assert_eq!(outcome.unique[0].data.value(), "192.0.2.1");
        assert_eq!(outcome.unique[1].data.value(), "192.0.2.2");
    }

    #[test]
    fn test_trailing_dot_names_are_duplicates() {
        let outcome = dedup_records(vec![
            a("www.example.com.", "192.0.2.1", None),
            a("www.example.com", "192.0.2.1", None),
        ]);
        assert_eq!(outcome.unique.len(), 1);
        assert_eq!(outcome.removed(), 1);
        // The removed occurrence is preserved for reporting
        assert_eq!(outcome.duplicates[0].name, "www.example.com");
    }

    #[test]
    fn test_differing_ttl_is_not_a_duplicate() {
        let outcome = dedup_records(vec![
            a("www", "192.0.2.1", Some(300)),
            a("www", "192.0.2.1", Some(600)),
        ]);
        assert_eq!(outcome.unique.len(), 2);
        assert_eq!(outcome.removed(), 0);
    }

    #[test]
    fn test_same_name_different_type_is_not_a_duplicate() {
        let outcome = dedup_records(vec![
            a("www", "192.0.2.1", None),
            ParsedRecord {
                name: "www".to_string(),
                ttl: None,
                data: RecordData::CNAME(CnameValue {
                    target: "192.0.2.1".to_string(),
                }),
            },
        ]);
        assert_eq!(outcome.unique.len(), 2);
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let outcome = dedup_records(vec![
            a("www", "192.0.2.1", Some(300)),
            a("www", "192.0.2.1", Some(300)),
            a("mail", "192.0.2.9", None),
        ]);
        let again = dedup_records(outcome.unique.clone());
        assert_eq!(again.unique, outcome.unique);
        assert_eq!(again.removed(), 0);
    }
}
