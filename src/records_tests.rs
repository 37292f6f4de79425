#[cfg(test)]
mod tests {
    use crate::records::*;

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
    fn test_record_type_roundtrip() {
        for rt in [
            RecordType::A,
            RecordType::AAAA,
            RecordType::CNAME,
            RecordType::ALIAS,
            RecordType::MX,
            RecordType::TXT,
            RecordType::NS,
            RecordType::SOA,
            RecordType::SRV,
            RecordType::CAA,
        ] {
            assert_eq!(rt.as_str().parse::<RecordType>().unwrap(), rt);
        }
    }

    #[test]
    fn test_record_type_parse_is_case_insensitive() {
        assert_eq!("cname".parse::<RecordType>().unwrap(), RecordType::CNAME);
        assert_eq!("aaaa".parse::<RecordType>().unwrap(), RecordType::AAAA);
    }

    #[test]
    fn test_record_type_parse_unknown() {
        let err = "NAPTR".parse::<RecordType>().unwrap_err();
        assert_eq!(err.token, "NAPTR");
        assert!(err.to_string().contains("NAPTR"));
    }

    #[test]
    fn test_soa_is_not_importable() {
        assert!(!RecordType::SOA.is_importable());
        assert!(RecordType::NS.is_importable());
        assert!(RecordType::ALIAS.is_importable());
    }

    #[test]
    fn test_normalize_name_strips_one_trailing_dot() {
        assert_eq!(normalize_name("example.com."), "example.com");
        assert_eq!(normalize_name("example.com"), "example.com");
        assert_eq!(normalize_name("Example.COM."), "example.com");
        // Only one dot is stripped
        assert_eq!(normalize_name("example.com.."), "example.com.");
        assert_eq!(normalize_name("@"), "@");
        assert_eq!(normalize_name(""), "");
    }

    #[test]
    fn test_dedup_key_ignores_trailing_dot_and_case() {
        let left = a("www.example.com.", "192.0.2.1", Some(300));
        let right = a("WWW.example.com", "192.0.2.1", Some(300));
        assert_eq!(left.dedup_key(), right.dedup_key());
    }

    #[test]
    fn test_dedup_key_distinguishes_ttl() {
        let left = a("www", "192.0.2.1", Some(300));
        let right = a("www", "192.0.2.1", Some(600));
        let unset = a("www", "192.0.2.1", None);
        assert_ne!(left.dedup_key(), right.dedup_key());
        assert_ne!(left.dedup_key(), unset.dedup_key());
    }

    #[test]
    fn test_mx_normalized_value_folds_target() {
        let mx = RecordData::MX(MxValue {
            priority: 10,
            mail_server: "Mail.Example.COM.".to_string(),
        });
        assert_eq!(mx.normalized_value(), "10 mail.example.com");
        assert_eq!(mx.value(), "10 Mail.Example.COM.");
    }

    #[test]
    fn test_txt_value_rendering_quotes_strings() {
        let txt = RecordData::TXT(TxtValue {
            text: vec!["v=spf1".to_string(), "-all".to_string()],
        });
        assert_eq!(txt.value(), "\"v=spf1\" \"-all\"");
    }

    #[test]
    fn test_record_data_serializes_internally_tagged() {
        let mx = ParsedRecord {
            name: "@".to_string(),
            ttl: Some(3600),
            data: RecordData::MX(MxValue {
                priority: 10,
                mail_server: "mail.example.com.".to_string(),
            }),
        };
        let json = serde_json::to_value(&mx).unwrap();
        assert_eq!(json["type"], "MX");
        assert_eq!(json["priority"], 10);
        assert_eq!(json["mailServer"], "mail.example.com.");
        assert_eq!(json["name"], "@");

        let back: ParsedRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, mx);
    }

    #[test]
    fn test_record_data_deserializes_a_record() {
        let json = serde_json::json!({
            "name": "www",
            "ttl": 120,
            "type": "A",
            "address": "192.0.2.7"
        });
        let record: ParsedRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.record_type(), RecordType::A);
        assert_eq!(record.data.value(), "192.0.2.7");
    }

    #[test]
    fn test_unsupported_records_dedupes_type_tokens() {
        let mut unsupported = UnsupportedRecords::default();
        assert!(unsupported.is_empty());

        unsupported.push("NAPTR");
        unsupported.push("PTR");
        unsupported.push("NAPTR");

        assert_eq!(unsupported.types, vec!["NAPTR", "PTR"]);
        assert_eq!(unsupported.total_records, 3);
        assert!(!unsupported.is_empty());
    }
}
