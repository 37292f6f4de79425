#[cfg(test)]
mod tests {
    use crate::import::report::*;
    use crate::records::{AValue, ParsedRecord, RecordData, RecordType};

    #[test]
    fn test_import_options_defaults() {
        let options = ImportOptions::default();
        assert!(options.skip_duplicates);
        assert_eq!(options.merge_strategy, MergeStrategy::Append);

        // Missing fields in the wire form take the same defaults
        let parsed: ImportOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, options);
    }

    #[test]
    fn test_merge_strategy_wire_form_is_lowercase() {
        let parsed: ImportOptions =
            serde_json::from_str(r#"{"mergeStrategy": "replace", "skipDuplicates": false}"#)
                .unwrap();
        assert_eq!(parsed.merge_strategy, MergeStrategy::Replace);
        assert!(!parsed.skip_duplicates);
    }

    #[test]
    fn test_detail_row_from_record() {
        let record = ParsedRecord {
            name: "www".to_string(),
            ttl: Some(300),
            data: RecordData::A(AValue {
                address: "192.0.2.1".parse().unwrap(),
            }),
        };
        let detail = ImportRecordDetail::for_record(&record, ImportAction::Created);
        assert_eq!(detail.record_type, RecordType::A);
        assert_eq!(detail.name, "www");
        assert_eq!(detail.value, "192.0.2.1");
        assert_eq!(detail.ttl, Some(300));
        assert!(detail.message.is_none());

        let with_message = detail.with_message("duplicate of existing record");
        assert_eq!(
            with_message.message.as_deref(),
            Some("duplicate of existing record")
        );
    }

    #[test]
    fn test_summary_counting() {
        let mut summary = ImportSummary::default();
        summary.count(ImportAction::Created);
        summary.count(ImportAction::Created);
        summary.count(ImportAction::Skipped);
        summary.count(ImportAction::Failed);

        assert_eq!(summary.total_records, 4);
        assert_eq!(summary.created, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 1);
    }

    #[test]
    fn test_summary_absorb() {
        let mut left = ImportSummary {
            total_record_sets: 1,
            total_records: 2,
            created: 2,
            ..ImportSummary::default()
        };
        let right = ImportSummary {
            total_record_sets: 1,
            total_records: 3,
            updated: 1,
            failed: 2,
            ..ImportSummary::default()
        };
        left.absorb(right);
        assert_eq!(left.total_record_sets, 2);
        assert_eq!(left.total_records, 5);
        assert_eq!(left.created, 2);
        assert_eq!(left.updated, 1);
        assert_eq!(left.failed, 2);
    }

    #[test]
    fn test_http_status_all_success() {
        let summary = ImportSummary {
            total_records: 3,
            created: 3,
            ..ImportSummary::default()
        };
        assert_eq!(summary.http_status(), 200);
    }

    #[test]
    fn test_http_status_empty_import_is_success() {
        assert_eq!(ImportSummary::default().http_status(), 200);
    }

    #[test]
    fn test_http_status_partial_is_207() {
        let summary = ImportSummary {
            total_records: 3,
            created: 2,
            failed: 1,
            ..ImportSummary::default()
        };
        assert_eq!(summary.http_status(), 207);
    }

    #[test]
    fn test_http_status_skip_only_with_failures_is_207() {
        // Skipped rows are a designed outcome, so they count as success
        let summary = ImportSummary {
            total_records: 2,
            skipped: 1,
            failed: 1,
            ..ImportSummary::default()
        };
        assert_eq!(summary.http_status(), 207);
    }

    #[test]
    fn test_http_status_total_failure_is_400() {
        let summary = ImportSummary {
            total_records: 2,
            failed: 2,
            ..ImportSummary::default()
        };
        assert!(summary.is_total_failure());
        assert_eq!(summary.http_status(), 400);
    }

    #[test]
    fn test_outcome_push_keeps_summary_in_sync() {
        let record = ParsedRecord {
            name: "www".to_string(),
            ttl: None,
            data: RecordData::A(AValue {
                address: "192.0.2.1".parse().unwrap(),
            }),
        };
        let mut outcome = ImportOutcome::default();
        outcome.push(ImportRecordDetail::for_record(
            &record,
            ImportAction::Created,
        ));
        outcome.push(
            ImportRecordDetail::for_record(&record, ImportAction::Skipped)
                .with_message("duplicate"),
        );

        assert_eq!(outcome.details.len(), 2);
        assert_eq!(outcome.summary.total_records, 2);
        assert_eq!(outcome.summary.created, 1);
        assert_eq!(outcome.summary.skipped, 1);
    }
}
