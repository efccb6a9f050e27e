// Integration tests for the data model

#[cfg(test)]
mod tests {
    use crate::*;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    fn phase(id: &str, start: &str, end: &str, available: i64) -> PricePhase {
        PricePhase {
            id: id.to_string(),
            name: id.to_uppercase(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            total_slots: 100,
            available_slots: available,
            percent_multiplier: Some(100.0),
        }
    }

    #[test]
    fn test_ticket_type_from_feed_json() {
        let json = serde_json::json!({
            "id": "author-full",
            "name": "Author registration",
            "basePrice": 500000,
            "isAuthorTicket": true,
            "phases": [{
                "id": "early",
                "name": "Early bird",
                "startTime": "2025-01-01T00:00:00Z",
                "endTime": "2025-02-01T00:00:00Z",
                "totalSlots": 50,
                "availableSlots": 12,
                "percentMultiplier": 70
            }]
        });

        let ticket: TicketType = serde_json::from_value(json).unwrap();

        assert_eq!(ticket.base_price, Price::from_minor(500000));
        assert!(ticket.is_author_ticket);
        assert_eq!(ticket.phases.len(), 1);
        assert_eq!(ticket.phases[0].percent_multiplier, Some(70.0));
        assert_eq!(ticket.phases[0].available_slots, 12);
    }

    #[test]
    fn test_ticket_type_defaults() {
        let json = serde_json::json!({"id": "visitor", "name": "Visitor", "basePrice": 1000});
        let ticket: TicketType = serde_json::from_value(json).unwrap();

        assert!(!ticket.is_author_ticket);
        assert!(ticket.is_unconfigured());
    }

    #[test]
    fn test_phase_window_half_open() {
        let p = phase("a", "2025-01-01T00:00:00Z", "2025-01-02T00:00:00Z", 1);
        let window = p.window().unwrap();

        assert!(window.contains(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()));
        assert!(window.contains(Utc.with_ymd_and_hms(2025, 1, 1, 23, 59, 59).unwrap()));
        assert!(!window.contains(Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap()));
        assert!(window.is_future(Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_phase_window_errors() {
        let malformed = phase("bad", "yesterday", "2025-01-02T00:00:00Z", 1);
        assert!(matches!(malformed.window(), Err(EventGateError::MalformedTimestamp(_))));

        let inverted = phase("inv", "2025-01-02T00:00:00Z", "2025-01-01T00:00:00Z", 1);
        assert!(matches!(inverted.window(), Err(EventGateError::EmptyWindow(_))));

        let zero_len = phase("zero", "2025-01-01T00:00:00Z", "2025-01-01T00:00:00Z", 1);
        assert!(zero_len.window().is_err());
    }

    #[test]
    fn test_capacity_checks() {
        let mut p = phase("a", "2025-01-01T00:00:00Z", "2025-01-02T00:00:00Z", 0);
        assert!(!p.has_capacity());
        assert!(p.check_capacity().is_ok());

        p.available_slots = 150;
        assert!(p.has_capacity());
        assert!(matches!(
            p.check_capacity(),
            Err(EventGateError::InconsistentCapacity { available: 150, total: 100, .. })
        ));

        p.available_slots = -3;
        assert!(!p.has_capacity());
        assert!(p.check_capacity().is_err());
    }

    #[test]
    fn test_stage_record_from_feed_json() {
        let json = serde_json::json!([
            {"stage": "ABSTRACT", "status": "ACCEPTED"},
            {"stage": "FULL_PAPER", "status": "REVISE", "deadline": "2025-05-01T00:00:00Z"},
            {"stage": "REVISION", "status": null},
            {"stage": "CAMERA_READY"},
            {"stage": "PAYMENT", "paymentReference": "PAY-1"}
        ]);

        let records: Vec<StageRecord> = serde_json::from_value(json).unwrap();

        assert_eq!(records.len(), 5);
        assert!(records[0].status_is(StageStatus::Accepted));
        assert!(records[1].status_is(StageStatus::Revise));
        assert_eq!(records[2].status, None);
        assert_eq!(records[3].status, None);
        assert!(records[4].has_payment_reference());
    }

    #[test]
    fn test_stage_aliases() {
        let stage: WorkflowStage = serde_json::from_str("\"CameraReady\"").unwrap();
        assert_eq!(stage, WorkflowStage::CameraReady);

        let status: StageStatus = serde_json::from_str("\"Rejected\"").unwrap();
        assert_eq!(status, StageStatus::Rejected);
    }

    #[test]
    fn test_blank_payment_reference_ignored() {
        let record = StageRecord::new(WorkflowStage::Payment, None).with_payment_reference("   ");
        assert!(!record.has_payment_reference());
    }

    #[test]
    fn test_deadline_parsing() {
        let none = StageRecord::undecided(WorkflowStage::Payment);
        assert!(none.parsed_deadline().is_none());

        let good = none.clone().with_deadline("2025-06-01T00:00:00Z");
        assert!(matches!(good.parsed_deadline(), Some(Ok(_))));

        let bad = none.with_deadline("June");
        assert!(matches!(bad.parsed_deadline(), Some(Err(_))));
    }

    #[test]
    fn test_stage_indices_unique() {
        let stages = WorkflowStage::all();
        assert_eq!(stages.len(), WorkflowStage::COUNT);

        for stage in stages {
            assert_eq!(WorkflowStage::from_index(stage.index()), Some(*stage));
        }
        assert_eq!(WorkflowStage::from_index(5), None);
    }

    #[test]
    fn test_resolved_state_queries() {
        let mut state = ResolvedWorkflowState {
            max_allowed_stage: 3,
            ..Default::default()
        };
        state.hidden.insert(2);
        state.failed.insert(3);

        assert!(state.is_reachable(1));
        assert!(!state.is_reachable(2));
        assert!(state.is_reachable(3));
        assert!(!state.is_reachable(4));
        assert_eq!(state.first_failed(), Some(3));
    }

    proptest! {
        #[test]
        fn prop_parse_never_panics(raw in ".*") {
            let _ = parse_timestamp(&raw);
        }

        #[test]
        fn prop_window_roundtrip(start in 0i64..2_000_000_000, len in 1i64..10_000_000) {
            let s = Utc.timestamp_opt(start, 0).unwrap();
            let e = Utc.timestamp_opt(start + len, 0).unwrap();
            let p = phase("p", &s.to_rfc3339(), &e.to_rfc3339(), 1);

            let window = p.window().unwrap();
            prop_assert_eq!(window.start, s);
            prop_assert_eq!(window.end, e);
        }
    }
}
