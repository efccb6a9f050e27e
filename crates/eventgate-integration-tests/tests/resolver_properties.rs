// End-to-end checks of the resolver contracts on feed-shaped JSON

use chrono::{Duration, TimeZone, Utc};
use eventgate_clock::{ClockSource, MockClock};
use eventgate_pricing::{
    compute_price, effective_price, has_discount, is_waitlist_eligible, resolve_phase,
    PhaseWindowResolver,
};
use eventgate_types::{Price, PricePhase, StageRecord, TicketType, Timestamp, WorkflowStage};
use eventgate_workflow::{resolve_workflow, StageCursor};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn now() -> Timestamp {
    Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap()
}

fn stages(json: serde_json::Value) -> Vec<StageRecord> {
    serde_json::from_value(json).unwrap()
}

#[test]
fn test_compute_price_contract() {
    assert_eq!(compute_price(Price::from_minor(1000), Some(80.0)), Price::from_minor(800));
    assert_eq!(compute_price(Price::from_minor(1000), Some(120.0)), Price::from_minor(1200));
    assert_eq!(compute_price(Price::from_minor(1000), Some(100.0)), Price::from_minor(1000));

    assert_eq!(effective_price(Price::from_minor(500000), 70.0), Price::from_minor(350000));
    assert!(has_discount(Price::from_minor(500000), Some(70.0)));
}

#[test]
fn test_full_paper_rejected_contract() {
    let records = stages(serde_json::json!([
        {"stage": "ABSTRACT", "status": "ACCEPTED"},
        {"stage": "FULL_PAPER", "status": "REJECTED"},
        {"stage": "REVISION", "status": null},
        {"stage": "CAMERA_READY", "status": null},
        {"stage": "PAYMENT", "status": null}
    ]));

    let state = resolve_workflow(&records, now());

    assert_eq!(state.failed, BTreeSet::from([1]));
    assert_eq!(state.max_allowed_stage, 1);
    for index in 2..5 {
        assert!(!state.is_reachable(index));
    }

    let mut cursor = StageCursor::initial(&state);
    assert_eq!(cursor.select(4, &state), 1);
}

#[test]
fn test_accepted_and_paid_contract() {
    let records = stages(serde_json::json!([
        {"stage": "ABSTRACT", "status": "ACCEPTED"},
        {"stage": "FULL_PAPER", "status": "ACCEPTED"},
        {"stage": "REVISION", "status": null},
        {"stage": "CAMERA_READY", "status": "ACCEPTED"},
        {"stage": "PAYMENT", "status": null, "paymentReference": "INV-7781"}
    ]));

    let state = resolve_workflow(&records, now());

    assert!(state.hidden.contains(&WorkflowStage::Revision.index()));
    assert_eq!(state.completed, BTreeSet::from([0, 1, 3, 4]));
    assert_eq!(state.max_allowed_stage, 4);
}

#[test]
fn test_waitlist_contract() {
    let catalog: Vec<TicketType> = serde_json::from_value(serde_json::json!([
        {
            "id": "author-regular",
            "name": "Author",
            "basePrice": 500000,
            "isAuthorTicket": true,
            "phases": [
                {"id": "past", "startTime": "2025-01-01T00:00:00Z", "endTime": "2025-02-01T00:00:00Z", "totalSlots": 50, "availableSlots": 0, "percentMultiplier": 70},
                {"id": "future", "startTime": "2025-04-01T00:00:00Z", "endTime": "2025-05-01T00:00:00Z", "totalSlots": 50, "availableSlots": 0, "percentMultiplier": 100}
            ]
        },
        {
            "id": "author-student",
            "name": "Student author",
            "basePrice": 250000,
            "isAuthorTicket": true,
            "phases": [
                {"id": "only", "startTime": "2025-03-01T00:00:00Z", "endTime": "2025-04-01T00:00:00Z", "totalSlots": 10, "availableSlots": 0}
            ]
        },
        {
            "id": "visitor",
            "name": "Visitor",
            "basePrice": 100000,
            "phases": [
                {"id": "open", "startTime": "2025-01-01T00:00:00Z", "endTime": "2025-06-01T00:00:00Z", "totalSlots": 500, "availableSlots": 480}
            ]
        }
    ]))
    .unwrap();

    assert!(is_waitlist_eligible(&catalog, now()));
    for ticket in catalog.iter().filter(|t| t.is_author_ticket) {
        assert!(resolve_phase(now(), &ticket.phases).is_exhausted);
    }
}

#[test]
fn test_exhaustion_stays_under_time_travel() {
    let phases: Vec<PricePhase> = serde_json::from_value(serde_json::json!([
        {"id": "a", "startTime": "2025-03-01T00:00:00Z", "endTime": "2025-03-10T00:00:00Z", "totalSlots": 5, "availableSlots": 0},
        {"id": "b", "startTime": "2025-03-20T00:00:00Z", "endTime": "2025-03-30T00:00:00Z", "totalSlots": 5, "availableSlots": 0}
    ]))
    .unwrap();
    let resolver = PhaseWindowResolver::new(&phases);
    let clock = MockClock::new(now());

    for _ in 0..60 {
        assert!(resolver.is_exhausted(clock.now()));
        clock.advance(Duration::hours(12));
    }
}

fn arb_phase_rows() -> impl Strategy<Value = Vec<(i64, i64, i64, bool)>> {
    prop::collection::vec((0i64..500, 1i64..120, -1i64..3, any::<bool>()), 0..10)
}

fn build_phases(rows: &[(i64, i64, i64, bool)]) -> Vec<PricePhase> {
    let origin = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    rows.iter()
        .enumerate()
        .map(|(i, (start, len, slots, malformed))| PricePhase {
            id: format!("p{}", i),
            name: String::new(),
            start_time: if *malformed {
                "not-a-time".to_string()
            } else {
                (origin + Duration::hours(*start)).to_rfc3339()
            },
            end_time: (origin + Duration::hours(start + len)).to_rfc3339(),
            total_slots: 2,
            available_slots: *slots,
            percent_multiplier: None,
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_current_phase_window_and_capacity(rows in arb_phase_rows(), hour in -24i64..700) {
        let phases = build_phases(&rows);
        let t = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + Duration::hours(hour);
        let info = resolve_phase(t, &phases);

        if let Some(current) = info.current_phase {
            let window = current.window().unwrap();
            prop_assert!(window.start <= t && t < window.end);
            prop_assert!(current.available_slots > 0);
        }
        if phases.is_empty() {
            prop_assert!(!info.is_exhausted);
        }
    }

    #[test]
    fn prop_exhaustion_monotonic(rows in arb_phase_rows(), hour in -24i64..700, step in 1i64..1_000) {
        let phases = build_phases(&rows);
        let origin = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let t = origin + Duration::hours(hour);

        if resolve_phase(t, &phases).is_exhausted {
            prop_assert!(resolve_phase(t + Duration::hours(step), &phases).is_exhausted);
        }
    }
}
