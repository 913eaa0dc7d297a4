use super::common::*;
use crate::scoring::domain::{event_tags, EventNote, EventParams};

#[test]
fn capital_contribution_uses_log_formula() {
    let engine = engine();
    let outcome = engine.event_delta(
        event_tags::CONTRIB_CAPITAL_VERIFIED,
        &EventParams::Capital { amount_million: 100.0 },
    );

    // round(2 * ln(101)) = round(9.228) = 9
    assert_eq!(outcome.delta, 9.0);
    let note = EventNote::parse(outcome.note.as_deref()).expect("capital note recorded");
    assert_eq!(note.amount_million, Some(100.0));
}

#[test]
fn capital_contribution_floors_negative_amounts() {
    let engine = engine();
    let outcome = engine.event_delta(
        event_tags::CONTRIB_CAPITAL_VERIFIED,
        &EventParams::Capital { amount_million: -5.0 },
    );

    assert_eq!(outcome.delta, 0.0);
}

#[test]
fn labor_contribution_multiplies_hours_rate_and_role() {
    let engine = engine();
    let outcome = engine.event_delta(
        event_tags::CONTRIB_LABOR_VERIFIED,
        &EventParams::Labor {
            hours: 10.0,
            role: Some("lead".to_string()),
        },
    );

    assert_eq!(outcome.delta, 15.0);
    let note = EventNote::parse(outcome.note.as_deref()).expect("labor note recorded");
    assert_eq!(note.hours, Some(10.0));
    assert_eq!(note.role.as_deref(), Some("lead"));
    assert_eq!(note.multiplier, Some(1.5));
}

#[test]
fn labor_contribution_defaults_unknown_roles_to_unity() {
    let engine = engine();
    let outcome = engine.event_delta(
        event_tags::CONTRIB_LABOR_VERIFIED,
        &EventParams::Labor {
            hours: 6.0,
            role: Some("stranger".to_string()),
        },
    );

    assert_eq!(outcome.delta, 6.0);
}

#[test]
fn labor_contribution_coerces_malformed_hours_to_zero() {
    let engine = engine();
    let outcome = engine.event_delta(
        event_tags::CONTRIB_LABOR_VERIFIED,
        &EventParams::Labor {
            hours: f64::NAN,
            role: None,
        },
    );

    assert_eq!(outcome.delta, 0.0);
}

#[test]
fn ontime_commitment_applies_difficulty_bonus() {
    let engine = engine();
    let outcome = engine.event_delta(
        event_tags::COMMITMENT_DONE_ONTIME,
        &EventParams::OnTimeCommitment { difficulty: 3.0 },
    );

    // round(15 * (1 + 0.1 * 2)) = 18
    assert_eq!(outcome.delta, 18.0);
}

#[test]
fn ontime_commitment_clamps_difficulty() {
    let engine = engine();
    let low = engine.event_delta(
        event_tags::COMMITMENT_DONE_ONTIME,
        &EventParams::OnTimeCommitment { difficulty: -2.0 },
    );
    let high = engine.event_delta(
        event_tags::COMMITMENT_DONE_ONTIME,
        &EventParams::OnTimeCommitment { difficulty: 50.0 },
    );

    assert_eq!(low.delta, 15.0);
    // round(15 * (1 + 0.1 * 4)) = 21
    assert_eq!(high.delta, 21.0);
}

#[test]
fn late_commitment_uses_tiered_lookup() {
    let engine = engine();
    let outcome = engine.event_delta(
        event_tags::COMMITMENT_DONE_LATE,
        &EventParams::LateCommitment { late_days: 5 },
    );

    assert_eq!(outcome.delta, 4.0);
    let note = EventNote::parse(outcome.note.as_deref()).expect("late note recorded");
    assert_eq!(note.late_days, Some(5));
}

#[test]
fn late_commitment_defaults_to_one_point_outside_tiers() {
    let engine = engine();
    let outcome = engine.event_delta(
        event_tags::COMMITMENT_DONE_LATE,
        &EventParams::LateCommitment { late_days: 0 },
    );

    assert_eq!(outcome.delta, 1.0);
}

#[test]
fn value_contribution_clamps_into_configured_bounds() {
    let engine = engine();
    let defaulted = engine.event_delta(
        event_tags::CONTRIB_KNOWLEDGE_VERIFIED,
        &EventParams::Value { value: None },
    );
    let oversized = engine.event_delta(
        event_tags::CONTRIB_KNOWLEDGE_VERIFIED,
        &EventParams::Value { value: Some(500.0) },
    );

    assert_eq!(defaulted.delta, 5.0);
    assert_eq!(oversized.delta, 20.0);
}

#[test]
fn unknown_event_type_yields_zero() {
    let engine = engine();
    let outcome = engine.event_delta("unheard_of_event", &EventParams::None);

    assert_eq!(outcome.delta, 0.0);
    assert!(outcome.note.is_none());
}

#[test]
fn fixed_events_use_configured_delta() {
    let engine = engine();
    let outcome = engine.event_delta(event_tags::COMMITMENT_FAILED, &EventParams::None);

    assert_eq!(outcome.delta, -20.0);
}
