use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::scoring::domain::{EventActor, MemberId, TrustEvent};
use crate::scoring::TrustEngine;

pub(super) fn engine() -> TrustEngine {
    TrustEngine::standard()
}

pub(super) fn member() -> MemberId {
    MemberId("m-42".to_string())
}

/// Fixed evaluation instant so every windowed assertion is reproducible.
pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).expect("valid instant")
}

pub(super) fn event(id: &str, event_type: &str, delta: f64, days_ago: i64) -> TrustEvent {
    TrustEvent {
        id: id.to_string(),
        member_id: member(),
        project_id: None,
        event_type: event_type.to_string(),
        delta,
        ref_id: None,
        note: None,
        created_at: now() - Duration::days(days_ago),
        recorded_by: EventActor::System,
    }
}

pub(super) fn event_with_note(
    id: &str,
    event_type: &str,
    delta: f64,
    days_ago: i64,
    note: &str,
) -> TrustEvent {
    TrustEvent {
        note: Some(note.to_string()),
        ..event(id, event_type, delta, days_ago)
    }
}
