use chrono::{DateTime, Utc};

use crate::config::IntegrityRules;
use crate::scoring::domain::{event_tags, is_integrity_tag, TrustEvent};
use crate::scoring::numeric::{clamp, within_window};

const WINDOW_DAYS: i64 = 365;

/// Integrity outcome: the score plus the dispute standing the summary,
/// flag evaluator, and level classifier consume.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct IntegrityOutcome {
    pub score: u32,
    pub open_disputes: u32,
    pub last_major_dispute_at: Option<DateTime<Utc>>,
}

/// Score conduct over the trailing 365 days: start at the configured
/// maximum and erode by every dispute-prefixed and confirmed-violation
/// delta. Dispute standing is tracked over the full history, since an
/// unresolved dispute stays open no matter how old it is.
pub(crate) fn integrity_score(
    rules: &IntegrityRules,
    events: &[TrustEvent],
    now: DateTime<Utc>,
) -> IntegrityOutcome {
    let mut value = rules.max;
    let mut opened = 0u32;
    let mut settled = 0u32;
    let mut last_major_dispute_at: Option<DateTime<Utc>> = None;

    for event in events {
        if event.created_at > now {
            continue;
        }

        if is_integrity_tag(&event.event_type)
            && within_window(event.created_at, now, WINDOW_DAYS)
        {
            value += event.delta;
        }

        match event.event_type.as_str() {
            event_tags::DISPUTE_OPENED_AGAINST => opened += 1,
            event_tags::DISPUTE_RESOLVED_AGAINST | event_tags::DISPUTE_WITHDRAWN => settled += 1,
            event_tags::DISPUTE_RESOLVED_MAJOR => {
                settled += 1;
                last_major_dispute_at = match last_major_dispute_at {
                    Some(at) if at >= event.created_at => Some(at),
                    _ => Some(event.created_at),
                };
            }
            _ => {}
        }
    }

    IntegrityOutcome {
        score: clamp(0.0, rules.max, value).round() as u32,
        open_disputes: opened.saturating_sub(settled),
        last_major_dispute_at,
    }
}
