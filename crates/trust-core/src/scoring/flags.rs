use chrono::{DateTime, Utc};

use crate::config::FlagRules;
use crate::scoring::domain::{event_tags, RiskFlag, TrustEvent, TrustSummary};
use crate::scoring::numeric::within_window;

/// Derive risk flags from a finished summary plus the raw events. Each
/// rule fires independently; flags accumulate.
///
/// The capital-dominance ratio and the doubled-threshold ring count are
/// deliberate proxies, kept for behavioral compatibility.
pub(crate) fn evaluate_flags(
    rules: &FlagRules,
    summary: &TrustSummary,
    events: &[TrustEvent],
    now: DateTime<Utc>,
) -> Vec<RiskFlag> {
    let mut flags = Vec::new();

    if summary.commitments_late_90d >= rules.max_late_90d {
        flags.push(RiskFlag::DelayPattern);
    }

    if summary.open_disputes >= rules.max_open_disputes {
        flags.push(RiskFlag::DisputeExposure);
    }

    let capital = summary.capital_million_90d;
    if capital > 0.0 {
        let dominance = capital / (capital + summary.labor_hours_90d + 1.0);
        if dominance >= rules.capital_dominance_ratio {
            flags.push(RiskFlag::CapitalDominance);
        }
    }

    let endorsements = events
        .iter()
        .filter(|event| event.event_type == event_tags::PEER_ENDORSEMENT)
        .filter(|event| within_window(event.created_at, now, rules.ring_window_days))
        .count() as u32;
    if endorsements >= rules.ring_threshold.saturating_mul(2) {
        flags.push(RiskFlag::RingBehavior);
    }

    flags
}
