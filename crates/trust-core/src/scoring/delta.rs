use serde::Serialize;

use crate::config::{EventRule, EventRuleKind, RulesConfig};
use crate::scoring::domain::{EventNote, EventParams};
use crate::scoring::numeric::{capital_points, clamp, tier_lookup};

/// Point delta plus the note the ingestion layer persists alongside the
/// event row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeltaOutcome {
    pub delta: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl DeltaOutcome {
    fn bare(delta: f64) -> Self {
        Self { delta, note: None }
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Convert a proposed event type plus typed parameters into `{delta,
/// note}`. Unknown event types yield delta 0; parameter/kind mismatches
/// fall back to the kind's defaults. Never fails.
pub(crate) fn event_delta(
    rules: &RulesConfig,
    event_type: &str,
    params: &EventParams,
) -> DeltaOutcome {
    let Some(rule) = rules.event_rule(event_type) else {
        return DeltaOutcome::bare(0.0);
    };

    match rule.kind {
        EventRuleKind::Capital => capital_delta(params),
        EventRuleKind::Labor => labor_delta(rule, params),
        EventRuleKind::CommitmentOnTime => ontime_delta(rule, params),
        EventRuleKind::CommitmentLate => late_delta(rule, params),
        EventRuleKind::Value => value_delta(rule, params),
        EventRuleKind::Base | EventRuleKind::Fixed => DeltaOutcome {
            delta: rule.delta,
            note: rule.note.clone(),
        },
    }
}

fn capital_delta(params: &EventParams) -> DeltaOutcome {
    let amount = match params {
        EventParams::Capital { amount_million } => finite_or_zero(*amount_million).max(0.0),
        _ => 0.0,
    };

    DeltaOutcome {
        delta: capital_points(amount).round(),
        note: EventNote {
            amount_million: Some(amount),
            ..EventNote::default()
        }
        .to_note(),
    }
}

fn labor_delta(rule: &EventRule, params: &EventParams) -> DeltaOutcome {
    let (hours, role) = match params {
        EventParams::Labor { hours, role } => (finite_or_zero(*hours).max(0.0), role.clone()),
        _ => (0.0, None),
    };

    let multiplier = role
        .as_deref()
        .and_then(|name| rule.role_multipliers.get(name).copied())
        .unwrap_or(1.0);

    DeltaOutcome {
        delta: (hours * rule.delta * multiplier).round(),
        note: EventNote {
            hours: Some(hours),
            role,
            multiplier: Some(multiplier),
            ..EventNote::default()
        }
        .to_note(),
    }
}

fn ontime_delta(rule: &EventRule, params: &EventParams) -> DeltaOutcome {
    let difficulty = match params {
        EventParams::OnTimeCommitment { difficulty } => {
            clamp(1.0, 5.0, finite_or_zero(*difficulty))
        }
        _ => 1.0,
    };

    DeltaOutcome {
        delta: (rule.delta * (1.0 + rule.step_bonus * (difficulty - 1.0))).round(),
        note: EventNote {
            difficulty: Some(difficulty),
            ..EventNote::default()
        }
        .to_note(),
    }
}

fn late_delta(rule: &EventRule, params: &EventParams) -> DeltaOutcome {
    let late_days = match params {
        EventParams::LateCommitment { late_days } => Some(*late_days),
        _ => None,
    };

    // One point when no tier matches.
    let delta = late_days
        .and_then(|days| tier_lookup(&rule.late_tiers, days))
        .unwrap_or(1.0);

    DeltaOutcome {
        delta,
        note: late_days
            .map(|days| EventNote {
                late_days: Some(days),
                ..EventNote::default()
            })
            .and_then(|note| note.to_note()),
    }
}

fn value_delta(rule: &EventRule, params: &EventParams) -> DeltaOutcome {
    let value = match params {
        EventParams::Value { value } => value.map(finite_or_zero).unwrap_or(rule.delta),
        _ => rule.delta,
    };

    let min = rule.min.unwrap_or(f64::NEG_INFINITY);
    let max = rule.max.unwrap_or(f64::INFINITY);

    DeltaOutcome {
        delta: clamp(min, max, value),
        note: rule.note.clone(),
    }
}
