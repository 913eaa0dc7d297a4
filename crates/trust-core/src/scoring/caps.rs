use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::config::MonthlyCaps;
use crate::scoring::numeric::month_start;

/// Transient per-admission-sequence accounting of how much of each
/// monthly ceiling is already consumed. Scoped to one UTC calendar month;
/// crossing a month boundary resets it. Never shared across members.
#[derive(Debug, Clone)]
pub struct CapsState {
    month_start: DateTime<Utc>,
    components: BTreeMap<String, f64>,
    buckets: BTreeMap<String, f64>,
    overall: f64,
}

impl CapsState {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self {
            month_start: month_start(at),
            components: BTreeMap::new(),
            buckets: BTreeMap::new(),
            overall: 0.0,
        }
    }

    pub fn month_start(&self) -> DateTime<Utc> {
        self.month_start
    }

    fn roll_over(&mut self, at: DateTime<Utc>) {
        let start = month_start(at);
        if start != self.month_start {
            *self = CapsState::new(at);
        }
    }

    fn consumed_component(&self, component: &str) -> f64 {
        self.components.get(component).copied().unwrap_or(0.0)
    }

    fn consumed_bucket(&self, bucket: &str) -> f64 {
        self.buckets.get(bucket).copied().unwrap_or(0.0)
    }
}

/// The cap-sharing group a fine-grained component folds into.
pub(crate) fn major_bucket(component: &str) -> Option<&'static str> {
    match component {
        "labor" | "capital" | "asset" | "knowledge" | "milestone" => Some("cs"),
        "peer" | "invited" => Some("bonus"),
        "rs" => Some("rs"),
        _ => None,
    }
}

/// Admit a delta against the monthly ceilings. Negative deltas pass
/// through untouched; positive deltas are trimmed to the smallest
/// remaining headroom across component, major bucket, and overall, and
/// the allotment is recorded in all three dimensions.
pub(crate) fn admit(
    caps: &MonthlyCaps,
    state: &mut CapsState,
    component: &str,
    at: DateTime<Utc>,
    delta: f64,
) -> f64 {
    state.roll_over(at);

    if !delta.is_finite() || delta <= 0.0 {
        return if delta.is_finite() { delta } else { 0.0 };
    }

    let bucket = major_bucket(component);

    let component_headroom = caps
        .component_cap(component)
        .map(|cap| (cap - state.consumed_component(component)).max(0.0))
        .unwrap_or(f64::INFINITY);
    let bucket_headroom = match bucket.and_then(|name| caps.bucket_cap(name).map(|cap| (name, cap)))
    {
        Some((name, cap)) => (cap - state.consumed_bucket(name)).max(0.0),
        None => f64::INFINITY,
    };
    let overall_headroom = (caps.overall - state.overall).max(0.0);

    let allowed = delta
        .min(component_headroom)
        .min(bucket_headroom)
        .min(overall_headroom);

    if allowed > 0.0 {
        *state.components.entry(component.to_string()).or_insert(0.0) += allowed;
        if let Some(name) = bucket {
            *state.buckets.entry(name.to_string()).or_insert(0.0) += allowed;
        }
        state.overall += allowed;
    }

    allowed
}
