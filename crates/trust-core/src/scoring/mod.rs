//! The trust scoring engine: event-to-delta calculation, monthly-cap
//! admission, and full summary recomputation for one member.
//!
//! Everything here is a pure function of its inputs plus an explicit
//! `now`; the engine performs no I/O, keeps no state across calls, and
//! never fails the caller.

mod caps;
mod contribution;
mod decay;
mod delta;
pub mod domain;
mod flags;
mod integrity;
mod level;
mod numeric;
mod reliability;

#[cfg(test)]
mod tests;

pub use caps::CapsState;
pub use delta::DeltaOutcome;
pub use domain::{
    event_tags, EventActor, EventNote, EventParams, MemberId, RiskFlag, TrustEvent, TrustSummary,
};

use chrono::{DateTime, Utc};

use crate::config::RulesConfig;
use crate::scoring::numeric::clamp;

/// Stateless engine applying one rules document to event histories.
pub struct TrustEngine {
    rules: RulesConfig,
}

impl TrustEngine {
    pub fn new(rules: RulesConfig) -> Self {
        Self { rules }
    }

    /// Engine over the built-in standard ruleset.
    pub fn standard() -> Self {
        Self::new(RulesConfig::standard())
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    /// Point delta and persistable note for a proposed event. Invoked at
    /// ingestion time, not during recomputation.
    pub fn event_delta(&self, event_type: &str, params: &EventParams) -> DeltaOutcome {
        delta::event_delta(&self.rules, event_type, params)
    }

    /// Monthly-cap component an event type consumes, when it is capped.
    pub fn component_for(&self, event_type: &str) -> Option<&str> {
        self.rules
            .event_rule(event_type)
            .and_then(|rule| rule.component.as_deref())
    }

    /// Admit a delta against the monthly ceilings, returning the allowed
    /// portion. Negative deltas always pass through in full.
    pub fn admit(
        &self,
        state: &mut CapsState,
        component: &str,
        at: DateTime<Utc>,
        delta: f64,
    ) -> f64 {
        caps::admit(&self.rules.caps, state, component, at, delta)
    }

    /// Recompute the full trust summary for one member from the entire
    /// event history. Deterministic given identical inputs and `now`.
    pub fn recompute(
        &self,
        member_id: &MemberId,
        events: &[TrustEvent],
        now: DateTime<Utc>,
    ) -> TrustSummary {
        let history: Vec<TrustEvent> = events
            .iter()
            .filter(|event| event.member_id == *member_id && event.created_at <= now)
            .cloned()
            .collect();

        let base = self.base_points(&history);
        let reliability = reliability::reliability_score(&history, now);
        let contribution = contribution::contribution_score(&history, now);
        let integrity = integrity::integrity_score(&self.rules.integrity, &history, now);

        let weights = &self.rules.weights;
        let weighted = base
            + weights.reliability * reliability.score as f64
            + weights.contribution * contribution.score as f64
            + weights.integrity * integrity.score as f64;

        let last_positive_at = history
            .iter()
            .filter(|event| event.delta > 0.0)
            .map(|event| event.created_at)
            .max();
        let last_event_at = history.iter().map(|event| event.created_at).max();

        let decayed = decay::apply_decay(&self.rules.decay, weighted.round(), last_positive_at, now);
        let score = decayed.max(0.0) as i64;

        let mut summary = TrustSummary {
            member_id: member_id.clone(),
            score,
            level: 1,
            base,
            reliability: reliability.score,
            contribution: contribution.score,
            integrity: integrity.score,
            commitments_completed: reliability.completed,
            commitments_failed: reliability.failed,
            commitments_late_90d: reliability.late_90d,
            labor_hours_90d: contribution.labor_hours,
            capital_million_90d: contribution.capital_million,
            asset_points_180d: contribution.asset_points,
            knowledge_points_90d: contribution.knowledge_points,
            open_disputes: integrity.open_disputes,
            last_positive_at,
            last_event_at,
            last_major_dispute_at: integrity.last_major_dispute_at,
            flags: Vec::new(),
            updated_at: now,
        };

        summary.flags = flags::evaluate_flags(&self.rules.flags, &summary, &history, now);
        summary.level = level::classify_level(&self.rules.levels, &summary);
        summary
    }

    /// Base accumulator: configured base-kind deltas summed over the
    /// entire history, clamped to the base ceiling.
    fn base_points(&self, history: &[TrustEvent]) -> f64 {
        let sum: f64 = history
            .iter()
            .filter(|event| {
                self.rules
                    .event_rule(&event.event_type)
                    .map(|rule| rule.kind == crate::config::EventRuleKind::Base)
                    .unwrap_or(false)
            })
            .map(|event| event.delta)
            .sum();
        clamp(0.0, self.rules.base.max, sum)
    }
}
