//! Typed, versioned rules document for the trust engine.
//!
//! Every field carries a type-level default so a partial (or empty)
//! override document always resolves against one table:
//! [`RulesConfig::standard`]. Loading and validating the document ahead
//! of time is the configuration collaborator's job; this module only
//! defines the schema and the defaults.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::scoring::domain::event_tags;

/// Highest document version this engine understands.
pub const SUPPORTED_VERSION: u32 = 1;

/// Errors raised while loading a rules document.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read rules document: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid rules document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unsupported rules version {found} (engine supports up to {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}

/// The externally supplied rules document, fully typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub version: u32,
    /// Per-event-type scoring policies, keyed by event-type tag.
    pub events: BTreeMap<String, EventRule>,
    pub weights: ComponentWeights,
    pub base: BaseRules,
    pub integrity: IntegrityRules,
    pub caps: MonthlyCaps,
    pub decay: DecayRules,
    /// Candidate levels, evaluated in descending level order.
    pub levels: Vec<LevelRule>,
    pub flags: FlagRules,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl RulesConfig {
    /// The complete built-in ruleset: the single documented default table
    /// every omitted override field falls back to.
    pub fn standard() -> Self {
        Self {
            version: SUPPORTED_VERSION,
            events: standard_event_rules(),
            weights: ComponentWeights::default(),
            base: BaseRules::default(),
            integrity: IntegrityRules::default(),
            caps: MonthlyCaps::default(),
            decay: DecayRules::default(),
            levels: standard_levels(),
            flags: FlagRules::default(),
        }
    }

    /// Parse a JSON override document; omitted sections keep their
    /// standard defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: RulesConfig = serde_json::from_str(raw)?;
        if config.version > SUPPORTED_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: config.version,
                supported: SUPPORTED_VERSION,
            });
        }
        Ok(config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn event_rule(&self, event_type: &str) -> Option<&EventRule> {
        self.events.get(event_type)
    }
}

/// Scoring policy for a single event type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventRule {
    pub kind: EventRuleKind,
    /// Base delta; meaning depends on `kind` (fixed points, points per
    /// hour for labor, on-time commitment base, value default).
    pub delta: f64,
    /// Per-difficulty-step bonus for on-time commitments.
    pub step_bonus: f64,
    /// Role-name multipliers for labor events; unlisted roles use 1.0.
    pub role_multipliers: BTreeMap<String, f64>,
    /// Inclusive late-day tiers for late commitments.
    pub late_tiers: Vec<LateTier>,
    /// Lower clamp for value-kind deltas.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Upper clamp for value-kind deltas.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Monthly-cap component this event type consumes, when capped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    /// Static pass-through note for fixed-kind events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Default for EventRule {
    fn default() -> Self {
        Self {
            kind: EventRuleKind::Fixed,
            delta: 0.0,
            step_bonus: 0.1,
            role_multipliers: BTreeMap::new(),
            late_tiers: Vec::new(),
            min: None,
            max: None,
            component: None,
            note: None,
        }
    }
}

/// Which formula turns an event of this type into a point delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventRuleKind {
    Base,
    Capital,
    Labor,
    CommitmentOnTime,
    CommitmentLate,
    Value,
    Fixed,
}

/// One inclusive `[from, to]` late-day tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LateTier {
    pub from: u32,
    pub to: u32,
    pub points: f64,
}

/// Weights applied to the three component scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentWeights {
    pub reliability: f64,
    pub contribution: f64,
    pub integrity: f64,
}

impl Default for ComponentWeights {
    fn default() -> Self {
        Self {
            reliability: 1.0,
            contribution: 0.8,
            integrity: 1.2,
        }
    }
}

/// Bounds for the base accumulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseRules {
    pub max: f64,
}

impl Default for BaseRules {
    fn default() -> Self {
        Self { max: 25.0 }
    }
}

/// Bounds for the integrity score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrityRules {
    pub max: f64,
}

impl Default for IntegrityRules {
    fn default() -> Self {
        Self { max: 150.0 }
    }
}

/// Monthly positive-delta ceilings. A component or bucket missing from
/// its table is uncapped; the overall ceiling always applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthlyCaps {
    pub overall: f64,
    pub components: BTreeMap<String, f64>,
    pub buckets: BTreeMap<String, f64>,
}

impl MonthlyCaps {
    pub fn component_cap(&self, component: &str) -> Option<f64> {
        self.components.get(component).copied()
    }

    pub fn bucket_cap(&self, bucket: &str) -> Option<f64> {
        self.buckets.get(bucket).copied()
    }
}

impl Default for MonthlyCaps {
    fn default() -> Self {
        let components = [
            ("labor", 80.0),
            ("capital", 60.0),
            ("asset", 40.0),
            ("knowledge", 30.0),
            ("milestone", 40.0),
            ("peer", 20.0),
            ("invited", 20.0),
        ]
        .into_iter()
        .map(|(name, cap)| (name.to_string(), cap))
        .collect();

        let buckets = [("rs", 100.0), ("cs", 150.0), ("bonus", 30.0)]
            .into_iter()
            .map(|(name, cap)| (name.to_string(), cap))
            .collect();

        Self {
            overall: 200.0,
            components,
            buckets,
        }
    }
}

/// Inactivity decay policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayRules {
    pub enabled: bool,
    /// Whole days since the last positive event before decay applies.
    pub inactivity_days: i64,
    pub monthly_percent: f64,
    pub monthly_max_points: f64,
}

impl Default for DecayRules {
    fn default() -> Self {
        Self {
            enabled: true,
            inactivity_days: 30,
            monthly_percent: 0.05,
            monthly_max_points: 40.0,
        }
    }
}

/// Requirements a summary must meet to hold a privilege level. Level 1
/// has no floor and is the implicit fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelRule {
    pub level: u8,
    pub min_score: i64,
    pub min_reliability: u32,
    pub min_completed: u32,
    /// Maximum `failed / max(1, completed + failed)`.
    pub max_failure_rate: f64,
    pub no_open_disputes: bool,
}

impl Default for LevelRule {
    fn default() -> Self {
        Self {
            level: 1,
            min_score: 0,
            min_reliability: 0,
            min_completed: 0,
            max_failure_rate: 1.0,
            no_open_disputes: false,
        }
    }
}

/// Thresholds for the risk-flag evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlagRules {
    /// Late completions in 90 days at/above which the delay flag fires.
    pub max_late_90d: u32,
    /// Open disputes at/above which the exposure flag fires.
    pub max_open_disputes: u32,
    /// Proxy ratio `capital / (capital + hours + 1)` at/above which the
    /// capital-dominance flag fires.
    pub capital_dominance_ratio: f64,
    /// Peer-endorsement count threshold; the ring flag fires at double
    /// this count inside the ring window.
    pub ring_threshold: u32,
    pub ring_window_days: i64,
}

impl Default for FlagRules {
    fn default() -> Self {
        Self {
            max_late_90d: 3,
            max_open_disputes: 1,
            capital_dominance_ratio: 0.7,
            ring_threshold: 3,
            ring_window_days: 60,
        }
    }
}

fn standard_levels() -> Vec<LevelRule> {
    vec![
        LevelRule {
            level: 4,
            min_score: 600,
            min_reliability: 140,
            min_completed: 20,
            max_failure_rate: 0.05,
            no_open_disputes: true,
        },
        LevelRule {
            level: 3,
            min_score: 450,
            min_reliability: 110,
            min_completed: 10,
            max_failure_rate: 0.15,
            no_open_disputes: true,
        },
        LevelRule {
            level: 2,
            min_score: 250,
            min_reliability: 60,
            min_completed: 3,
            max_failure_rate: 0.3,
            no_open_disputes: false,
        },
    ]
}

fn standard_event_rules() -> BTreeMap<String, EventRule> {
    let mut events = BTreeMap::new();

    events.insert(
        event_tags::CONTRIB_LABOR_VERIFIED.to_string(),
        EventRule {
            kind: EventRuleKind::Labor,
            delta: 1.0,
            role_multipliers: [("lead", 1.5), ("core", 1.2), ("member", 1.0), ("helper", 0.8)]
                .into_iter()
                .map(|(role, multiplier)| (role.to_string(), multiplier))
                .collect(),
            component: Some("labor".to_string()),
            ..EventRule::default()
        },
    );
    events.insert(
        event_tags::CONTRIB_CAPITAL_VERIFIED.to_string(),
        EventRule {
            kind: EventRuleKind::Capital,
            component: Some("capital".to_string()),
            ..EventRule::default()
        },
    );
    events.insert(
        event_tags::CONTRIB_ASSET_VERIFIED.to_string(),
        EventRule {
            kind: EventRuleKind::Value,
            delta: 10.0,
            min: Some(0.0),
            max: Some(30.0),
            component: Some("asset".to_string()),
            ..EventRule::default()
        },
    );
    events.insert(
        event_tags::CONTRIB_KNOWLEDGE_VERIFIED.to_string(),
        EventRule {
            kind: EventRuleKind::Value,
            delta: 5.0,
            min: Some(0.0),
            max: Some(20.0),
            component: Some("knowledge".to_string()),
            ..EventRule::default()
        },
    );
    events.insert(
        event_tags::COMMITMENT_DONE_ONTIME.to_string(),
        EventRule {
            kind: EventRuleKind::CommitmentOnTime,
            delta: 15.0,
            step_bonus: 0.1,
            component: Some("milestone".to_string()),
            ..EventRule::default()
        },
    );
    events.insert(
        event_tags::COMMITMENT_DONE_LATE.to_string(),
        EventRule {
            kind: EventRuleKind::CommitmentLate,
            late_tiers: vec![
                LateTier { from: 1, to: 3, points: 8.0 },
                LateTier { from: 4, to: 7, points: 4.0 },
                LateTier { from: 8, to: 9999, points: 1.0 },
            ],
            component: Some("milestone".to_string()),
            ..EventRule::default()
        },
    );
    events.insert(
        event_tags::COMMITMENT_FAILED.to_string(),
        EventRule {
            delta: -20.0,
            ..EventRule::default()
        },
    );
    events.insert(
        event_tags::COMMITMENT_ABANDONED.to_string(),
        EventRule {
            delta: -30.0,
            ..EventRule::default()
        },
    );
    events.insert(
        event_tags::COMMITMENT_HARMFUL.to_string(),
        EventRule {
            delta: -40.0,
            ..EventRule::default()
        },
    );
    events.insert(
        event_tags::DISPUTE_OPENED_AGAINST.to_string(),
        EventRule::default(),
    );
    events.insert(
        event_tags::DISPUTE_RESOLVED_AGAINST.to_string(),
        EventRule {
            delta: -25.0,
            ..EventRule::default()
        },
    );
    events.insert(
        event_tags::DISPUTE_RESOLVED_MAJOR.to_string(),
        EventRule {
            delta: -60.0,
            ..EventRule::default()
        },
    );
    events.insert(
        event_tags::DISPUTE_WITHDRAWN.to_string(),
        EventRule::default(),
    );
    events.insert(
        event_tags::TOXIC_CONFIRMED.to_string(),
        EventRule {
            delta: -35.0,
            ..EventRule::default()
        },
    );
    events.insert(
        event_tags::FRAUD_CONFIRMED.to_string(),
        EventRule {
            delta: -80.0,
            ..EventRule::default()
        },
    );
    events.insert(
        event_tags::GAMING_CONFIRMED.to_string(),
        EventRule {
            delta: -50.0,
            ..EventRule::default()
        },
    );
    events.insert(
        event_tags::PEER_ENDORSEMENT.to_string(),
        EventRule {
            delta: 2.0,
            component: Some("peer".to_string()),
            ..EventRule::default()
        },
    );
    events.insert(
        event_tags::INVITE_CONVERTED.to_string(),
        EventRule {
            delta: 3.0,
            component: Some("invited".to_string()),
            ..EventRule::default()
        },
    );
    events.insert(
        event_tags::PROFILE_VERIFIED.to_string(),
        EventRule {
            kind: EventRuleKind::Base,
            delta: 10.0,
            ..EventRule::default()
        },
    );
    events.insert(
        event_tags::ORIENTATION_COMPLETED.to_string(),
        EventRule {
            kind: EventRuleKind::Base,
            delta: 5.0,
            ..EventRule::default()
        },
    );

    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_resolves_to_standard_table() {
        let config = RulesConfig::from_json("{}").expect("empty document loads");
        assert_eq!(config, RulesConfig::standard());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = RulesConfig::from_json(r#"{"weights": {"contribution": 0.5}}"#)
            .expect("partial document loads");
        assert_eq!(config.weights.contribution, 0.5);
        assert_eq!(config.weights.reliability, 1.0);
        assert_eq!(config.weights.integrity, 1.2);
        assert_eq!(config.base.max, 25.0);
        assert_eq!(config.events, standard_event_rules());
    }

    #[test]
    fn future_version_is_rejected() {
        let err = RulesConfig::from_json(r#"{"version": 99}"#).expect_err("must reject");
        match err {
            ConfigError::UnsupportedVersion { found, supported } => {
                assert_eq!(found, 99);
                assert_eq!(supported, SUPPORTED_VERSION);
            }
            other => panic!("expected version error, got {other:?}"),
        }
    }

    #[test]
    fn standard_table_names_every_scoring_kind() {
        let config = RulesConfig::standard();
        let ontime = config
            .event_rule(event_tags::COMMITMENT_DONE_ONTIME)
            .expect("on-time rule present");
        assert_eq!(ontime.kind, EventRuleKind::CommitmentOnTime);
        assert_eq!(ontime.delta, 15.0);

        let late = config
            .event_rule(event_tags::COMMITMENT_DONE_LATE)
            .expect("late rule present");
        assert_eq!(late.late_tiers.len(), 3);

        assert!(config.event_rule("unknown_event").is_none());
    }
}
