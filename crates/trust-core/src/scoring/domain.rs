use chrono::{DateTime, Utc};
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for platform members.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberId(pub String);

/// Who recorded a ledger event: the platform itself, an administrator, or
/// another member (serialized as `"system"`, `"admin"`, or the member id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventActor {
    System,
    Admin,
    Member(String),
}

impl EventActor {
    pub fn as_str(&self) -> &str {
        match self {
            EventActor::System => "system",
            EventActor::Admin => "admin",
            EventActor::Member(id) => id,
        }
    }
}

impl From<String> for EventActor {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "system" => EventActor::System,
            "admin" => EventActor::Admin,
            _ => EventActor::Member(raw),
        }
    }
}

impl Serialize for EventActor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventActor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(EventActor::from(String::deserialize(deserializer)?))
    }
}

/// An immutable fact in the append-only trust ledger. Created once by the
/// ingestion layer; the engine only ever reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustEvent {
    pub id: String,
    pub member_id: MemberId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Open event-type enumeration, e.g. `contrib_labor_verified`.
    pub event_type: String,
    /// Signed point delta assigned at ingestion time.
    pub delta: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<String>,
    /// Opaque structured-text metadata, e.g. `{"lateDays": 3}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    pub recorded_by: EventActor,
}

/// Typed view of the note column. Ledger rows carry the note as opaque
/// JSON text; scorers parse it leniently and treat malformed payloads as
/// absent rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventNote {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_million: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub late_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl EventNote {
    /// Lenient parse: unparsable or missing notes become `None`.
    pub fn parse(note: Option<&str>) -> Option<EventNote> {
        note.and_then(|raw| serde_json::from_str(raw).ok())
    }

    pub fn is_empty(&self) -> bool {
        *self == EventNote::default()
    }

    /// Serialize back into the ledger's note column; empty payloads stay
    /// absent instead of becoming `{}` rows.
    pub fn to_note(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        serde_json::to_string(self).ok()
    }
}

/// Typed parameters submitted alongside a proposed event, keyed by the
/// event kind the rules document assigns to its type tag.
#[derive(Debug, Clone, PartialEq)]
pub enum EventParams {
    Capital { amount_million: f64 },
    Labor { hours: f64, role: Option<String> },
    OnTimeCommitment { difficulty: f64 },
    LateCommitment { late_days: u32 },
    Value { value: Option<f64> },
    None,
}

/// Risk flag codes attached to a recomputed summary. Flags are additive,
/// never mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFlag {
    DelayPattern,
    DisputeExposure,
    CapitalDominance,
    RingBehavior,
}

impl RiskFlag {
    pub const fn label(self) -> &'static str {
        match self {
            RiskFlag::DelayPattern => "delay_pattern",
            RiskFlag::DisputeExposure => "dispute_exposure",
            RiskFlag::CapitalDominance => "capital_dominance",
            RiskFlag::RingBehavior => "ring_behavior",
        }
    }
}

/// The computed, fully-replaceable projection for one member. Produced
/// fresh by every recomputation; never patched incrementally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustSummary {
    pub member_id: MemberId,
    pub score: i64,
    /// Privilege level 1-4.
    pub level: u8,
    pub base: f64,
    pub reliability: u32,
    pub contribution: u32,
    pub integrity: u32,
    pub commitments_completed: u32,
    pub commitments_failed: u32,
    pub commitments_late_90d: u32,
    pub labor_hours_90d: f64,
    pub capital_million_90d: f64,
    pub asset_points_180d: f64,
    pub knowledge_points_90d: f64,
    pub open_disputes: u32,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub last_positive_at: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub last_event_at: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub last_major_dispute_at: Option<DateTime<Utc>>,
    pub flags: Vec<RiskFlag>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

/// Well-known event-type tags. The enumeration stays open: unknown tags
/// are legal ledger rows and score zero unless the rules document names
/// them.
pub mod event_tags {
    pub const CONTRIB_LABOR_VERIFIED: &str = "contrib_labor_verified";
    pub const CONTRIB_CAPITAL_VERIFIED: &str = "contrib_capital_verified";
    pub const CONTRIB_ASSET_VERIFIED: &str = "contrib_asset_verified";
    pub const CONTRIB_KNOWLEDGE_VERIFIED: &str = "contrib_knowledge_verified";
    pub const COMMITMENT_DONE_ONTIME: &str = "commitment_done_ontime";
    pub const COMMITMENT_DONE_LATE: &str = "commitment_done_late";
    pub const COMMITMENT_FAILED: &str = "commitment_failed";
    pub const COMMITMENT_ABANDONED: &str = "commitment_abandoned";
    pub const COMMITMENT_HARMFUL: &str = "commitment_harmful";
    pub const DISPUTE_OPENED_AGAINST: &str = "dispute_opened_against";
    pub const DISPUTE_RESOLVED_AGAINST: &str = "dispute_resolved_against";
    pub const DISPUTE_RESOLVED_MAJOR: &str = "dispute_resolved_major";
    pub const DISPUTE_WITHDRAWN: &str = "dispute_withdrawn";
    pub const TOXIC_CONFIRMED: &str = "toxic_confirmed";
    pub const FRAUD_CONFIRMED: &str = "fraud_confirmed";
    pub const GAMING_CONFIRMED: &str = "gaming_confirmed";
    pub const PEER_ENDORSEMENT: &str = "peer_endorsement";
    pub const INVITE_CONVERTED: &str = "invite_converted";
    pub const PROFILE_VERIFIED: &str = "profile_verified";
    pub const ORIENTATION_COMPLETED: &str = "orientation_completed";
}

/// How a commitment event resolves for reliability accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CommitmentResolution {
    OnTime,
    Late,
    Failed,
}

pub(crate) fn commitment_resolution(tag: &str) -> Option<CommitmentResolution> {
    match tag {
        event_tags::COMMITMENT_DONE_ONTIME => Some(CommitmentResolution::OnTime),
        event_tags::COMMITMENT_DONE_LATE => Some(CommitmentResolution::Late),
        event_tags::COMMITMENT_FAILED
        | event_tags::COMMITMENT_ABANDONED
        | event_tags::COMMITMENT_HARMFUL => Some(CommitmentResolution::Failed),
        _ => None,
    }
}

pub(crate) fn is_dispute_tag(tag: &str) -> bool {
    tag.starts_with("dispute_")
}

/// Tags that erode the integrity score: anything dispute-prefixed plus
/// confirmed toxic/fraud/gaming violations.
pub(crate) fn is_integrity_tag(tag: &str) -> bool {
    is_dispute_tag(tag)
        || matches!(
            tag,
            event_tags::TOXIC_CONFIRMED
                | event_tags::FRAUD_CONFIRMED
                | event_tags::GAMING_CONFIRMED
        )
}
