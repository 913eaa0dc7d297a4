use std::io::Read;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

use super::normalizer::normalize_tag;
use crate::scoring::domain::{EventActor, MemberId, TrustEvent};

/// Parse ledger export rows into events. Rows missing an id, member,
/// event type, or usable timestamp are skipped rather than failing the
/// whole import.
pub(crate) fn parse_events<R: Read>(reader: R) -> Result<Vec<TrustEvent>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut events = Vec::new();

    for record in csv_reader.deserialize::<LedgerRow>() {
        let row = record?;
        if let Some(event) = row.into_event() {
            events.push(event);
        }
    }

    Ok(events)
}

#[derive(Debug, Deserialize)]
struct LedgerRow {
    #[serde(rename = "Event ID", default, deserialize_with = "empty_string_as_none")]
    event_id: Option<String>,
    #[serde(rename = "Member", default, deserialize_with = "empty_string_as_none")]
    member: Option<String>,
    #[serde(rename = "Project", default, deserialize_with = "empty_string_as_none")]
    project: Option<String>,
    #[serde(rename = "Type", default, deserialize_with = "empty_string_as_none")]
    event_type: Option<String>,
    #[serde(rename = "Delta", default, deserialize_with = "empty_string_as_none")]
    delta: Option<String>,
    #[serde(rename = "Ref", default, deserialize_with = "empty_string_as_none")]
    ref_id: Option<String>,
    #[serde(rename = "Note", default, deserialize_with = "empty_string_as_none")]
    note: Option<String>,
    #[serde(rename = "Created At", default, deserialize_with = "empty_string_as_none")]
    created_at: Option<String>,
    #[serde(rename = "Recorded By", default, deserialize_with = "empty_string_as_none")]
    recorded_by: Option<String>,
}

impl LedgerRow {
    fn into_event(self) -> Option<TrustEvent> {
        let id = self.event_id?;
        let member = self.member?;
        let event_type = normalize_tag(&self.event_type?);
        let created_at = self.created_at.as_deref().and_then(parse_timestamp)?;

        let delta = self
            .delta
            .as_deref()
            .and_then(|raw| raw.parse::<f64>().ok())
            .unwrap_or(0.0);
        let recorded_by = self
            .recorded_by
            .map(EventActor::from)
            .unwrap_or(EventActor::System);

        Some(TrustEvent {
            id,
            member_id: MemberId(member),
            project_id: self.project,
            event_type,
            delta,
            ref_id: self.ref_id,
            note: self.note,
            created_at,
            recorded_by,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| Utc.from_utc_datetime(&naive));
    }

    if let Ok(millis) = trimmed.parse::<i64>() {
        return Utc.timestamp_millis_opt(millis).single();
    }

    None
}

#[cfg(test)]
pub(crate) fn parse_timestamp_for_tests(value: &str) -> Option<DateTime<Utc>> {
    parse_timestamp(value)
}
