use chrono::{DateTime, Utc};

use crate::scoring::domain::{event_tags, EventNote, TrustEvent};
use crate::scoring::numeric::{capital_points, clamp, within_window};

const SHORT_WINDOW_DAYS: i64 = 90;
const ASSET_WINDOW_DAYS: i64 = 180;

/// Contribution outcome: the score plus the rolling totals the summary
/// and flag evaluator consume.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ContributionOutcome {
    pub score: u32,
    pub labor_points: f64,
    pub capital_points: f64,
    pub asset_points: f64,
    pub knowledge_points: f64,
    pub labor_hours: f64,
    pub capital_million: f64,
}

/// Score verified contributions. Takes the full history and windows each
/// component internally: labor, capital, and knowledge over 90 days,
/// assets over 180.
pub(crate) fn contribution_score(events: &[TrustEvent], now: DateTime<Utc>) -> ContributionOutcome {
    let mut labor_sum = 0.0_f64;
    let mut labor_hours = 0.0_f64;
    let mut capital_million = 0.0_f64;
    let mut asset_sum = 0.0_f64;
    let mut knowledge_sum = 0.0_f64;

    for event in events {
        match event.event_type.as_str() {
            event_tags::CONTRIB_LABOR_VERIFIED
                if within_window(event.created_at, now, SHORT_WINDOW_DAYS) =>
            {
                // The role multiplier is already baked into the delta.
                if event.delta > 0.0 {
                    labor_sum += event.delta;
                }
                labor_hours += EventNote::parse(event.note.as_deref())
                    .and_then(|note| note.hours)
                    .unwrap_or(0.0)
                    .max(0.0);
            }
            event_tags::CONTRIB_CAPITAL_VERIFIED
                if within_window(event.created_at, now, SHORT_WINDOW_DAYS) =>
            {
                capital_million += EventNote::parse(event.note.as_deref())
                    .and_then(|note| note.amount_million)
                    .unwrap_or(0.0)
                    .max(0.0);
            }
            event_tags::CONTRIB_ASSET_VERIFIED
                if within_window(event.created_at, now, ASSET_WINDOW_DAYS) =>
            {
                asset_sum += event.delta;
            }
            event_tags::CONTRIB_KNOWLEDGE_VERIFIED
                if within_window(event.created_at, now, SHORT_WINDOW_DAYS) =>
            {
                knowledge_sum += event.delta;
            }
            _ => {}
        }
    }

    let labor_points = clamp(0.0, 120.0, labor_sum);
    let capital = clamp(0.0, 120.0, capital_points(capital_million));
    let asset_points = clamp(0.0, 80.0, asset_sum);
    let knowledge_points = clamp(0.0, 60.0, knowledge_sum);

    let distinct_kinds = [labor_points, capital, asset_points, knowledge_points]
        .iter()
        .filter(|points| **points > 0.0)
        .count();
    let diversity_bonus = match distinct_kinds {
        kinds if kinds >= 3 => 20.0,
        2 => 10.0,
        _ => 0.0,
    };

    let score = clamp(
        0.0,
        300.0,
        (labor_points + capital + asset_points + knowledge_points + diversity_bonus).round(),
    ) as u32;

    ContributionOutcome {
        score,
        labor_points,
        capital_points: capital,
        asset_points,
        knowledge_points,
        labor_hours,
        capital_million,
    }
}
