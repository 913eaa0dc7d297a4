use chrono::{DateTime, Utc};

use crate::scoring::domain::{
    commitment_resolution, CommitmentResolution, EventNote, TrustEvent,
};
use crate::scoring::numeric::{clamp, within_window};

const WINDOW_DAYS: i64 = 180;
const LATE_WINDOW_DAYS: i64 = 90;

/// Reliability outcome: the score plus the commitment counts the summary
/// and flag evaluator consume.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ReliabilityOutcome {
    pub score: u32,
    pub completed: u32,
    pub failed: u32,
    pub late_90d: u32,
}

/// Quality credited to a late completion by late-day band [1-3]/[4-7]/[>=8].
fn late_quality(late_days: u32) -> f64 {
    match late_days {
        0..=3 => 0.6,
        4..=7 => 0.3,
        _ => 0.05,
    }
}

/// Score commitment follow-through over the trailing 180 days: completion
/// quality, best consecutive-success streak, and a penalty for recent
/// delays.
pub(crate) fn reliability_score(events: &[TrustEvent], now: DateTime<Utc>) -> ReliabilityOutcome {
    let mut commitments: Vec<(&TrustEvent, CommitmentResolution)> = events
        .iter()
        .filter(|event| within_window(event.created_at, now, WINDOW_DAYS))
        .filter_map(|event| {
            commitment_resolution(&event.event_type).map(|resolution| (event, resolution))
        })
        .collect();
    commitments.sort_by_key(|(event, _)| event.created_at);

    let mut quality = 0.0_f64;
    let mut completed = 0u32;
    let mut failed = 0u32;
    let mut late_90d = 0u32;
    let mut streak = 0u32;
    let mut best_streak = 0u32;

    for (event, resolution) in commitments {
        match resolution {
            CommitmentResolution::OnTime => {
                quality += 1.0;
                completed += 1;
                streak += 1;
                best_streak = best_streak.max(streak);
            }
            CommitmentResolution::Late => {
                // Missing or unusable note detail counts as the mildest
                // band rather than the harshest.
                let late_days = EventNote::parse(event.note.as_deref())
                    .and_then(|note| note.late_days)
                    .unwrap_or(1);
                quality += late_quality(late_days);
                completed += 1;
                streak = 0;
                if within_window(event.created_at, now, LATE_WINDOW_DAYS) {
                    late_90d += 1;
                }
            }
            CommitmentResolution::Failed => {
                failed += 1;
                streak = 0;
            }
        }
    }

    let denominator = (completed + failed).max(1) as f64;
    let completion_quality = 100.0 * quality / denominator;
    let streak_bonus = match best_streak {
        s if s >= 20 => 60.0,
        s if s >= 12 => 30.0,
        s if s >= 7 => 15.0,
        s if s >= 3 => 5.0,
        _ => 0.0,
    };
    let delay_penalty = clamp(0.0, 60.0, 2.0 * late_90d as f64);

    let score = clamp(
        0.0,
        300.0,
        (completion_quality + streak_bonus - delay_penalty).round(),
    ) as u32;

    ReliabilityOutcome {
        score,
        completed,
        failed,
        late_90d,
    }
}
