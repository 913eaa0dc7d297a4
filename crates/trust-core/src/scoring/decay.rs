use chrono::{DateTime, Utc};

use crate::config::DecayRules;
use crate::scoring::numeric::{clamp, whole_days_between};

/// Erode a score after sustained inactivity. Absence of data is never
/// penalized: without a recorded positive event, or inside the threshold
/// gap, the score passes through unchanged.
pub(crate) fn apply_decay(
    rules: &DecayRules,
    score: f64,
    last_positive_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> f64 {
    if !rules.enabled {
        return score;
    }
    let Some(last_positive_at) = last_positive_at else {
        return score;
    };

    let gap_days = whole_days_between(last_positive_at, now);
    if gap_days < rules.inactivity_days {
        return score;
    }

    let erosion = clamp(
        0.0,
        rules.monthly_max_points,
        (score * rules.monthly_percent).round(),
    );
    (score - erosion).max(0.0)
}
