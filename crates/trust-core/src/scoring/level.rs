use crate::config::LevelRule;
use crate::scoring::domain::TrustSummary;

/// Match the summary against candidate levels in descending order; the
/// first level whose every requirement holds wins. Level 1 has no floor
/// and is the fallback.
pub(crate) fn classify_level(levels: &[LevelRule], summary: &TrustSummary) -> u8 {
    let mut candidates: Vec<&LevelRule> = levels.iter().collect();
    candidates.sort_by(|a, b| b.level.cmp(&a.level));

    for rule in candidates {
        if meets(rule, summary) {
            return rule.level;
        }
    }

    1
}

fn meets(rule: &LevelRule, summary: &TrustSummary) -> bool {
    let attempts = (summary.commitments_completed + summary.commitments_failed).max(1) as f64;
    let failure_rate = summary.commitments_failed as f64 / attempts;

    summary.score >= rule.min_score
        && summary.reliability >= rule.min_reliability
        && summary.commitments_completed >= rule.min_completed
        && failure_rate <= rule.max_failure_rate
        && (!rule.no_open_disputes || summary.open_disputes == 0)
}
