use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};

use crate::config::LateTier;

/// Clamp `value` into the closed interval `[min, max]`.
pub(crate) fn clamp(min: f64, max: f64, value: f64) -> f64 {
    value.max(min).min(max)
}

/// Capital points for a claimed amount (in million units):
/// `2 · ln(1 + max(0, amount))`.
pub(crate) fn capital_points(amount_million: f64) -> f64 {
    2.0 * (1.0 + amount_million.max(0.0)).ln()
}

/// Inclusive tiered lookup: the first tier whose `[from, to]` range
/// contains `value` wins.
pub(crate) fn tier_lookup(tiers: &[LateTier], value: u32) -> Option<f64> {
    tiers
        .iter()
        .find(|tier| value >= tier.from && value <= tier.to)
        .map(|tier| tier.points)
}

/// Whether `at` falls inside the rolling `days`-long window ending at
/// `now`. Events timestamped after `now` never count.
pub(crate) fn within_window(at: DateTime<Utc>, now: DateTime<Utc>, days: i64) -> bool {
    at <= now && at >= now - Duration::days(days)
}

/// Truncate a timestamp to the start of its UTC calendar month
/// (day 1, 00:00:00.000).
pub(crate) fn month_start(at: DateTime<Utc>) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(at.year(), at.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(at)
}

/// Whole days elapsed from `from` to `to`; negative gaps collapse to 0.
pub(crate) fn whole_days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_days().max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn clamp_respects_both_bounds() {
        assert_eq!(clamp(0.0, 10.0, -3.0), 0.0);
        assert_eq!(clamp(0.0, 10.0, 4.5), 4.5);
        assert_eq!(clamp(0.0, 10.0, 12.0), 10.0);
    }

    #[test]
    fn capital_points_floors_negative_amounts() {
        assert_eq!(capital_points(-50.0), 0.0);
        assert!((capital_points(100.0) - 9.2301).abs() < 1e-3);
    }

    #[test]
    fn tier_lookup_matches_inclusive_ranges() {
        let tiers = vec![
            LateTier { from: 1, to: 3, points: 8.0 },
            LateTier { from: 4, to: 7, points: 4.0 },
            LateTier { from: 8, to: 9999, points: 1.0 },
        ];
        assert_eq!(tier_lookup(&tiers, 3), Some(8.0));
        assert_eq!(tier_lookup(&tiers, 5), Some(4.0));
        assert_eq!(tier_lookup(&tiers, 8), Some(1.0));
        assert_eq!(tier_lookup(&tiers, 0), None);
    }

    #[test]
    fn month_start_truncates_to_day_one_utc() {
        let at = Utc.with_ymd_and_hms(2026, 3, 17, 14, 42, 7).unwrap();
        let start = month_start(at);
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn within_window_excludes_future_events() {
        let now = Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap();
        let future = now + Duration::hours(1);
        let recent = now - Duration::days(89);
        let stale = now - Duration::days(91);
        assert!(!within_window(future, now, 90));
        assert!(within_window(recent, now, 90));
        assert!(!within_window(stale, now, 90));
    }
}
