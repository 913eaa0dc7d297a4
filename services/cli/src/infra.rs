use std::path::Path;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use trust_core::config::RulesConfig;
use trust_core::ledger::LedgerCsvImporter;
use trust_core::scoring::{TrustEvent, TrustSummary};

use crate::error::AppError;

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Resolve the evaluation instant once at the boundary: midnight UTC of
/// the requested date, or the current wall clock.
pub(crate) fn resolve_now(date: Option<NaiveDate>) -> DateTime<Utc> {
    date.and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .unwrap_or_else(Utc::now)
}

pub(crate) fn load_rules(path: Option<&Path>) -> Result<RulesConfig, AppError> {
    match path {
        Some(path) => Ok(RulesConfig::from_path(path)?),
        None => Ok(RulesConfig::standard()),
    }
}

/// Load a ledger export: CSV by extension, JSON array otherwise.
pub(crate) fn load_ledger(path: &Path) -> Result<Vec<TrustEvent>, AppError> {
    let is_csv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if is_csv {
        Ok(LedgerCsvImporter::from_path(path)?)
    } else {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

pub(crate) fn render_summary(summary: &TrustSummary) {
    println!("Trust summary for {}", summary.member_id.0);
    println!("Score {} (level {})", summary.score, summary.level);
    println!(
        "Components: base {:.1}, reliability {}, contribution {}, integrity {}",
        summary.base, summary.reliability, summary.contribution, summary.integrity
    );
    println!(
        "Commitments: {} completed, {} failed, {} late in 90d",
        summary.commitments_completed, summary.commitments_failed, summary.commitments_late_90d
    );
    println!(
        "Rolling contributions: {:.1}h labor, {:.1}M capital, {:.1} asset pts, {:.1} knowledge pts",
        summary.labor_hours_90d,
        summary.capital_million_90d,
        summary.asset_points_180d,
        summary.knowledge_points_90d
    );
    println!("Open disputes: {}", summary.open_disputes);

    if summary.flags.is_empty() {
        println!("Risk flags: none");
    } else {
        let labels: Vec<&str> = summary.flags.iter().map(|flag| flag.label()).collect();
        println!("Risk flags: {}", labels.join(", "));
    }

    match summary.last_positive_at {
        Some(at) => println!("Last positive event: {}", at.to_rfc3339()),
        None => println!("Last positive event: none recorded"),
    }
}
