use std::path::PathBuf;

use chrono::{Duration, NaiveDate};
use clap::Args;
use tracing::info;

use trust_core::config::EventRuleKind;
use trust_core::scoring::{
    event_tags, CapsState, EventActor, EventParams, MemberId, TrustEngine, TrustEvent,
};

use crate::error::AppError;
use crate::infra::{self, parse_date};

#[derive(Args, Debug)]
pub(crate) struct RecomputeArgs {
    /// Member id to recompute
    #[arg(long)]
    pub(crate) member: String,
    /// Ledger export to replay (.csv, or a JSON event array)
    #[arg(long)]
    pub(crate) ledger: PathBuf,
    /// Optional rules override document (JSON)
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
    /// Evaluation date (YYYY-MM-DD, defaults to the current time)
    #[arg(long, value_parser = parse_date)]
    pub(crate) now: Option<NaiveDate>,
    /// Print the summary as JSON instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DeltaArgs {
    /// Event-type tag, e.g. contrib_capital_verified
    #[arg(long)]
    pub(crate) event_type: String,
    /// Claimed capital amount in million units
    #[arg(long)]
    pub(crate) amount_million: Option<f64>,
    /// Verified labor hours
    #[arg(long)]
    pub(crate) hours: Option<f64>,
    /// Role name for the labor multiplier lookup
    #[arg(long)]
    pub(crate) role: Option<String>,
    /// Commitment difficulty (1-5)
    #[arg(long)]
    pub(crate) difficulty: Option<f64>,
    /// Days late for a late commitment
    #[arg(long)]
    pub(crate) late_days: Option<u32>,
    /// Explicit value for value-kind contributions
    #[arg(long)]
    pub(crate) value: Option<f64>,
    /// Optional rules override document (JSON)
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the evaluation date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print the final summary as JSON instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_recompute(args: RecomputeArgs) -> Result<(), AppError> {
    let rules = infra::load_rules(args.rules.as_deref())?;
    let events = infra::load_ledger(&args.ledger)?;
    let now = infra::resolve_now(args.now);

    info!(member = %args.member, events = events.len(), "recomputing trust summary");

    let engine = TrustEngine::new(rules);
    let summary = engine.recompute(&MemberId(args.member), &events, now);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        infra::render_summary(&summary);
    }

    Ok(())
}

pub(crate) fn run_delta(args: DeltaArgs) -> Result<(), AppError> {
    let rules = infra::load_rules(args.rules.as_deref())?;
    let engine = TrustEngine::new(rules);

    let params = match engine
        .rules()
        .event_rule(&args.event_type)
        .map(|rule| rule.kind)
    {
        Some(EventRuleKind::Capital) => EventParams::Capital {
            amount_million: args.amount_million.unwrap_or(0.0),
        },
        Some(EventRuleKind::Labor) => EventParams::Labor {
            hours: args.hours.unwrap_or(0.0),
            role: args.role,
        },
        Some(EventRuleKind::CommitmentOnTime) => EventParams::OnTimeCommitment {
            difficulty: args.difficulty.unwrap_or(1.0),
        },
        Some(EventRuleKind::CommitmentLate) => match args.late_days {
            Some(late_days) => EventParams::LateCommitment { late_days },
            None => EventParams::None,
        },
        Some(EventRuleKind::Value) => EventParams::Value { value: args.value },
        _ => EventParams::None,
    };

    let outcome = engine.event_delta(&args.event_type, &params);
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let engine = TrustEngine::standard();
    let now = infra::resolve_now(args.today);
    let member = MemberId("member-demo".to_string());

    println!("Trust engine demo");
    println!("Evaluating as of {}", now.to_rfc3339());

    let proposals = vec![
        (
            event_tags::PROFILE_VERIFIED,
            EventParams::None,
        ),
        (
            event_tags::CONTRIB_CAPITAL_VERIFIED,
            EventParams::Capital { amount_million: 100.0 },
        ),
        (
            event_tags::CONTRIB_LABOR_VERIFIED,
            EventParams::Labor {
                hours: 10.0,
                role: Some("lead".to_string()),
            },
        ),
        (
            event_tags::COMMITMENT_DONE_ONTIME,
            EventParams::OnTimeCommitment { difficulty: 3.0 },
        ),
        (
            event_tags::COMMITMENT_DONE_LATE,
            EventParams::LateCommitment { late_days: 5 },
        ),
    ];

    println!("\nIngestion walk-through (delta calculation + monthly caps)");
    let mut state = CapsState::new(now);
    let mut events = Vec::new();
    for (index, (tag, params)) in proposals.iter().enumerate() {
        let outcome = engine.event_delta(tag, params);
        let admitted = match engine.component_for(tag) {
            Some(component) => engine.admit(&mut state, component, now, outcome.delta),
            None => outcome.delta,
        };
        println!(
            "- {tag}: delta {}, admitted {}{}",
            outcome.delta,
            admitted,
            outcome
                .note
                .as_deref()
                .map(|note| format!(", note {note}"))
                .unwrap_or_default()
        );

        let age_weeks = (proposals.len() - index) as i64;
        events.push(TrustEvent {
            id: format!("demo-{index}"),
            member_id: member.clone(),
            project_id: Some("demo-project".to_string()),
            event_type: tag.to_string(),
            delta: admitted,
            ref_id: None,
            note: outcome.note,
            created_at: now - Duration::weeks(age_weeks),
            recorded_by: EventActor::System,
        });
    }

    let summary = engine.recompute(&member, &events, now);

    println!();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        infra::render_summary(&summary);
    }

    Ok(())
}
