use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::demo::{run_delta, run_demo, run_recompute, DeltaArgs, DemoArgs, RecomputeArgs};
use crate::error::AppError;
use crate::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "Trust Score Engine",
    about = "Replay ledger events through the trust scoring engine from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recompute a member's trust summary from a ledger export
    Recompute(RecomputeArgs),
    /// Compute the point delta for a proposed event
    Delta(DeltaArgs),
    /// Walk a seeded member history through the full engine (default command)
    Demo(DemoArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let config = AppConfig::load();
    telemetry::init(&config.telemetry)?;
    tracing::debug!(?config.environment, "trust scoring cli ready");

    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Demo(DemoArgs::default()));

    match command {
        Command::Recompute(args) => run_recompute(args),
        Command::Delta(args) => run_delta(args),
        Command::Demo(args) => run_demo(args),
    }
}
