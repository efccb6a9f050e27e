//! EventGate replay binary
//!
//! Replays a catalog and submission snapshot under a simulated clock and
//! prints what the pricing and workflow resolvers report at every tick.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use eventgate_sim::{ReplayRunner, ScenarioConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Full report as pretty JSON
    Json,
    /// Transitions and digests only
    Summary,
}

#[derive(Debug, Parser)]
#[command(name = "eventgate-sim", about = "Replay ticket phases and submission gates over time")]
struct Args {
    /// Scenario JSON file; the built-in author registration scenario when omitted
    scenario: Option<PathBuf>,

    /// Use the built-in sold-out scenario instead of a file
    #[arg(long, conflicts_with = "scenario")]
    sold_out: bool,

    /// Override the replay start (RFC 3339)
    #[arg(long)]
    start: Option<String>,

    /// Override the number of ticks
    #[arg(long)]
    ticks: Option<usize>,

    /// Override the clock advance per tick, in seconds
    #[arg(long)]
    interval_secs: Option<i64>,

    #[arg(long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut scenario = match (&args.scenario, args.sold_out) {
        (Some(path), _) => ScenarioConfig::from_file(path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        (None, true) => ScenarioConfig::sold_out_authors(),
        (None, false) => ScenarioConfig::author_registration(),
    };

    if let Some(start) = args.start {
        scenario.replay.start = start;
    }
    if let Some(ticks) = args.ticks {
        scenario.replay.ticks = ticks;
    }
    if let Some(interval) = args.interval_secs {
        scenario.replay.tick_interval_secs = interval;
    }

    let report = ReplayRunner::new()
        .run(&scenario)
        .with_context(|| format!("replaying scenario {}", scenario.name))?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Summary => print!("{}", report.render_summary()),
    }
    Ok(())
}
