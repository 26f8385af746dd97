//! Command-line front end: reads a JSON solve request, writes a JSON result.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, info};
use u_roster::execution::{CancellationToken, Progress};
use u_roster::models::SolveRequest;
use u_roster::solver::{SolveOutcome, Solver, SolverConfig};

/// Monthly duty roster solver
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the JSON solve request
    request: PathBuf,

    /// Number of trial schedules (overrides the request)
    #[arg(short, long)]
    trials: Option<u64>,

    /// Seed of the trial stream (overrides the request)
    #[arg(short, long)]
    seed: Option<u32>,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON solver configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let request: SolveRequest = serde_json::from_str(&fs::read_to_string(&args.request)?)?;
    let mut config: SolverConfig = match &args.config {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => SolverConfig::default(),
    };
    if let Some(trials) = args.trials {
        config = config.with_trial_count(trials);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    info!(path = %args.request.display(), month = %request.month_key, "loaded request");

    let mut report = |p: Progress| {
        debug!(
            percent = (p.fraction() * 100.0).round() as u32,
            trials = p.trials_done,
            best_cost = p.best_cost,
            "progress"
        );
    };
    let outcome =
        Solver::new(config).solve_with(&request, &CancellationToken::new(), &mut report)?;
    let result = match outcome {
        SolveOutcome::Completed(result) => result,
        SolveOutcome::Cancelled => return Err("solve cancelled".into()),
    };

    let json = serde_json::to_string_pretty(&result)?;
    match &args.output {
        Some(path) => {
            fs::write(path, json)?;
            info!(path = %path.display(), "result written");
        }
        None => println!("{json}"),
    }

    Ok(())
}
