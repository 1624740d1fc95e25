use std::path::PathBuf;

use clap::Parser;

use spades_core::AppInfo;
use spades_sim::config::{ResolvedOutputs, SimulationConfig};
use spades_sim::logging::init_logging;
use spades_sim::runner::SimulationRunner;

/// Headless harness that plays whole Spades games between configured seats.
#[derive(Debug, Parser)]
#[command(
    name = "spades-sim",
    author,
    version,
    about = "Deterministic Spades game simulator"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "sim/sim.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of games to play.
    #[arg(long, value_name = "GAMES")]
    games: Option<usize>,

    /// Override the RNG seed that derives every game's shuffle.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the per-game round cap.
    #[arg(long, value_name = "ROUNDS")]
    max_rounds: Option<u32>,

    /// Exit after validating the configuration (no games are played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = SimulationConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(games) = cli.games {
        config.games.count = games;
    }

    if let Some(seed) = cli.seed {
        config.games.seed = Some(seed);
    }

    if let Some(max_rounds) = cli.max_rounds {
        config.games.max_rounds = max_rounds;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let games = config.games.count;

    println!(
        "{} {}: loaded configuration '{run_id}' ({games} game{})",
        AppInfo::name(),
        AppInfo::version(),
        if games == 1 { "" } else { "s" }
    );

    let logging_guard = init_logging(&config.logging, &outputs, &run_id)?;
    let runner = SimulationRunner::new(config, outputs)?;

    if cli.validate_only {
        println!("Validation-only mode: no games played.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Run complete for '{run_id}': {} games, Team A {} / Team B {} / unfinished {}, {:.1} rounds on average",
        summary.games_played,
        summary.team_a_wins,
        summary.team_b_wins,
        summary.truncated,
        summary.average_rounds
    );
    println!("Results: {}", summary.jsonl_path.display());
    println!("Summary: {}", summary.summary_path.display());
    if let Some(guard) = logging_guard.as_ref() {
        println!("Trace log: {}", guard.trace_path.display());
    }

    Ok(())
}
