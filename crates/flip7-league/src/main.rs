use std::path::PathBuf;

use clap::Parser;

use flip7_league::config::LeagueConfig;
use flip7_league::league::LeagueRunner;
use flip7_league::logging::init_logging;

/// League harness pitting every Flip 7 strategy variant against the field.
#[derive(Debug, Parser)]
#[command(
    name = "flip7-league",
    author,
    version,
    about = "Deterministic Flip 7 strategy league"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "league/league.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of league turns to play.
    #[arg(long, value_name = "TURNS")]
    turns: Option<usize>,

    /// Override the tournament seed.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the number of players seated per game.
    #[arg(long, value_name = "COUNT")]
    players_per_game: Option<usize>,

    /// Exit after validating the configuration (no games are played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = LeagueConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(turns) = cli.turns {
        config.league.turns = turns;
    }

    if let Some(seed) = cli.seed {
        config.league.seed = Some(seed);
    }

    if let Some(players_per_game) = cli.players_per_game {
        config.league.players_per_game = players_per_game;
    }

    config.validate()?;

    let outputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let entrants = config.strategies.catalog_size();
    let turns = config.league.turns;

    println!(
        "Loaded configuration '{run_id}' with {entrants} entrant{} ({turns} turn{})",
        if entrants == 1 { "" } else { "s" },
        if turns == 1 { "" } else { "s" }
    );

    let _logging_guard = init_logging(&config.logging, &outputs)?;
    let runner = LeagueRunner::new(config, outputs)?;

    if cli.validate_only {
        println!("Validation-only mode: league execution skipped.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "League complete for '{run_id}': {} turns × {} entrants → {} games, {} rows at {}",
        summary.turns,
        summary.entrants,
        summary.games_played,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    if summary.games_skipped > 0 {
        println!("Skipped {} faulted game(s); see the log.", summary.games_skipped);
    }
    println!("Summary table: {}", summary.summary_path.display());
    println!("Results JSON: {}", summary.results_path.display());

    Ok(())
}
