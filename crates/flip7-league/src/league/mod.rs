mod standings;

pub use standings::{ClassSummary, LeaderboardEntry, LeagueStandings, StandingsCollector};

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use flip7_bot::{StrategyConfig, ThresholdStrategy, catalog_from_sets};
use flip7_core::game::{GameError, GameResult, game_seed, run_game_to};
use flip7_core::model::hand::HandStatus;
use flip7_core::model::player::{Player, Roster};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{LeagueConfig, ResolvedOutputs};

/// Primary entry point for running a league.
pub struct LeagueRunner {
    config: LeagueConfig,
    outputs: ResolvedOutputs,
    entrants: Vec<(String, StrategyConfig)>,
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub entrants: usize,
    pub turns: usize,
    pub games_played: usize,
    pub games_skipped: usize,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
    pub results_path: PathBuf,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("{0}")]
    Strategy(#[from] flip7_bot::InvalidStrategyConfig),
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize output: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
}

impl LeagueRunner {
    /// Build a runner from a validated configuration. The entrant pool
    /// is enumerated here, so an invalid strategy value still fails
    /// before any game runs.
    pub fn new(config: LeagueConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        let configs = catalog_from_sets(
            &config.strategies.score_thresholds,
            &config.strategies.hand_size_limits,
            &config.strategies.high_value_thresholds,
        )?;
        let width = configs.len().to_string().len().max(3);
        let entrants = configs
            .into_iter()
            .enumerate()
            .map(|(index, cfg)| {
                (format!("P{:0width$}_{}", index + 1, cfg.label()), cfg)
            })
            .collect();

        Ok(Self {
            config,
            outputs,
            entrants,
        })
    }

    pub fn entrants(&self) -> usize {
        self.entrants.len()
    }

    /// Execute the league, streaming JSONL rows to disk and writing the
    /// summary artifacts at the end.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;
        ensure_parent(self.outputs.results_json.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let tournament_seed = self.config.league.seed.unwrap_or(0);
        let mut rng = StdRng::seed_from_u64(tournament_seed);
        let mut collector = StandingsCollector::new(&self.entrants);

        let players_per_game = self.config.league.players_per_game;
        let games_per_turn = self.entrants.len() / players_per_game;
        let mut rows_written = 0usize;
        let mut games_played = 0usize;
        let mut games_skipped = 0usize;

        for turn in 0..self.config.league.turns {
            // Matchmaking: shuffle the whole pool, then split it into
            // consecutive groups. The shuffle consumes the master rng,
            // so every turn pairs differently but reproducibly.
            let mut order: Vec<usize> = (0..self.entrants.len()).collect();
            order.shuffle(&mut rng);

            let groups: Vec<(u64, Vec<usize>)> = order
                .chunks(players_per_game)
                .enumerate()
                .map(|(slot, chunk)| {
                    ((turn * games_per_turn + slot) as u64, chunk.to_vec())
                })
                .collect();

            // Games share nothing mutable; their seeds depend only on
            // (tournament_seed, game_index), so workers may interleave
            // freely without perturbing results.
            let outcomes: Vec<(u64, Vec<usize>, Result<GameResult, GameError>)> = groups
                .into_par_iter()
                .map(|(game_index, group)| {
                    let outcome = self.play_game(tournament_seed, game_index, &group);
                    (game_index, group, outcome)
                })
                .collect();

            for (game_index, group, outcome) in outcomes {
                match outcome {
                    Ok(result) => {
                        collector.record_game(&group, &result);
                        rows_written += self.write_game_rows(
                            &mut writer,
                            turn,
                            game_index,
                            &group,
                            &result,
                        )?;
                        games_played += 1;
                    }
                    Err(err) => {
                        // One bad game must not sink the league.
                        warn!(
                            target: "flip7_league::run",
                            game_index,
                            error = %err,
                            "skipping failed game"
                        );
                        games_skipped += 1;
                    }
                }
            }
            info!(
                target: "flip7_league::run",
                turn,
                games_played,
                "turn complete"
            );
        }

        writer.flush()?;

        let standings = collector.finalize();
        self.write_summary_markdown(&standings, games_played, games_skipped)?;
        self.write_results_json(&standings, games_played, games_skipped)?;

        Ok(RunSummary {
            entrants: self.entrants.len(),
            turns: self.config.league.turns,
            games_played,
            games_skipped,
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            results_path: self.outputs.results_json.clone(),
        })
    }

    fn play_game(
        &self,
        tournament_seed: u64,
        game_index: u64,
        group: &[usize],
    ) -> Result<GameResult, GameError> {
        let players: Vec<Player> = group
            .iter()
            .map(|&entrant| {
                let (name, config) = &self.entrants[entrant];
                let strategy = ThresholdStrategy::new(*config)
                    .expect("entrant configurations are validated at construction");
                Player::new(name.clone(), Box::new(strategy))
            })
            .collect();
        let roster = Roster::new(players).expect("groups hold at least two players");
        run_game_to(
            &roster,
            self.config.league.winning_score,
            game_seed(tournament_seed, game_index),
        )
    }

    fn write_game_rows(
        &self,
        writer: &mut BufWriter<File>,
        turn: usize,
        game_index: u64,
        group: &[usize],
        result: &GameResult,
    ) -> Result<usize, RunnerError> {
        let game_id = format!("T{turn:03}_G{game_index:05}");
        let mut rows_written = 0usize;

        for (seat, &entrant) in group.iter().enumerate() {
            let (name, config) = &self.entrants[entrant];
            let mut busts = 0u32;
            let mut stays = 0u32;
            let mut flip_sevens = 0u32;
            let mut frozen = 0u32;
            for round in &result.rounds {
                let player = &round.per_player[seat];
                match player.status {
                    HandStatus::Busted => busts += 1,
                    HandStatus::Frozen => frozen += 1,
                    HandStatus::Stayed if player.flip_seven => flip_sevens += 1,
                    HandStatus::Stayed => stays += 1,
                    HandStatus::Active => {}
                }
            }

            let row = GameLogRow {
                run_id: &self.config.run_id,
                game_id: &game_id,
                turn,
                game_index,
                game_seed: result.seed,
                player: name,
                strategy: config.label(),
                score: result.final_scores[seat].total,
                won: result.winner.index() == seat,
                rounds_played: result.rounds_played,
                busts,
                stays,
                flip_sevens,
                frozen,
            };
            serde_json::to_writer(&mut *writer, &row)?;
            writer.write_all(b"\n")?;
            rows_written += 1;
        }

        Ok(rows_written)
    }

    fn write_summary_markdown(
        &self,
        standings: &LeagueStandings,
        games_played: usize,
        games_skipped: usize,
    ) -> Result<(), RunnerError> {
        let mut out = String::new();
        out.push_str(&format!("# Flip 7 League — {}\n\n", self.config.run_id));
        out.push_str(&format!(
            "- Entrants: {}\n- Turns: {}\n- Games played: {games_played}\n",
            self.entrants.len(),
            self.config.league.turns,
        ));
        if games_skipped > 0 {
            out.push_str(&format!("- Games skipped: {games_skipped}\n"));
        }
        out.push_str(&format!(
            "- Seed: {}\n- Winning score: {}\n\n",
            self.config.league.seed.unwrap_or(0),
            self.config.league.winning_score,
        ));

        out.push_str("## Condition classes\n\n");
        out.push_str("| Class | Entrants | Wins | Games | Win% |\n");
        out.push_str("|---|---:|---:|---:|---:|\n");
        for class in &standings.classes {
            out.push_str(&format!(
                "| {} | {} | {} | {} | {:.1} |\n",
                class.class, class.entrants, class.wins, class.games, class.win_rate
            ));
        }

        out.push_str("\n## Standings\n\n");
        out.push_str(
            "| Rank | Player | Wins | Games | Win% | 95% CI | Avg Score | Busts | Stays | Flip7s | Frozen |\n",
        );
        out.push_str("|---:|---|---:|---:|---:|---|---:|---:|---:|---:|---:|\n");
        for entry in &standings.rankings {
            out.push_str(&format!(
                "| {} | {} | {} | {} | {:.1} | {:.1}–{:.1} | {:.1} | {} | {} | {} | {} |\n",
                entry.rank,
                entry.name,
                entry.wins,
                entry.games,
                entry.win_rate,
                entry.win_rate_low,
                entry.win_rate_high,
                entry.average_score,
                entry.busts,
                entry.stays,
                entry.flip_sevens,
                entry.frozen,
            ));
        }

        fs::write(&self.outputs.summary_md, out)?;
        Ok(())
    }

    fn write_results_json(
        &self,
        standings: &LeagueStandings,
        games_played: usize,
        games_skipped: usize,
    ) -> Result<(), RunnerError> {
        let report = LeagueReport {
            league_info: LeagueInfo {
                run_id: &self.config.run_id,
                total_players: self.entrants.len(),
                total_games: games_played,
                games_skipped,
                seed: self.config.league.seed.unwrap_or(0),
                turns: self.config.league.turns,
                players_per_game: self.config.league.players_per_game,
                winning_score: self.config.league.winning_score,
            },
            standings,
        };
        let file = BufWriter::new(File::create(&self.outputs.results_json)?);
        serde_json::to_writer_pretty(file, &report)?;
        Ok(())
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[derive(Serialize)]
struct GameLogRow<'a> {
    run_id: &'a str,
    game_id: &'a str,
    turn: usize,
    game_index: u64,
    game_seed: u64,
    player: &'a str,
    strategy: String,
    score: u32,
    won: bool,
    rounds_played: u32,
    busts: u32,
    stays: u32,
    flip_sevens: u32,
    frozen: u32,
}

#[derive(Serialize)]
struct LeagueInfo<'a> {
    run_id: &'a str,
    total_players: usize,
    total_games: usize,
    games_skipped: usize,
    seed: u64,
    turns: usize,
    players_per_game: usize,
    winning_score: u32,
}

#[derive(Serialize)]
struct LeagueReport<'a> {
    league_info: LeagueInfo<'a>,
    standings: &'a LeagueStandings,
}

#[cfg(test)]
mod tests {
    use super::LeagueRunner;
    use crate::config::LeagueConfig;

    fn tiny_config(dir: &std::path::Path) -> LeagueConfig {
        let yaml = format!(
            r#"
run_id: "unit"
league:
  seed: 9
  turns: 1
  players_per_game: 7
strategies:
  score_thresholds: [20]
  hand_size_limits: [4]
  high_value_thresholds: [10]
outputs:
  jsonl: "{dir}/games.jsonl"
  summary_md: "{dir}/summary.md"
  results_json: "{dir}/results.json"
"#,
            dir = dir.display()
        );
        let cfg: LeagueConfig = serde_yaml::from_str(&yaml).expect("valid yaml");
        cfg.validate().expect("config validates");
        cfg
    }

    #[test]
    fn entrant_names_are_unique_and_labelled() {
        let dir = std::env::temp_dir();
        let config = tiny_config(&dir);
        let outputs = config.resolved_outputs();
        let runner = LeagueRunner::new(config, outputs).expect("runner builds");
        assert_eq!(runner.entrants(), 7);

        let mut names: Vec<_> = runner.entrants.iter().map(|(n, _)| n.clone()).collect();
        assert!(names.iter().any(|n| n.ends_with("score20")));
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 7);
    }
}
