use flip7_bot::StrategyConfig;
use flip7_core::game::GameResult;
use flip7_core::model::hand::HandStatus;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};

/// Two-sided confidence level for win-rate intervals.
const CONFIDENCE: f64 = 0.95;

/// Accumulates per-entrant results as games finish.
pub struct StandingsCollector {
    stats: Vec<PlayerStats>,
}

struct PlayerStats {
    name: String,
    strategy: String,
    class: &'static str,
    wins: u32,
    games: u32,
    total_points: u64,
    total_rounds: u32,
    busts: u32,
    stays: u32,
    flip_sevens: u32,
    frozen: u32,
}

impl StandingsCollector {
    pub fn new(entrants: &[(String, StrategyConfig)]) -> Self {
        let stats = entrants
            .iter()
            .map(|(name, config)| PlayerStats {
                name: name.clone(),
                strategy: config.label(),
                class: class_of(config),
                wins: 0,
                games: 0,
                total_points: 0,
                total_rounds: 0,
                busts: 0,
                stays: 0,
                flip_sevens: 0,
                frozen: 0,
            })
            .collect();
        Self { stats }
    }

    /// Folds one finished game in. `group[seat]` maps roster seats back
    /// to entrant indices.
    pub fn record_game(&mut self, group: &[usize], result: &GameResult) {
        for (seat, &entrant) in group.iter().enumerate() {
            let stats = &mut self.stats[entrant];
            stats.games += 1;
            stats.total_rounds += result.rounds_played;
            stats.total_points += u64::from(result.final_scores[seat].total);
            if result.winner.index() == seat {
                stats.wins += 1;
            }

            for round in &result.rounds {
                let player = &round.per_player[seat];
                match player.status {
                    HandStatus::Busted => stats.busts += 1,
                    HandStatus::Frozen => stats.frozen += 1,
                    HandStatus::Stayed if player.flip_seven => stats.flip_sevens += 1,
                    HandStatus::Stayed => stats.stays += 1,
                    HandStatus::Active => {}
                }
            }
        }
    }

    /// Rankings sorted by wins, then average score; stable on full ties.
    pub fn finalize(self) -> LeagueStandings {
        let z = normal_quantile();
        let mut rankings: Vec<LeaderboardEntry> = self
            .stats
            .iter()
            .map(|stats| {
                let average_score = if stats.games == 0 {
                    0.0
                } else {
                    stats.total_points as f64 / f64::from(stats.games)
                };
                let (win_rate_low, win_rate_high) =
                    win_rate_interval(stats.wins, stats.games, z);
                LeaderboardEntry {
                    rank: 0,
                    name: stats.name.clone(),
                    strategy: stats.strategy.clone(),
                    class: stats.class,
                    wins: stats.wins,
                    games: stats.games,
                    win_rate: win_rate(stats.wins, stats.games),
                    win_rate_low,
                    win_rate_high,
                    average_score,
                    total_rounds: stats.total_rounds,
                    busts: stats.busts,
                    stays: stats.stays,
                    flip_sevens: stats.flip_sevens,
                    frozen: stats.frozen,
                }
            })
            .collect();

        rankings.sort_by(|a, b| {
            b.wins
                .cmp(&a.wins)
                .then_with(|| b.average_score.total_cmp(&a.average_score))
        });
        for (index, entry) in rankings.iter_mut().enumerate() {
            entry.rank = index + 1;
        }

        let classes = class_summaries(&rankings);
        LeagueStandings { rankings, classes }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub name: String,
    pub strategy: String,
    pub class: &'static str,
    pub wins: u32,
    pub games: u32,
    pub win_rate: f64,
    pub win_rate_low: f64,
    pub win_rate_high: f64,
    pub average_score: f64,
    pub total_rounds: u32,
    pub busts: u32,
    pub stays: u32,
    pub flip_sevens: u32,
    pub frozen: u32,
}

/// Aggregate over every entrant sharing a condition class.
#[derive(Debug, Clone, Serialize)]
pub struct ClassSummary {
    pub class: &'static str,
    pub entrants: usize,
    pub wins: u32,
    pub games: u32,
    pub win_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeagueStandings {
    pub rankings: Vec<LeaderboardEntry>,
    pub classes: Vec<ClassSummary>,
}

fn class_summaries(rankings: &[LeaderboardEntry]) -> Vec<ClassSummary> {
    const CLASSES: [&str; 7] = [
        "score",
        "hand",
        "high",
        "score+hand",
        "score+high",
        "hand+high",
        "score+hand+high",
    ];

    let mut summaries: Vec<ClassSummary> = CLASSES
        .iter()
        .filter_map(|&class| {
            let members: Vec<_> = rankings.iter().filter(|e| e.class == class).collect();
            if members.is_empty() {
                return None;
            }
            let wins = members.iter().map(|e| e.wins).sum();
            let games = members.iter().map(|e| e.games).sum();
            Some(ClassSummary {
                class,
                entrants: members.len(),
                wins,
                games,
                win_rate: win_rate(wins, games),
            })
        })
        .collect();
    summaries.sort_by(|a, b| b.win_rate.total_cmp(&a.win_rate));
    summaries
}

fn class_of(config: &StrategyConfig) -> &'static str {
    match (
        config.score_threshold.is_some(),
        config.hand_size_limit.is_some(),
        config.high_value_threshold.is_some(),
    ) {
        (true, false, false) => "score",
        (false, true, false) => "hand",
        (false, false, true) => "high",
        (true, true, false) => "score+hand",
        (true, false, true) => "score+high",
        (false, true, true) => "hand+high",
        (true, true, true) => "score+hand+high",
        (false, false, false) => "none",
    }
}

fn win_rate(wins: u32, games: u32) -> f64 {
    if games == 0 {
        0.0
    } else {
        f64::from(wins) / f64::from(games) * 100.0
    }
}

fn normal_quantile() -> f64 {
    let normal = Normal::new(0.0, 1.0).expect("unit normal is well-formed");
    normal.inverse_cdf(0.5 + CONFIDENCE / 2.0)
}

/// Normal-approximation interval on the win rate, clamped to [0, 100],
/// reported in percent like `win_rate`.
fn win_rate_interval(wins: u32, games: u32, z: f64) -> (f64, f64) {
    if games == 0 {
        return (0.0, 0.0);
    }
    let n = f64::from(games);
    let p = f64::from(wins) / n;
    let spread = z * (p * (1.0 - p) / n).sqrt();
    (
        ((p - spread).max(0.0)) * 100.0,
        ((p + spread).min(1.0)) * 100.0,
    )
}
