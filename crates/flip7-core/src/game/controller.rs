use crate::game::results::{GameResult, PlayerTotal, RoundResult};
use crate::game::round::{RoundError, run_round};
use crate::model::player::Roster;
use crate::model::score::ScoreBoard;
use core::fmt;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Cumulative score that ends a game.
pub const WINNING_SCORE: u32 = 200;

/// Safety cap: a game that has not produced a winner by now is treated
/// as a recoverable fault rather than looping forever.
pub const ROUND_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    Round { round: u32, source: RoundError },
    RoundLimit { rounds: u32 },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Round { round, source } => {
                write!(f, "round {round} failed: {source}")
            }
            GameError::RoundLimit { rounds } => {
                write!(f, "no winner after {rounds} rounds")
            }
        }
    }
}

impl std::error::Error for GameError {}

/// Derives the seed for one game of a tournament. SplitMix64 over the
/// tournament seed and game index, so results do not depend on which
/// worker runs which game or in what order.
pub fn game_seed(tournament_seed: u64, game_index: u64) -> u64 {
    let mut z = tournament_seed ^ game_index.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Plays one complete game at the standard 200-point target.
pub fn run_game(
    roster: &Roster,
    tournament_seed: u64,
    game_index: u64,
) -> Result<GameResult, GameError> {
    run_game_to(roster, WINNING_SCORE, game_seed(tournament_seed, game_index))
}

/// Plays rounds with fresh decks and hands until a cumulative total
/// reaches `winning_score`. Per-round deck seeds come from a `StdRng`
/// seeded with the game seed, so the whole game replays from one value.
pub fn run_game_to(
    roster: &Roster,
    winning_score: u32,
    seed: u64,
) -> Result<GameResult, GameError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut scores = ScoreBoard::new(roster.len());
    let mut rounds: Vec<RoundResult> = Vec::new();

    for round_number in 1..=ROUND_LIMIT {
        let deck_seed = rng.next_u64();
        let result = run_round(deck_seed, roster).map_err(|source| GameError::Round {
            round: round_number,
            source,
        })?;

        let round_scores: Vec<u32> = result.per_player.iter().map(|p| p.score).collect();
        scores.apply_round(&round_scores);
        rounds.push(result);

        if let Some(winner) = scores.winner(winning_score) {
            let final_scores = roster
                .ids()
                .map(|id| PlayerTotal {
                    id,
                    name: roster.player(id).name().to_string(),
                    total: scores.total(id),
                })
                .collect();
            return Ok(GameResult {
                seed,
                rounds_played: round_number,
                final_scores,
                winner,
                rounds,
            });
        }
    }

    Err(GameError::RoundLimit {
        rounds: ROUND_LIMIT,
    })
}
