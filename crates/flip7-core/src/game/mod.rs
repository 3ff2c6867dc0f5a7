pub mod controller;
pub mod results;
pub mod round;

pub use controller::{
    GameError, ROUND_LIMIT, WINNING_SCORE, game_seed, run_game, run_game_to,
};
pub use results::{GameResult, PlayerRoundResult, PlayerTotal, RoundEvent, RoundResult};
pub use round::{RoundError, RoundState, run_round};
