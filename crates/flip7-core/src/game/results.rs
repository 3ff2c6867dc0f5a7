use crate::model::card::{ActionKind, Card};
use crate::model::hand::HandStatus;
use crate::model::player::PlayerId;
use serde::{Deserialize, Serialize};

/// One entry of the round log. Every state transition the round state
/// machine applies is recorded here for downstream reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RoundEvent {
    Drew { player: PlayerId, card: Card },
    Stayed { player: PlayerId },
    Busted { player: PlayerId, duplicate: u8 },
    SecondChanceUsed { player: PlayerId, duplicate: u8 },
    FlipSeven { player: PlayerId },
    Froze { player: PlayerId, target: PlayerId },
    FlipThree { player: PlayerId, target: PlayerId, cards_drawn: usize },
    SecondChanceKept { player: PlayerId },
    SecondChanceGiven { player: PlayerId, target: PlayerId },
    ActionDiscarded { player: PlayerId, action: ActionKind },
    DeckExhausted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRoundResult {
    pub id: PlayerId,
    pub name: String,
    pub score: u32,
    pub status: HandStatus,
    pub flip_seven: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub per_player: Vec<PlayerRoundResult>,
    /// Highest round score, ties by lowest player index.
    pub winner: PlayerId,
    pub events: Vec<RoundEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerTotal {
    pub id: PlayerId,
    pub name: String,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub seed: u64,
    pub rounds_played: u32,
    pub final_scores: Vec<PlayerTotal>,
    pub winner: PlayerId,
    pub rounds: Vec<RoundResult>,
}
