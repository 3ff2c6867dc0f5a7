use crate::strategy::Strategy;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Index of a player within a roster. Turn order and every tie-break
/// follow ascending ids.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct PlayerId(usize);

impl PlayerId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// A seated player: identity plus an assigned strategy. Cumulative
/// scores live in the `ScoreBoard`, round state in the `Hand`.
pub struct Player {
    name: String,
    strategy: Box<dyn Strategy>,
}

impl Player {
    pub fn new(name: impl Into<String>, strategy: Box<dyn Strategy>) -> Self {
        Self {
            name: name.into(),
            strategy,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn strategy(&self) -> &dyn Strategy {
        self.strategy.as_ref()
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player").field("name", &self.name).finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterError {
    TooFewPlayers { found: usize },
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::TooFewPlayers { found } => write!(
                f,
                "a roster needs at least {} players, found {found}",
                Roster::MIN_PLAYERS
            ),
        }
    }
}

impl std::error::Error for RosterError {}

/// Ordered, fixed set of players for one game.
#[derive(Debug)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    pub const MIN_PLAYERS: usize = 2;

    pub fn new(players: Vec<Player>) -> Result<Self, RosterError> {
        if players.len() < Self::MIN_PLAYERS {
            return Err(RosterError::TooFewPlayers {
                found: players.len(),
            });
        }
        Ok(Self { players })
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        (0..self.players.len()).map(PlayerId::new)
    }
}
