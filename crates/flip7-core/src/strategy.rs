use crate::model::hand::{Hand, HandStatus};
use crate::model::player::PlayerId;

/// Hit-or-stay decision, queried only while a hand is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnDecision {
    Draw,
    Stay,
}

/// Where a drawn Second Chance card goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondChanceOutcome {
    Keep,
    Give(PlayerId),
    Discard,
}

/// Publicly observable per-player state. Targeting decisions see only
/// this much; exact held values are never exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicHand {
    pub id: PlayerId,
    pub status: HandStatus,
    pub number_sum: u32,
    pub number_count: usize,
    pub has_second_chance: bool,
}

impl PublicHand {
    pub fn observe(id: PlayerId, hand: &Hand) -> Self {
        Self {
            id,
            status: hand.status(),
            number_sum: hand.number_sum(),
            number_count: hand.number_count(),
            has_second_chance: hand.has_second_chance(),
        }
    }
}

/// Snapshot handed to strategies: the acting player plus the public
/// state of every seat at the table.
#[derive(Debug, Clone, Copy)]
pub struct TableView<'a> {
    actor: PlayerId,
    players: &'a [PublicHand],
}

impl<'a> TableView<'a> {
    pub fn new(actor: PlayerId, players: &'a [PublicHand]) -> Self {
        Self { actor, players }
    }

    pub fn actor(&self) -> PlayerId {
        self.actor
    }

    pub fn players(&self) -> &[PublicHand] {
        self.players
    }

    pub fn me(&self) -> &PublicHand {
        &self.players[self.actor.index()]
    }

    pub fn opponents(&self) -> impl Iterator<Item = &PublicHand> + '_ {
        let actor = self.actor;
        self.players.iter().filter(move |p| p.id != actor)
    }

    pub fn active_opponents(&self) -> impl Iterator<Item = &PublicHand> + '_ {
        self.opponents()
            .filter(|p| matches!(p.status, HandStatus::Active))
    }
}

/// Decision seam between the round state machine and a player's brain.
/// All methods are pure with respect to the views they receive; the
/// engine snapshots state fresh before every call.
pub trait Strategy: Send + Sync {
    /// Draw another card or bank the current hand.
    fn decide(&self, hand: &Hand, table: &TableView<'_>) -> TurnDecision;

    /// Opponent to freeze after drawing a Freeze card.
    fn freeze_target(&self, table: &TableView<'_>) -> Option<PlayerId>;

    /// Opponent forced to draw after a Flip Three card.
    fn flip_three_target(&self, table: &TableView<'_>) -> Option<PlayerId>;

    /// Disposition of a drawn Second Chance card.
    fn second_chance(&self, table: &TableView<'_>) -> SecondChanceOutcome;
}

#[cfg(test)]
mod tests {
    use super::{PublicHand, TableView};
    use crate::model::hand::{Hand, HandStatus};
    use crate::model::player::PlayerId;

    fn snapshot() -> Vec<PublicHand> {
        let mut hands = vec![Hand::new(), Hand::new(), Hand::new()];
        hands[1].take_number(9).unwrap();
        hands[2].stay().unwrap();
        hands
            .iter()
            .enumerate()
            .map(|(i, hand)| PublicHand::observe(PlayerId::new(i), hand))
            .collect()
    }

    #[test]
    fn observe_captures_public_fields_only() {
        let mut hand = Hand::new();
        hand.take_number(3).unwrap();
        hand.take_number(8).unwrap();
        hand.grant_second_chance().unwrap();
        let public = PublicHand::observe(PlayerId::new(0), &hand);
        assert_eq!(public.number_sum, 11);
        assert_eq!(public.number_count, 2);
        assert!(public.has_second_chance);
        assert_eq!(public.status, HandStatus::Active);
    }

    #[test]
    fn opponents_exclude_the_actor() {
        let players = snapshot();
        let view = TableView::new(PlayerId::new(1), &players);
        let ids: Vec<_> = view.opponents().map(|p| p.id.index()).collect();
        assert_eq!(ids, vec![0, 2]);
        assert_eq!(view.me().number_sum, 9);
    }

    #[test]
    fn active_opponents_skip_terminal_hands() {
        let players = snapshot();
        let view = TableView::new(PlayerId::new(0), &players);
        let ids: Vec<_> = view.active_opponents().map(|p| p.id.index()).collect();
        assert_eq!(ids, vec![1]);
    }
}
