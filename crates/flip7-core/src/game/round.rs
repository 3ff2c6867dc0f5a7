use crate::game::results::{PlayerRoundResult, RoundEvent, RoundResult};
use crate::model::card::{ActionKind, Card};
use crate::model::deck::Deck;
use crate::model::hand::{DrawOutcome, Hand, HandError};
use crate::model::player::{PlayerId, Roster};
use crate::model::score::hand_score;
use crate::strategy::{PublicHand, SecondChanceOutcome, Strategy, TableView, TurnDecision};
use core::fmt;

/// Cards a Flip Three target is forced to draw.
pub const FLIP_THREE_DRAWS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    InProgress,
    Complete,
}

/// Faults that abort a round. These indicate a broken strategy or a
/// state-machine bug, not a normal game outcome; callers isolate the
/// offending game and keep the tournament running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundError {
    Hand {
        player: PlayerId,
        source: HandError,
    },
    InvalidTarget {
        player: PlayerId,
        target: PlayerId,
        action: ActionKind,
    },
}

impl fmt::Display for RoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundError::Hand { player, source } => {
                write!(f, "hand contract violated for {player}: {source}")
            }
            RoundError::InvalidTarget {
                player,
                target,
                action,
            } => write!(f, "{player} chose invalid {action} target {target}"),
        }
    }
}

impl std::error::Error for RoundError {}

/// One round of play: a shuffled deck, one hand per seated player, and
/// the repeating turn loop. The deck is owned here for the round's
/// lifetime and discarded with the hands once scores are folded in.
pub struct RoundState {
    deck: Deck,
    hands: Vec<Hand>,
    phase: RoundPhase,
    events: Vec<RoundEvent>,
}

/// Plays a full round on a deck shuffled from `deck_seed`. Identical
/// seed and roster reproduce the identical result.
pub fn run_round(deck_seed: u64, roster: &Roster) -> Result<RoundResult, RoundError> {
    RoundState::new(Deck::shuffled_with_seed(deck_seed), roster.len()).run(roster)
}

impl RoundState {
    pub fn new(deck: Deck, players: usize) -> Self {
        Self {
            deck,
            hands: (0..players).map(|_| Hand::new()).collect(),
            phase: RoundPhase::InProgress,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn hand(&self, id: PlayerId) -> &Hand {
        &self.hands[id.index()]
    }

    /// Drives the round to completion: the opening card to every seat,
    /// then repeated turn cycles until all hands are terminal or the
    /// deck runs dry.
    pub fn run(mut self, roster: &Roster) -> Result<RoundResult, RoundError> {
        self.opening_deal(roster)?;
        while matches!(self.phase, RoundPhase::InProgress) {
            self.play_cycle(roster)?;
        }
        Ok(self.finish(roster))
    }

    /// One card to each player in seat order. Action cards dealt here
    /// resolve immediately, so a seat can already be terminal by the
    /// time its card would come.
    fn opening_deal(&mut self, roster: &Roster) -> Result<(), RoundError> {
        for index in 0..self.hands.len() {
            if matches!(self.phase, RoundPhase::Complete) {
                break;
            }
            if !self.hands[index].is_active() {
                continue;
            }
            self.draw_for(PlayerId::new(index), roster)?;
        }
        Ok(())
    }

    fn play_cycle(&mut self, roster: &Roster) -> Result<(), RoundError> {
        for index in 0..self.hands.len() {
            if matches!(self.phase, RoundPhase::Complete) {
                return Ok(());
            }
            if !self.hands[index].is_active() {
                continue;
            }
            let id = PlayerId::new(index);
            let decision = {
                let snapshot = self.snapshot();
                let view = TableView::new(id, &snapshot);
                roster.player(id).strategy().decide(&self.hands[index], &view)
            };
            match decision {
                TurnDecision::Stay => {
                    self.hands[index]
                        .stay()
                        .map_err(|source| RoundError::Hand { player: id, source })?;
                    self.events.push(RoundEvent::Stayed { player: id });
                }
                TurnDecision::Draw => {
                    self.draw_for(id, roster)?;
                }
            }
            self.refresh_phase();
        }
        self.refresh_phase();
        Ok(())
    }

    /// Resolves a single draw for `id`, including any action card it
    /// turns up. Also the path taken by Flip Three forced draws.
    /// Returns whether a card actually left the deck.
    fn draw_for(&mut self, id: PlayerId, roster: &Roster) -> Result<bool, RoundError> {
        let Some(card) = self.deck.draw() else {
            self.exhaust_deck();
            return Ok(false);
        };
        self.events.push(RoundEvent::Drew { player: id, card });

        match card {
            Card::Number(value) => {
                let outcome = self.hands[id.index()]
                    .take_number(value)
                    .map_err(|source| RoundError::Hand { player: id, source })?;
                match outcome {
                    DrawOutcome::Added { flip_seven: true } => {
                        self.events.push(RoundEvent::FlipSeven { player: id });
                    }
                    DrawOutcome::Added { flip_seven: false } => {}
                    DrawOutcome::DuplicateSaved => {
                        self.events.push(RoundEvent::SecondChanceUsed {
                            player: id,
                            duplicate: value,
                        });
                    }
                    DrawOutcome::Busted => {
                        self.events.push(RoundEvent::Busted {
                            player: id,
                            duplicate: value,
                        });
                    }
                }
            }
            Card::Modifier(kind) => {
                self.hands[id.index()]
                    .take_modifier(kind)
                    .map_err(|source| RoundError::Hand { player: id, source })?;
            }
            Card::Action(kind) => self.resolve_action(id, kind, roster)?,
        }

        self.refresh_phase();
        Ok(true)
    }

    fn resolve_action(
        &mut self,
        actor: PlayerId,
        kind: ActionKind,
        roster: &Roster,
    ) -> Result<(), RoundError> {
        match kind {
            ActionKind::Freeze => {
                match self.pick_target(actor, kind, roster)? {
                    Some(target) => {
                        self.hands[target.index()].freeze().map_err(|source| {
                            RoundError::Hand {
                                player: target,
                                source,
                            }
                        })?;
                        self.events.push(RoundEvent::Froze {
                            player: actor,
                            target,
                        });
                    }
                    None => self.discard_action(actor, kind),
                }
            }
            ActionKind::FlipThree => {
                match self.pick_target(actor, kind, roster)? {
                    Some(target) => {
                        let mut cards_drawn = 0;
                        for _ in 0..FLIP_THREE_DRAWS {
                            if matches!(self.phase, RoundPhase::Complete)
                                || !self.hands[target.index()].is_active()
                            {
                                break;
                            }
                            if self.draw_for(target, roster)? {
                                cards_drawn += 1;
                            }
                        }
                        self.events.push(RoundEvent::FlipThree {
                            player: actor,
                            target,
                            cards_drawn,
                        });
                    }
                    None => self.discard_action(actor, kind),
                }
            }
            ActionKind::SecondChance => {
                let outcome = {
                    let snapshot = self.snapshot();
                    let view = TableView::new(actor, &snapshot);
                    roster.player(actor).strategy().second_chance(&view)
                };
                match outcome {
                    SecondChanceOutcome::Keep => {
                        self.hands[actor.index()]
                            .grant_second_chance()
                            .map_err(|source| RoundError::Hand {
                                player: actor,
                                source,
                            })?;
                        self.events
                            .push(RoundEvent::SecondChanceKept { player: actor });
                    }
                    SecondChanceOutcome::Give(target) => {
                        self.ensure_opponent(actor, target, kind)?;
                        if self.hands[target.index()].has_second_chance() {
                            return Err(RoundError::InvalidTarget {
                                player: actor,
                                target,
                                action: kind,
                            });
                        }
                        self.hands[target.index()]
                            .grant_second_chance()
                            .map_err(|source| RoundError::Hand {
                                player: target,
                                source,
                            })?;
                        self.events.push(RoundEvent::SecondChanceGiven {
                            player: actor,
                            target,
                        });
                    }
                    SecondChanceOutcome::Discard => self.discard_action(actor, kind),
                }
            }
        }
        Ok(())
    }

    /// Asks the actor's strategy for a Freeze/Flip Three target. Zero
    /// eligible opponents is a defined no-op; an ineligible pick is a
    /// broken strategy and faults the round.
    fn pick_target(
        &self,
        actor: PlayerId,
        kind: ActionKind,
        roster: &Roster,
    ) -> Result<Option<PlayerId>, RoundError> {
        let snapshot = self.snapshot();
        let view = TableView::new(actor, &snapshot);
        if view.active_opponents().next().is_none() {
            return Ok(None);
        }
        let strategy = roster.player(actor).strategy();
        let target = match kind {
            ActionKind::Freeze => strategy.freeze_target(&view),
            ActionKind::FlipThree => strategy.flip_three_target(&view),
            ActionKind::SecondChance => unreachable!("second chance has no target query"),
        };
        if let Some(target) = target {
            self.ensure_opponent(actor, target, kind)?;
        }
        Ok(target)
    }

    fn ensure_opponent(
        &self,
        actor: PlayerId,
        target: PlayerId,
        action: ActionKind,
    ) -> Result<(), RoundError> {
        let eligible = target != actor
            && target.index() < self.hands.len()
            && self.hands[target.index()].is_active();
        if eligible {
            Ok(())
        } else {
            Err(RoundError::InvalidTarget {
                player: actor,
                target,
                action,
            })
        }
    }

    fn discard_action(&mut self, actor: PlayerId, action: ActionKind) {
        self.events.push(RoundEvent::ActionDiscarded {
            player: actor,
            action,
        });
    }

    /// Deck exhaustion ends the round: remaining active hands bank
    /// their current score as if they had stayed.
    fn exhaust_deck(&mut self) {
        for hand in &mut self.hands {
            if hand.is_active() {
                let _ = hand.stay();
            }
        }
        self.events.push(RoundEvent::DeckExhausted);
        self.phase = RoundPhase::Complete;
    }

    fn refresh_phase(&mut self) {
        if self.hands.iter().all(|hand| !hand.is_active()) {
            self.phase = RoundPhase::Complete;
        }
    }

    fn snapshot(&self) -> Vec<PublicHand> {
        self.hands
            .iter()
            .enumerate()
            .map(|(index, hand)| PublicHand::observe(PlayerId::new(index), hand))
            .collect()
    }

    fn finish(self, roster: &Roster) -> RoundResult {
        let per_player: Vec<PlayerRoundResult> = self
            .hands
            .iter()
            .enumerate()
            .map(|(index, hand)| {
                let id = PlayerId::new(index);
                PlayerRoundResult {
                    id,
                    name: roster.player(id).name().to_string(),
                    score: hand_score(hand),
                    status: hand.status(),
                    flip_seven: hand.is_flip_seven(),
                }
            })
            .collect();

        let mut winner = 0;
        for (index, result) in per_player.iter().enumerate() {
            if result.score > per_player[winner].score {
                winner = index;
            }
        }

        RoundResult {
            per_player,
            winner: PlayerId::new(winner),
            events: self.events,
        }
    }
}
