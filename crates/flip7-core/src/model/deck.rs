use crate::model::card::{ActionKind, Card, MAX_NUMBER, ModifierKind};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::VecDeque;

/// Total cards in the fixed composition: 79 numbers, 6 modifiers, 9 actions.
pub const DECK_SIZE: usize = 94;

#[derive(Debug, Clone)]
pub struct Deck {
    cards: VecDeque<Card>,
}

impl Deck {
    /// The fixed composition, unshuffled: one 0, `n` copies of each number
    /// `n` in 1..=12, one of each modifier, three of each action.
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        cards.push(Card::Number(0));
        for value in 1..=MAX_NUMBER {
            for _ in 0..value {
                cards.push(Card::Number(value));
            }
        }
        for kind in ModifierKind::ALL {
            cards.push(Card::Modifier(kind));
        }
        for kind in ActionKind::ALL {
            for _ in 0..ActionKind::COPIES {
                cards.push(Card::Action(kind));
            }
        }
        Self {
            cards: VecDeque::from(cards),
        }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    /// Explicit draw order, front card first. Used to construct scenarios.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self {
            cards: VecDeque::from(cards),
        }
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.make_contiguous().shuffle(rng);
    }

    /// Removes and returns the next card; `None` once exhausted.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{DECK_SIZE, Deck};
    use crate::model::card::{ActionKind, Card, MAX_NUMBER, ModifierKind};

    #[test]
    fn standard_composition_is_fixed() {
        let deck = Deck::standard();
        assert_eq!(deck.len(), DECK_SIZE);

        for value in 0..=MAX_NUMBER {
            let copies = deck
                .cards()
                .filter(|card| **card == Card::Number(value))
                .count();
            let expected = if value == 0 { 1 } else { value as usize };
            assert_eq!(copies, expected, "number {value} copy count");
        }

        for kind in ModifierKind::ALL {
            let copies = deck
                .cards()
                .filter(|card| **card == Card::Modifier(kind))
                .count();
            assert_eq!(copies, 1, "modifier {kind} copy count");
        }

        for kind in ActionKind::ALL {
            let copies = deck
                .cards()
                .filter(|card| **card == Card::Action(kind))
                .count();
            assert_eq!(copies, ActionKind::COPIES, "action {kind} copy count");
        }
    }

    #[test]
    fn shuffle_preserves_composition() {
        let shuffled = Deck::shuffled_with_seed(7);
        let mut reference: Vec<_> = Deck::standard().cards().copied().collect();
        let mut cards: Vec<_> = shuffled.cards().copied().collect();
        let key = |card: &Card| format!("{card:?}");
        reference.sort_by_key(key);
        cards.sort_by_key(key);
        assert_eq!(cards, reference);
    }

    #[test]
    fn shuffle_with_seed_is_deterministic() {
        let deck_a: Vec<_> = Deck::shuffled_with_seed(42).cards().copied().collect();
        let deck_b: Vec<_> = Deck::shuffled_with_seed(42).cards().copied().collect();
        assert_eq!(deck_a, deck_b);
    }

    #[test]
    fn shuffle_with_different_seeds_differs() {
        let deck_a: Vec<_> = Deck::shuffled_with_seed(1).cards().copied().collect();
        let deck_b: Vec<_> = Deck::shuffled_with_seed(2).cards().copied().collect();
        assert_ne!(deck_a, deck_b);
    }

    #[test]
    fn draw_consumes_front_first_until_exhausted() {
        let mut deck = Deck::from_cards(vec![Card::Number(3), Card::Number(9)]);
        assert_eq!(deck.draw(), Some(Card::Number(3)));
        assert_eq!(deck.draw(), Some(Card::Number(9)));
        assert_eq!(deck.draw(), None);
        assert!(deck.is_empty());
    }
}
