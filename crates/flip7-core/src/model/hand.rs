use crate::model::card::ModifierKind;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Distinct number cards that trigger the Flip 7 bonus and forced stay.
pub const FLIP_SEVEN_COUNT: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandStatus {
    Active,
    Stayed,
    Busted,
    Frozen,
}

impl HandStatus {
    /// Every non-active status is terminal for the round.
    pub const fn is_terminal(self) -> bool {
        !matches!(self, HandStatus::Active)
    }
}

impl Default for HandStatus {
    fn default() -> Self {
        HandStatus::Active
    }
}

impl fmt::Display for HandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HandStatus::Active => "active",
            HandStatus::Stayed => "stayed",
            HandStatus::Busted => "busted",
            HandStatus::Frozen => "frozen",
        };
        f.write_str(label)
    }
}

/// Result of resolving a number card against a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    Added { flip_seven: bool },
    DuplicateSaved,
    Busted,
}

/// Contract violations: the round state machine must never mutate a
/// terminal hand or grant a second token. Surfaced so a tournament run
/// can abort just the offending game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandError {
    NotActive { status: HandStatus },
    SecondChanceHeld,
}

impl fmt::Display for HandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandError::NotActive { status } => {
                write!(f, "cannot mutate a {status} hand")
            }
            HandError::SecondChanceHeld => {
                f.write_str("hand already holds a Second Chance token")
            }
        }
    }
}

impl std::error::Error for HandError {}

#[derive(Debug, Clone, Default)]
pub struct Hand {
    numbers: Vec<u8>,
    modifiers: Vec<ModifierKind>,
    second_chances: u8,
    status: HandStatus,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> HandStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        matches!(self.status, HandStatus::Active)
    }

    /// Distinct number values held, ascending.
    pub fn numbers(&self) -> &[u8] {
        &self.numbers
    }

    pub fn number_count(&self) -> usize {
        self.numbers.len()
    }

    pub fn number_sum(&self) -> u32 {
        self.numbers.iter().map(|&v| u32::from(v)).sum()
    }

    pub fn highest_number(&self) -> Option<u8> {
        self.numbers.last().copied()
    }

    pub fn modifiers(&self) -> &[ModifierKind] {
        &self.modifiers
    }

    pub fn has_modifier(&self, kind: ModifierKind) -> bool {
        self.modifiers.contains(&kind)
    }

    pub fn second_chances(&self) -> u8 {
        self.second_chances
    }

    pub fn has_second_chance(&self) -> bool {
        self.second_chances > 0
    }

    pub fn is_flip_seven(&self) -> bool {
        self.numbers.len() == FLIP_SEVEN_COUNT
    }

    /// Resolves a drawn number card. A duplicate consumes a Second Chance
    /// token if one is held, otherwise busts the hand. The 7th distinct
    /// number transitions the hand to Stayed immediately.
    pub fn take_number(&mut self, value: u8) -> Result<DrawOutcome, HandError> {
        self.guard_active()?;
        if self.numbers.contains(&value) {
            if self.second_chances > 0 {
                self.second_chances -= 1;
                return Ok(DrawOutcome::DuplicateSaved);
            }
            self.status = HandStatus::Busted;
            return Ok(DrawOutcome::Busted);
        }

        self.numbers.push(value);
        self.numbers.sort_unstable();
        if self.numbers.len() == FLIP_SEVEN_COUNT {
            self.status = HandStatus::Stayed;
            return Ok(DrawOutcome::Added { flip_seven: true });
        }
        Ok(DrawOutcome::Added { flip_seven: false })
    }

    pub fn take_modifier(&mut self, kind: ModifierKind) -> Result<(), HandError> {
        self.guard_active()?;
        self.modifiers.push(kind);
        Ok(())
    }

    pub fn stay(&mut self) -> Result<(), HandError> {
        self.guard_active()?;
        self.status = HandStatus::Stayed;
        Ok(())
    }

    pub fn freeze(&mut self) -> Result<(), HandError> {
        self.guard_active()?;
        self.status = HandStatus::Frozen;
        Ok(())
    }

    /// Grants the Second Chance token. At most one may be held; a second
    /// token is redistributed or discarded before it ever lands here.
    pub fn grant_second_chance(&mut self) -> Result<(), HandError> {
        self.guard_active()?;
        if self.second_chances > 0 {
            return Err(HandError::SecondChanceHeld);
        }
        self.second_chances = 1;
        Ok(())
    }

    fn guard_active(&self) -> Result<(), HandError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(HandError::NotActive {
                status: self.status,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DrawOutcome, FLIP_SEVEN_COUNT, Hand, HandError, HandStatus};
    use crate::model::card::ModifierKind;

    #[test]
    fn numbers_stay_sorted_and_distinct() {
        let mut hand = Hand::new();
        hand.take_number(9).unwrap();
        hand.take_number(2).unwrap();
        hand.take_number(5).unwrap();
        assert_eq!(hand.numbers(), &[2, 5, 9]);
        assert_eq!(hand.number_sum(), 16);
        assert_eq!(hand.highest_number(), Some(9));
    }

    #[test]
    fn duplicate_without_token_busts() {
        let mut hand = Hand::new();
        hand.take_number(5).unwrap();
        assert_eq!(hand.take_number(5).unwrap(), DrawOutcome::Busted);
        assert_eq!(hand.status(), HandStatus::Busted);
    }

    #[test]
    fn duplicate_with_token_is_saved() {
        let mut hand = Hand::new();
        hand.take_number(5).unwrap();
        hand.grant_second_chance().unwrap();
        assert_eq!(hand.take_number(5).unwrap(), DrawOutcome::DuplicateSaved);
        assert!(hand.is_active());
        assert_eq!(hand.second_chances(), 0);
        assert_eq!(hand.numbers(), &[5]);
    }

    #[test]
    fn seventh_distinct_number_forces_stay() {
        let mut hand = Hand::new();
        for value in 1..FLIP_SEVEN_COUNT as u8 {
            assert_eq!(
                hand.take_number(value).unwrap(),
                DrawOutcome::Added { flip_seven: false }
            );
        }
        assert_eq!(
            hand.take_number(7).unwrap(),
            DrawOutcome::Added { flip_seven: true }
        );
        assert_eq!(hand.status(), HandStatus::Stayed);
        assert!(hand.is_flip_seven());
    }

    #[test]
    fn terminal_hand_rejects_mutation() {
        let mut hand = Hand::new();
        hand.stay().unwrap();
        assert_eq!(
            hand.take_number(1),
            Err(HandError::NotActive {
                status: HandStatus::Stayed
            })
        );
        assert_eq!(
            hand.take_modifier(ModifierKind::Plus4),
            Err(HandError::NotActive {
                status: HandStatus::Stayed
            })
        );
    }

    #[test]
    fn second_token_is_rejected() {
        let mut hand = Hand::new();
        hand.grant_second_chance().unwrap();
        assert_eq!(
            hand.grant_second_chance(),
            Err(HandError::SecondChanceHeld)
        );
        assert!(hand.has_second_chance());
    }

    #[test]
    fn modifiers_accumulate_while_active() {
        let mut hand = Hand::new();
        hand.take_modifier(ModifierKind::Double).unwrap();
        hand.take_modifier(ModifierKind::Plus8).unwrap();
        assert!(hand.has_modifier(ModifierKind::Double));
        assert!(hand.has_modifier(ModifierKind::Plus8));
        assert!(hand.is_active());
    }
}
