use crate::model::card::ModifierKind;
use crate::model::hand::{FLIP_SEVEN_COUNT, Hand, HandStatus};
use crate::model::player::PlayerId;

/// Flat bonus for banking seven distinct number cards.
pub const FLIP_SEVEN_BONUS: u32 = 15;

/// Scores a hand as it stands: busted hands are worth nothing; otherwise
/// number values are summed, doubled by `x2`, increased by each `+N`,
/// and topped with the Flip 7 bonus at seven distinct numbers.
pub fn hand_score(hand: &Hand) -> u32 {
    if matches!(hand.status(), HandStatus::Busted) {
        return 0;
    }

    let mut score = hand.number_sum();
    if hand.has_modifier(ModifierKind::Double) {
        score *= 2;
    }
    for kind in hand.modifiers() {
        score += kind.bonus();
    }
    if hand.number_count() == FLIP_SEVEN_COUNT {
        score += FLIP_SEVEN_BONUS;
    }
    score
}

/// Cumulative totals across rounds for one game's roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBoard {
    totals: Vec<u32>,
}

impl ScoreBoard {
    pub fn new(players: usize) -> Self {
        Self {
            totals: vec![0; players],
        }
    }

    pub fn total(&self, id: PlayerId) -> u32 {
        self.totals[id.index()]
    }

    pub fn totals(&self) -> &[u32] {
        &self.totals
    }

    pub fn add(&mut self, id: PlayerId, points: u32) {
        self.totals[id.index()] += points;
    }

    pub fn apply_round(&mut self, round_scores: &[u32]) {
        debug_assert_eq!(round_scores.len(), self.totals.len());
        for (total, score) in self.totals.iter_mut().zip(round_scores) {
            *total += score;
        }
    }

    /// Highest cumulative total; ties go to the lowest player index.
    pub fn leader(&self) -> PlayerId {
        let mut leader = 0;
        for (index, &total) in self.totals.iter().enumerate() {
            if total > self.totals[leader] {
                leader = index;
            }
        }
        PlayerId::new(leader)
    }

    /// First player at or over `target`. When several cross in the same
    /// round the highest total wins, ties by lowest player index.
    pub fn winner(&self, target: u32) -> Option<PlayerId> {
        let leader = self.leader();
        (self.total(leader) >= target).then_some(leader)
    }
}

#[cfg(test)]
mod tests {
    use super::{FLIP_SEVEN_BONUS, ScoreBoard, hand_score};
    use crate::model::card::ModifierKind;
    use crate::model::hand::Hand;
    use crate::model::player::PlayerId;

    #[test]
    fn busted_hand_scores_zero() {
        let mut hand = Hand::new();
        hand.take_number(5).unwrap();
        hand.take_modifier(ModifierKind::Plus10).unwrap();
        hand.take_number(5).unwrap();
        assert_eq!(hand_score(&hand), 0);
    }

    #[test]
    fn modifiers_double_then_add() {
        let mut hand = Hand::new();
        hand.take_number(4).unwrap();
        hand.take_number(6).unwrap();
        hand.take_modifier(ModifierKind::Double).unwrap();
        hand.take_modifier(ModifierKind::Plus4).unwrap();
        assert_eq!(hand_score(&hand), (4 + 6) * 2 + 4);
    }

    #[test]
    fn flip_seven_with_multiplier_scores_seventy_one() {
        let mut hand = Hand::new();
        hand.take_modifier(ModifierKind::Double).unwrap();
        for value in 1..=7 {
            hand.take_number(value).unwrap();
        }
        assert_eq!(hand_score(&hand), (1 + 2 + 3 + 4 + 5 + 6 + 7) * 2 + 15);
        assert_eq!(hand_score(&hand), 71);
    }

    #[test]
    fn flip_seven_bonus_applies_without_modifiers() {
        let mut hand = Hand::new();
        for value in 0..7 {
            hand.take_number(value).unwrap();
        }
        assert_eq!(hand_score(&hand), (0..7).sum::<u32>() + FLIP_SEVEN_BONUS);
    }

    #[test]
    fn scoreboard_accumulates_rounds() {
        let mut board = ScoreBoard::new(3);
        board.apply_round(&[10, 0, 25]);
        board.apply_round(&[5, 40, 0]);
        assert_eq!(board.totals(), &[15, 40, 25]);
        assert_eq!(board.leader(), PlayerId::new(1));
    }

    #[test]
    fn winner_requires_target_and_breaks_ties_low() {
        let mut board = ScoreBoard::new(3);
        board.apply_round(&[150, 199, 120]);
        assert_eq!(board.winner(200), None);

        board.apply_round(&[55, 6, 0]);
        // Both cross at 205; the tie goes to the lowest index.
        assert_eq!(board.winner(200), Some(PlayerId::new(0)));
    }
}
