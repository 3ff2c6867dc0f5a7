//! Fixed action-card heuristics shared by every strategy variant. Each
//! selection is a pure function of the public table view; every tie
//! resolves to the lowest player index.

use flip7_core::model::player::PlayerId;
use flip7_core::strategy::{SecondChanceOutcome, TableView};
use std::cmp::Reverse;

/// Freeze the opponent whose banked round would hurt them most to lose:
/// token holders first, then the smallest current hand value.
pub fn freeze_target(table: &TableView<'_>) -> Option<PlayerId> {
    table
        .active_opponents()
        .min_by_key(|p| (!p.has_second_chance, p.number_sum, p.id.index()))
        .map(|p| p.id)
}

/// Force the opponent with the most to lose — the highest current hand
/// value — to draw three.
pub fn flip_three_target(table: &TableView<'_>) -> Option<PlayerId> {
    table
        .active_opponents()
        .min_by_key(|p| (Reverse(p.number_sum), p.id.index()))
        .map(|p| p.id)
}

/// Keep the first token; hand a surplus one to the active opponent with
/// the smallest hand value that has none, or discard it face down.
pub fn second_chance(table: &TableView<'_>) -> SecondChanceOutcome {
    if !table.me().has_second_chance {
        return SecondChanceOutcome::Keep;
    }
    table
        .active_opponents()
        .filter(|p| !p.has_second_chance)
        .min_by_key(|p| (p.number_sum, p.id.index()))
        .map(|p| SecondChanceOutcome::Give(p.id))
        .unwrap_or(SecondChanceOutcome::Discard)
}

#[cfg(test)]
mod tests {
    use super::{flip_three_target, freeze_target, second_chance};
    use flip7_core::model::hand::HandStatus;
    use flip7_core::model::player::PlayerId;
    use flip7_core::strategy::{PublicHand, SecondChanceOutcome, TableView};

    fn seat(
        index: usize,
        status: HandStatus,
        number_sum: u32,
        has_second_chance: bool,
    ) -> PublicHand {
        PublicHand {
            id: PlayerId::new(index),
            status,
            number_sum,
            number_count: usize::from(number_sum > 0),
            has_second_chance,
        }
    }

    #[test]
    fn freeze_prefers_token_holders() {
        let players = vec![
            seat(0, HandStatus::Active, 5, false),
            seat(1, HandStatus::Active, 3, false),
            seat(2, HandStatus::Active, 20, true),
        ];
        let view = TableView::new(PlayerId::new(0), &players);
        assert_eq!(freeze_target(&view), Some(PlayerId::new(2)));
    }

    #[test]
    fn freeze_falls_back_to_smallest_hand_value() {
        let players = vec![
            seat(0, HandStatus::Active, 5, false),
            seat(1, HandStatus::Active, 9, false),
            seat(2, HandStatus::Active, 2, false),
            seat(3, HandStatus::Stayed, 0, false),
        ];
        let view = TableView::new(PlayerId::new(0), &players);
        assert_eq!(freeze_target(&view), Some(PlayerId::new(2)));
    }

    #[test]
    fn freeze_ties_resolve_to_lowest_index() {
        let players = vec![
            seat(0, HandStatus::Active, 0, false),
            seat(1, HandStatus::Active, 7, false),
            seat(2, HandStatus::Active, 7, false),
        ];
        let view = TableView::new(PlayerId::new(0), &players);
        assert_eq!(freeze_target(&view), Some(PlayerId::new(1)));
    }

    #[test]
    fn flip_three_picks_highest_hand_value() {
        let players = vec![
            seat(0, HandStatus::Active, 5, false),
            seat(1, HandStatus::Active, 14, false),
            seat(2, HandStatus::Active, 22, false),
            seat(3, HandStatus::Busted, 30, false),
        ];
        let view = TableView::new(PlayerId::new(0), &players);
        assert_eq!(flip_three_target(&view), Some(PlayerId::new(2)));
    }

    #[test]
    fn flip_three_ties_resolve_to_lowest_index() {
        let players = vec![
            seat(0, HandStatus::Active, 1, false),
            seat(1, HandStatus::Active, 16, false),
            seat(2, HandStatus::Active, 16, false),
        ];
        let view = TableView::new(PlayerId::new(0), &players);
        assert_eq!(flip_three_target(&view), Some(PlayerId::new(1)));
    }

    #[test]
    fn targeting_sees_no_eligible_opponents() {
        let players = vec![
            seat(0, HandStatus::Active, 4, false),
            seat(1, HandStatus::Frozen, 9, false),
            seat(2, HandStatus::Stayed, 12, false),
        ];
        let view = TableView::new(PlayerId::new(0), &players);
        assert_eq!(freeze_target(&view), None);
        assert_eq!(flip_three_target(&view), None);
    }

    #[test]
    fn first_second_chance_is_kept() {
        let players = vec![
            seat(0, HandStatus::Active, 4, false),
            seat(1, HandStatus::Active, 2, false),
        ];
        let view = TableView::new(PlayerId::new(0), &players);
        assert_eq!(second_chance(&view), SecondChanceOutcome::Keep);
    }

    #[test]
    fn surplus_token_goes_to_smallest_tokenless_hand() {
        let players = vec![
            seat(0, HandStatus::Active, 4, true),
            seat(1, HandStatus::Active, 2, true),
            seat(2, HandStatus::Active, 3, false),
            seat(3, HandStatus::Active, 8, false),
        ];
        let view = TableView::new(PlayerId::new(0), &players);
        assert_eq!(
            second_chance(&view),
            SecondChanceOutcome::Give(PlayerId::new(2))
        );
    }

    #[test]
    fn surplus_token_is_discarded_when_everyone_holds_one() {
        let players = vec![
            seat(0, HandStatus::Active, 4, true),
            seat(1, HandStatus::Active, 2, true),
            seat(2, HandStatus::Stayed, 3, false),
        ];
        let view = TableView::new(PlayerId::new(0), &players);
        assert_eq!(second_chance(&view), SecondChanceOutcome::Discard);
    }

    #[test]
    fn selections_are_pure() {
        let players = vec![
            seat(0, HandStatus::Active, 4, false),
            seat(1, HandStatus::Active, 9, true),
            seat(2, HandStatus::Active, 9, false),
        ];
        let view = TableView::new(PlayerId::new(0), &players);
        assert_eq!(freeze_target(&view), freeze_target(&view));
        assert_eq!(flip_three_target(&view), flip_three_target(&view));
        assert_eq!(second_chance(&view), second_chance(&view));
    }
}
