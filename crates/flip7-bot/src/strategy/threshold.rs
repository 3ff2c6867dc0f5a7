use crate::strategy::config::{InvalidStrategyConfig, StrategyConfig};
use crate::strategy::targeting;
use flip7_core::model::hand::Hand;
use flip7_core::model::player::PlayerId;
use flip7_core::model::score::hand_score;
use flip7_core::strategy::{SecondChanceOutcome, Strategy, TableView, TurnDecision};
use tracing::trace;

/// One of the 575 rule-based players: stays as soon as any configured
/// threshold is met, draws otherwise. Targeting is the fixed table
/// heuristic shared by every variant.
#[derive(Debug, Clone)]
pub struct ThresholdStrategy {
    config: StrategyConfig,
}

impl ThresholdStrategy {
    /// Fails fast on an invalid configuration; nothing is defaulted.
    pub fn new(config: StrategyConfig) -> Result<Self, InvalidStrategyConfig> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    pub fn label(&self) -> String {
        self.config.label()
    }
}

impl Strategy for ThresholdStrategy {
    fn decide(&self, hand: &Hand, _table: &TableView<'_>) -> TurnDecision {
        if let Some(threshold) = self.config.score_threshold
            && hand_score(hand) >= threshold
        {
            trace!(target: "flip7_bot::decide", condition = "score", threshold, "stay");
            return TurnDecision::Stay;
        }
        if let Some(limit) = self.config.hand_size_limit
            && hand.number_count() >= limit
        {
            trace!(target: "flip7_bot::decide", condition = "hand_size", limit, "stay");
            return TurnDecision::Stay;
        }
        if let Some(threshold) = self.config.high_value_threshold
            && hand.highest_number().is_some_and(|value| value >= threshold)
        {
            trace!(target: "flip7_bot::decide", condition = "high_value", threshold, "stay");
            return TurnDecision::Stay;
        }
        TurnDecision::Draw
    }

    fn freeze_target(&self, table: &TableView<'_>) -> Option<PlayerId> {
        targeting::freeze_target(table)
    }

    fn flip_three_target(&self, table: &TableView<'_>) -> Option<PlayerId> {
        targeting::flip_three_target(table)
    }

    fn second_chance(&self, table: &TableView<'_>) -> SecondChanceOutcome {
        targeting::second_chance(table)
    }
}
