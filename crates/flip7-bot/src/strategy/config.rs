use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Supported stay-at-score values.
pub const SCORE_THRESHOLDS: [u32; 15] = [
    5, 10, 15, 20, 25, 30, 35, 40, 45, 50, 55, 60, 65, 70, 75,
];

/// Supported stay-at-hand-size values (distinct number cards held).
pub const HAND_SIZE_LIMITS: [usize; 5] = [2, 3, 4, 5, 6];

/// Supported high-value thresholds (stay once any held number reaches one).
pub const HIGH_VALUE_THRESHOLDS: [u8; 5] = [8, 9, 10, 11, 12];

/// One strategy variant: any non-empty subset of the three stay
/// conditions, evaluated as an OR. The action-card heuristics are fixed
/// and identical for every variant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
pub struct StrategyConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_threshold: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hand_size_limit: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_value_threshold: Option<u8>,
}

/// Rejected configurations. Raised at construction time, before any
/// simulation starts; nothing is ever silently defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidStrategyConfig {
    #[error("strategy must set at least one stay condition")]
    NoConditions,
    #[error("score threshold {0} is not a supported value")]
    ScoreThreshold(u32),
    #[error("hand size limit {0} is not a supported value")]
    HandSizeLimit(usize),
    #[error("high value threshold {0} is not a supported value")]
    HighValueThreshold(u8),
}

impl StrategyConfig {
    pub fn validate(&self) -> Result<(), InvalidStrategyConfig> {
        if self.score_threshold.is_none()
            && self.hand_size_limit.is_none()
            && self.high_value_threshold.is_none()
        {
            return Err(InvalidStrategyConfig::NoConditions);
        }
        if let Some(value) = self.score_threshold
            && !SCORE_THRESHOLDS.contains(&value)
        {
            return Err(InvalidStrategyConfig::ScoreThreshold(value));
        }
        if let Some(value) = self.hand_size_limit
            && !HAND_SIZE_LIMITS.contains(&value)
        {
            return Err(InvalidStrategyConfig::HandSizeLimit(value));
        }
        if let Some(value) = self.high_value_threshold
            && !HIGH_VALUE_THRESHOLDS.contains(&value)
        {
            return Err(InvalidStrategyConfig::HighValueThreshold(value));
        }
        Ok(())
    }

    /// Stable human-readable identifier, e.g. `score15+hand4`.
    pub fn label(&self) -> String {
        let mut parts = Vec::with_capacity(3);
        if let Some(value) = self.score_threshold {
            parts.push(format!("score{value}"));
        }
        if let Some(value) = self.hand_size_limit {
            parts.push(format!("hand{value}"));
        }
        if let Some(value) = self.high_value_threshold {
            parts.push(format!("high{value}"));
        }
        parts.join("+")
    }

    pub fn condition_count(&self) -> usize {
        usize::from(self.score_threshold.is_some())
            + usize::from(self.hand_size_limit.is_some())
            + usize::from(self.high_value_threshold.is_some())
    }
}
