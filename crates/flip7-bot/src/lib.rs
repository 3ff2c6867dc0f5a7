pub mod strategy;

pub use strategy::{
    HAND_SIZE_LIMITS, HIGH_VALUE_THRESHOLDS, InvalidStrategyConfig, SCORE_THRESHOLDS,
    StrategyConfig, ThresholdStrategy, catalog, catalog_from_sets,
};
