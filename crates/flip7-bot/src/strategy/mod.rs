mod catalog;
mod config;
mod targeting;
mod threshold;

pub use catalog::{catalog, catalog_from_sets};
pub use config::{
    HAND_SIZE_LIMITS, HIGH_VALUE_THRESHOLDS, InvalidStrategyConfig, SCORE_THRESHOLDS,
    StrategyConfig,
};
pub use threshold::ThresholdStrategy;
