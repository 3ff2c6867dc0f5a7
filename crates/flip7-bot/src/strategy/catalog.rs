use crate::strategy::config::{
    HAND_SIZE_LIMITS, HIGH_VALUE_THRESHOLDS, InvalidStrategyConfig, SCORE_THRESHOLDS,
    StrategyConfig,
};

/// Every supported variant: 25 single-condition, 175 two-condition and
/// 375 three-condition configurations — 575 in total, in a stable order.
pub fn catalog() -> Vec<StrategyConfig> {
    catalog_from_sets(&SCORE_THRESHOLDS, &HAND_SIZE_LIMITS, &HIGH_VALUE_THRESHOLDS)
        .expect("documented value sets produce valid configurations")
}

/// Cross product over caller-chosen subsets of the documented value
/// sets: singles per class, then score×hand, score×high, hand×high
/// pairs, then triples, each lexicographic. Every entry is validated.
pub fn catalog_from_sets(
    scores: &[u32],
    hand_sizes: &[usize],
    high_values: &[u8],
) -> Result<Vec<StrategyConfig>, InvalidStrategyConfig> {
    let mut configs = Vec::new();

    for &score in scores {
        configs.push(StrategyConfig {
            score_threshold: Some(score),
            ..Default::default()
        });
    }
    for &limit in hand_sizes {
        configs.push(StrategyConfig {
            hand_size_limit: Some(limit),
            ..Default::default()
        });
    }
    for &value in high_values {
        configs.push(StrategyConfig {
            high_value_threshold: Some(value),
            ..Default::default()
        });
    }

    for &score in scores {
        for &limit in hand_sizes {
            configs.push(StrategyConfig {
                score_threshold: Some(score),
                hand_size_limit: Some(limit),
                ..Default::default()
            });
        }
    }
    for &score in scores {
        for &value in high_values {
            configs.push(StrategyConfig {
                score_threshold: Some(score),
                high_value_threshold: Some(value),
                ..Default::default()
            });
        }
    }
    for &limit in hand_sizes {
        for &value in high_values {
            configs.push(StrategyConfig {
                hand_size_limit: Some(limit),
                high_value_threshold: Some(value),
                ..Default::default()
            });
        }
    }

    for &score in scores {
        for &limit in hand_sizes {
            for &value in high_values {
                configs.push(StrategyConfig {
                    score_threshold: Some(score),
                    hand_size_limit: Some(limit),
                    high_value_threshold: Some(value),
                });
            }
        }
    }

    for config in &configs {
        config.validate()?;
    }
    Ok(configs)
}
