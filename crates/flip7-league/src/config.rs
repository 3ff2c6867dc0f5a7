use flip7_bot::{HAND_SIZE_LIMITS, HIGH_VALUE_THRESHOLDS, SCORE_THRESHOLDS, StrategyConfig};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const DEFAULT_PLAYERS_PER_GAME: usize = 5;
const DEFAULT_WINNING_SCORE: u32 = 200;
const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root league configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LeagueConfig {
    pub run_id: String,
    pub league: LeagueParams,
    #[serde(default)]
    pub strategies: StrategySets,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl LeagueConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let cfg: LeagueConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O. Everything
    /// here fails before a single game is simulated.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        self.league.validate()?;
        self.strategies.validate()?;
        self.outputs.validate(&self.run_id)?;

        let entrants = self.strategies.catalog_size();
        if entrants % self.league.players_per_game != 0 {
            return Err(ValidationError::InvalidField {
                field: "league.players_per_game".to_string(),
                message: format!(
                    "{entrants} entrants cannot be split into full games of {}",
                    self.league.players_per_game
                ),
            });
        }
        Ok(())
    }

    /// Resolve output templates (`{run_id}` placeholders) into paths.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            jsonl: resolve_template(&self.run_id, &self.outputs.jsonl),
            summary_md: resolve_template(&self.run_id, &self.outputs.summary_md),
            results_json: resolve_template(&self.run_id, &self.outputs.results_json),
        }
    }
}

/// League shape: how many turns, how the pool is split, when a game ends.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LeagueParams {
    pub seed: Option<u64>,
    pub turns: usize,
    #[serde(default = "default_players_per_game")]
    pub players_per_game: usize,
    #[serde(default = "default_winning_score")]
    pub winning_score: u32,
}

impl LeagueParams {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.turns == 0 {
            return Err(ValidationError::InvalidField {
                field: "league.turns".to_string(),
                message: "number of turns must be greater than zero".to_string(),
            });
        }
        if self.players_per_game < 2 {
            return Err(ValidationError::InvalidField {
                field: "league.players_per_game".to_string(),
                message: "games need at least 2 players".to_string(),
            });
        }
        if self.winning_score == 0 {
            return Err(ValidationError::InvalidField {
                field: "league.winning_score".to_string(),
                message: "winning score must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

fn default_players_per_game() -> usize {
    DEFAULT_PLAYERS_PER_GAME
}

fn default_winning_score() -> u32 {
    DEFAULT_WINNING_SCORE
}

/// Value sets the entrant pool is enumerated from. Defaults to the full
/// documented sets (the 575-variant field).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StrategySets {
    #[serde(default = "default_score_thresholds")]
    pub score_thresholds: Vec<u32>,
    #[serde(default = "default_hand_size_limits")]
    pub hand_size_limits: Vec<usize>,
    #[serde(default = "default_high_value_thresholds")]
    pub high_value_thresholds: Vec<u8>,
}

impl Default for StrategySets {
    fn default() -> Self {
        Self {
            score_thresholds: default_score_thresholds(),
            hand_size_limits: default_hand_size_limits(),
            high_value_thresholds: default_high_value_thresholds(),
        }
    }
}

impl StrategySets {
    fn validate(&self) -> Result<(), ValidationError> {
        for (field, empty) in [
            ("strategies.score_thresholds", self.score_thresholds.is_empty()),
            ("strategies.hand_size_limits", self.hand_size_limits.is_empty()),
            (
                "strategies.high_value_thresholds",
                self.high_value_thresholds.is_empty(),
            ),
        ] {
            if empty {
                return Err(ValidationError::InvalidField {
                    field: field.to_string(),
                    message: "value set must not be empty".to_string(),
                });
            }
        }

        for &value in &self.score_thresholds {
            let probe = StrategyConfig {
                score_threshold: Some(value),
                ..Default::default()
            };
            probe.validate().map_err(|err| ValidationError::InvalidField {
                field: "strategies.score_thresholds".to_string(),
                message: err.to_string(),
            })?;
        }
        for &value in &self.hand_size_limits {
            let probe = StrategyConfig {
                hand_size_limit: Some(value),
                ..Default::default()
            };
            probe.validate().map_err(|err| ValidationError::InvalidField {
                field: "strategies.hand_size_limits".to_string(),
                message: err.to_string(),
            })?;
        }
        for &value in &self.high_value_thresholds {
            let probe = StrategyConfig {
                high_value_threshold: Some(value),
                ..Default::default()
            };
            probe.validate().map_err(|err| ValidationError::InvalidField {
                field: "strategies.high_value_thresholds".to_string(),
                message: err.to_string(),
            })?;
        }
        Ok(())
    }

    /// Entrants produced by the enumeration: singles + pairs + triples.
    pub fn catalog_size(&self) -> usize {
        let s = self.score_thresholds.len();
        let h = self.hand_size_limits.len();
        let v = self.high_value_thresholds.len();
        (s + h + v) + (s * h + s * v + h * v) + s * h * v
    }
}

fn default_score_thresholds() -> Vec<u32> {
    SCORE_THRESHOLDS.to_vec()
}

fn default_hand_size_limits() -> Vec<usize> {
    HAND_SIZE_LIMITS.to_vec()
}

fn default_high_value_thresholds() -> Vec<u8> {
    HIGH_VALUE_THRESHOLDS.to_vec()
}

/// Output artifact configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
    pub summary_md: String,
    pub results_json: String,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        for (label, value) in [
            ("outputs.jsonl", &self.jsonl),
            ("outputs.summary_md", &self.summary_md),
            ("outputs.results_json", &self.results_json),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "path must not be empty".to_string(),
                });
            }

            let resolved = resolve_template(run_id, value);
            if resolved.components().count() == 0 {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "resolved path is invalid".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Logging configuration defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
        }
    }
}

impl LoggingConfig {
    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id must not be empty".to_string(),
        });
    }

    if !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id may only contain alphanumeric characters, '.', '_' or '-'"
                .to_string(),
        });
    }

    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    let replaced = template.replace("{run_id}", run_id);
    PathBuf::from(replaced)
}

/// Fully resolved output paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    pub summary_md: PathBuf,
    pub results_json: PathBuf,
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
