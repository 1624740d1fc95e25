use crate::model::score::{ScoringRules, TieBreak};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_MAX_BID_ATTEMPTS: u32 = 16;

/// Tunables for a single game. Every field has a default so partial YAML or
/// JSON documents deserialize cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub scoring: ScoringRules,
    /// Leave a full trick on the table until `resolve_trick` is called.
    pub defer_trick_resolution: bool,
    /// Consecutive invalid answers tolerated from a bid source for one seat.
    pub max_bid_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringRules::default(),
            defer_trick_resolution: false,
            max_bid_attempts: DEFAULT_MAX_BID_ATTEMPTS,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let target_score = read("SPADES_TARGET_SCORE")
            .and_then(|raw| raw.trim().parse::<i32>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(defaults.scoring.target_score);

        let bag_limit = read("SPADES_BAG_LIMIT")
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(defaults.scoring.bag_limit);

        let bag_penalty = read("SPADES_BAG_PENALTY")
            .and_then(|raw| raw.trim().parse::<i32>().ok())
            .filter(|value| *value >= 0)
            .unwrap_or(defaults.scoring.bag_penalty);

        let tie_break = read("SPADES_TIE_BREAK")
            .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
                "team_a" | "a" => Some(TieBreak::TeamA),
                "higher_score" | "higher" => Some(TieBreak::HigherScore),
                _ => None,
            })
            .unwrap_or(defaults.scoring.tie_break);

        let defer_trick_resolution = read("SPADES_DEFER_TRICKS")
            .map(|raw| matches!(raw.trim(), "1" | "true" | "TRUE" | "on" | "ON"))
            .unwrap_or(defaults.defer_trick_resolution);

        let max_bid_attempts = read("SPADES_MAX_BID_ATTEMPTS")
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(defaults.max_bid_attempts);

        Self {
            scoring: ScoringRules {
                target_score,
                bag_limit,
                bag_penalty,
                tie_break,
            },
            defer_trick_resolution,
            max_bid_attempts,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scoring.target_score <= 0 {
            return Err(ConfigError::InvalidField {
                field: "scoring.target_score".to_string(),
                message: "target score must be greater than zero".to_string(),
            });
        }
        if self.scoring.bag_limit == 0 {
            return Err(ConfigError::InvalidField {
                field: "scoring.bag_limit".to_string(),
                message: "bag limit must be at least 1".to_string(),
            });
        }
        if self.scoring.bag_penalty < 0 {
            return Err(ConfigError::InvalidField {
                field: "scoring.bag_penalty".to_string(),
                message: "bag penalty must not be negative".to_string(),
            });
        }
        if self.max_bid_attempts == 0 {
            return Err(ConfigError::InvalidField {
                field: "max_bid_attempts".to_string(),
                message: "at least one bid attempt is required".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, GameConfig};
    use crate::model::score::TieBreak;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> GameConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        GameConfig::from_reader(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_match_standard_rules() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.scoring.target_score, 500);
        assert_eq!(cfg.scoring.bag_limit, 10);
        assert_eq!(cfg.scoring.bag_penalty, 100);
        assert_eq!(cfg.scoring.tie_break, TieBreak::TeamA);
        assert!(!cfg.defer_trick_resolution);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn env_overrides_are_applied() {
        let cfg = from_pairs(&[
            ("SPADES_TARGET_SCORE", "250"),
            ("SPADES_TIE_BREAK", "higher_score"),
            ("SPADES_DEFER_TRICKS", "1"),
        ]);
        assert_eq!(cfg.scoring.target_score, 250);
        assert_eq!(cfg.scoring.tie_break, TieBreak::HigherScore);
        assert!(cfg.defer_trick_resolution);
        assert_eq!(cfg.scoring.bag_limit, 10);
    }

    #[test]
    fn invalid_env_values_fall_back_to_defaults() {
        let cfg = from_pairs(&[
            ("SPADES_TARGET_SCORE", "-5"),
            ("SPADES_BAG_LIMIT", "zero"),
            ("SPADES_MAX_BID_ATTEMPTS", "0"),
        ]);
        assert_eq!(cfg, GameConfig::default());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: GameConfig =
            serde_json::from_str(r#"{ "scoring": { "target_score": 300 } }"#).unwrap();
        assert_eq!(cfg.scoring.target_score, 300);
        assert_eq!(cfg.scoring.bag_limit, 10);
        assert_eq!(cfg.max_bid_attempts, 16);
    }

    #[test]
    fn validate_rejects_zero_bag_limit() {
        let mut cfg = GameConfig::default();
        cfg.scoring.bag_limit = 0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidField { field, .. }) if field == "scoring.bag_limit"
        ));
    }
}
