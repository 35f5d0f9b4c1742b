//! Game configuration parameters.
//!
//! These parameters fix the board shape and the reward shaping of a game
//! instance. They are deserializable so collaborators can load them from
//! TOML; the engine only consumes them.

use hypertoe_core::{cell_count, HypertoeError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Reward shaping applied to every transition.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RewardMode {
    /// Reward equals the score gained by the move.
    Dense,
}

impl FromStr for RewardMode {
    type Err = HypertoeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "dense" => Ok(RewardMode::Dense),
            other => Err(HypertoeError::UnsupportedRewardMode(other.to_string())),
        }
    }
}

/// Game configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of board axes.
    pub dimensions: usize,

    /// Side length of every axis.
    pub size: usize,

    /// Move count at which a game is truncated. `None` = play until full.
    pub max_moves: Option<u32>,

    /// Reward shaping, parsed into [`RewardMode`] when the engine is built.
    pub reward_type: String,

    /// Add `bonus_value` to the reward of the move that ends a game the
    /// mover wins outright.
    pub bonus: bool,

    pub bonus_value: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            dimensions: 2,
            size: 3,
            max_moves: None,
            reward_type: "dense".to_string(),
            bonus: false,
            bonus_value: 100.0,
        }
    }
}

impl GameConfig {
    /// Classic 3x3 board.
    pub fn two_dims() -> Self {
        Self::default()
    }

    /// 3x3x3 cube.
    pub fn three_dims() -> Self {
        Self {
            dimensions: 3,
            ..Default::default()
        }
    }

    /// Board of arbitrary shape with default reward shaping.
    pub fn with_shape(dimensions: usize, size: usize) -> Self {
        Self {
            dimensions,
            size,
            ..Default::default()
        }
    }

    /// Enable the terminal win bonus.
    pub fn with_bonus(mut self, bonus_value: f64) -> Self {
        self.bonus = true;
        self.bonus_value = bonus_value;
        self
    }

    /// Truncate games after `max_moves` moves.
    pub fn with_max_moves(mut self, max_moves: u32) -> Self {
        self.max_moves = Some(max_moves);
        self
    }

    /// Parsed reward mode.
    ///
    /// # Errors
    /// `HypertoeError::UnsupportedRewardMode` for unknown names.
    pub fn reward_mode(&self) -> Result<RewardMode> {
        self.reward_type.parse()
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.dimensions == 0 {
            return Err(HypertoeError::Configuration(
                "dimensions must be >= 1".into(),
            ));
        }
        if self.size < 2 {
            return Err(HypertoeError::Configuration(format!(
                "size must be >= 2, got {}",
                self.size
            )));
        }
        if cell_count(self.dimensions, self.size.saturating_add(2)).is_none() {
            return Err(HypertoeError::Configuration(format!(
                "board shape [{}; {}] is too large",
                self.size, self.dimensions
            )));
        }
        if self.max_moves == Some(0) {
            return Err(HypertoeError::Configuration(
                "max_moves must be > 0 when set".into(),
            ));
        }
        if !self.bonus_value.is_finite() {
            return Err(HypertoeError::Configuration(
                "bonus_value must be finite".into(),
            ));
        }
        self.reward_mode()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.dimensions, 2);
        assert_eq!(config.size, 3);
        assert_eq!(config.max_moves, None);
        assert_eq!(config.reward_mode().unwrap(), RewardMode::Dense);
        assert!(!config.bonus);
        assert!((config.bonus_value - 100.0).abs() < 1e-9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = GameConfig::three_dims().with_bonus(5.0).with_max_moves(10);
        assert_eq!(config.dimensions, 3);
        assert!(config.bonus);
        assert_eq!(config.bonus_value, 5.0);
        assert_eq!(config.max_moves, Some(10));
    }

    #[test]
    fn test_unsupported_reward_mode() {
        let config = GameConfig {
            reward_type: "sparse".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(HypertoeError::UnsupportedRewardMode("sparse".to_string()))
        );
    }

    #[test]
    fn test_invalid_shapes() {
        assert!(GameConfig::with_shape(0, 3).validate().is_err());
        assert!(GameConfig::with_shape(2, 1).validate().is_err());
        assert!(GameConfig::with_shape(64, 3).validate().is_err());
        assert!(GameConfig::default().with_max_moves(0).validate().is_err());
    }

    #[test]
    fn test_nan_bonus_rejected() {
        let config = GameConfig::default().with_bonus(f64::NAN);
        assert!(matches!(
            config.validate(),
            Err(HypertoeError::Configuration(_))
        ));
    }
}
