//! Experiment configuration for self-play runs.
//!
//! ```toml
//! games = 100
//! seed = 7
//! output = "data/games"
//!
//! [game]
//! dimensions = 3
//! bonus = true
//!
//! [[players]]
//! kind = "alphabeta"
//! depth = 3
//!
//! [[players]]
//! kind = "random"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use hypertoe_engine::GameConfig;
use hypertoe_search::{AgentConfig, AgentKind, DEFAULT_SEED};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Number of games to play.
    pub games: usize,

    /// Base seed; game `i` derives its seeds from `seed + i * 1000`.
    pub seed: u64,

    pub game: GameConfig,

    /// Exactly two agents: the first plays X, the second O.
    pub players: Vec<AgentConfig>,

    /// Directory for `game_XXXXXX.json` records. Nothing is written if unset.
    pub output: Option<PathBuf>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            games: 10,
            seed: DEFAULT_SEED,
            game: GameConfig::default(),
            players: vec![
                AgentConfig::new(AgentKind::AlphaBeta),
                AgentConfig::new(AgentKind::Random),
            ],
            output: None,
        }
    }
}

impl ExperimentConfig {
    /// Load and validate an experiment from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: ExperimentConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {:?}", path))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.games == 0 {
            bail!("games must be >= 1");
        }
        if self.players.len() != 2 {
            bail!("expected 2 players, found {}", self.players.len());
        }
        self.game.validate().context("invalid [game] table")?;
        for (i, player) in self.players.iter().enumerate() {
            player
                .validate()
                .with_context(|| format!("invalid player {}", i))?;
        }
        Ok(())
    }

    /// Seed for game `index`.
    pub fn game_seed(&self, index: usize) -> u64 {
        self.seed.wrapping_add(index as u64 * 1000)
    }

    /// Agent configurations for game `index`, reseeded so every game and
    /// every seat draws from its own stream.
    pub fn players_for_game(&self, index: usize) -> Vec<AgentConfig> {
        let game_seed = self.game_seed(index);
        self.players
            .iter()
            .enumerate()
            .map(|(seat, player)| {
                let seed = player.seed.wrapping_add(game_seed).wrapping_add(seat as u64);
                player.clone().with_seed(seed)
            })
            .collect()
    }
}
