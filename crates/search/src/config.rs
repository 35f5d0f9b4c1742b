//! Search and agent configuration parameters.

use hypertoe_core::{HypertoeError, Result};
use serde::{Deserialize, Serialize};

/// Default seed for agent random sources.
pub const DEFAULT_SEED: u64 = 42;

/// Search parameters shared by the minimax and alpha-beta agents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies explored below the root. Depth 1 evaluates each legal move's
    /// resulting position directly.
    pub depth: usize,

    /// Probability of playing a uniformly random legal move instead of
    /// searching.
    /// - 0.0: always search (greedy)
    /// - 1.0: always random
    pub epsilon: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 2,
            epsilon: 0.0,
        }
    }
}

impl SearchConfig {
    /// Greedy search to the given depth.
    pub fn with_depth(depth: usize) -> Self {
        Self {
            depth,
            ..Default::default()
        }
    }

    /// Set the exploration probability.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.depth == 0 {
            return Err(HypertoeError::Configuration(
                "search depth must be >= 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(HypertoeError::Configuration(format!(
                "epsilon {} is outside [0, 1]",
                self.epsilon
            )));
        }
        Ok(())
    }
}

/// Which agent to build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Random,
    Minimax,
    AlphaBeta,
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentKind::Random => write!(f, "random"),
            AgentKind::Minimax => write!(f, "minimax"),
            AgentKind::AlphaBeta => write!(f, "alphabeta"),
        }
    }
}

/// Configuration for creating an agent, loadable from TOML.
///
/// ```
/// use hypertoe_search::{AgentConfig, AgentKind};
///
/// let config = AgentConfig::new(AgentKind::AlphaBeta).with_depth(3).with_seed(7);
/// assert_eq!(config.search().depth, 3);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub kind: AgentKind,

    /// Search parameters; ignored by the random agent.
    #[serde(flatten)]
    pub search: SearchConfig,

    /// Seed for the agent's random source.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

impl AgentConfig {
    pub fn new(kind: AgentKind) -> Self {
        Self {
            kind,
            search: SearchConfig::default(),
            seed: DEFAULT_SEED,
        }
    }

    /// Set the search depth.
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.search.depth = depth;
        self
    }

    /// Set the exploration probability.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.search.epsilon = epsilon;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn search(&self) -> &SearchConfig {
        &self.search
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        match self.kind {
            AgentKind::Random => Ok(()),
            AgentKind::Minimax | AgentKind::AlphaBeta => self.search.validate(),
        }
    }
}
