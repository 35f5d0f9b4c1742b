//! Agent abstraction.
//!
//! The `Agent` trait is the only thing a driver needs: given read access to
//! the rules and the observations a player has received so far, return the
//! coordinate to play. Variants are independent types; [`AgentVariant`] tags
//! them for configuration-driven construction.

use hypertoe_core::{Board, Coord, Game, HypertoeError, Observation, Player, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::alphabeta::AlphaBetaAgent;
use crate::config::{AgentConfig, AgentKind};
use crate::minimax::MinimaxAgent;
use crate::random::RandomAgent;

/// Trait for move-selection policies.
pub trait Agent<G: Game> {
    /// Choose a coordinate for the player on move in the last observation of
    /// `history`.
    ///
    /// # Errors
    /// `EmptyHistory` if there is no observation, `NoLegalMoves` if the last
    /// one has no empty cell, and any error the rules report while searching.
    fn choose_action(&mut self, game: &G, history: &[Observation]) -> Result<Coord>;
}

/// Whose interests a search node represents.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Role {
    /// The root mover: picks the child with the largest value.
    Max,
    /// The root mover's opponent: picks the smallest.
    Min,
}

impl Role {
    pub fn flip(self) -> Self {
        match self {
            Role::Max => Role::Min,
            Role::Min => Role::Max,
        }
    }
}

/// Leaf value: the root mover's score minus the opponent's.
///
/// Always taken from the root mover's side, whichever player is on move at
/// the leaf.
pub fn evaluate_leaf<G: Game>(game: &G, board: &Board, root: Player) -> i64 {
    i64::from(game.score(board, root)) - i64::from(game.score(board, root.opposite()))
}

pub(crate) fn latest(history: &[Observation]) -> Result<&Observation> {
    history.last().ok_or(HypertoeError::EmptyHistory)
}

/// Epsilon-greedy draw shared by the search agents.
///
/// Consumes exactly one `f64` per call, plus one index draw when exploring,
/// so agents with the same seed see the same random stream.
pub(crate) fn explore<R: Rng>(rng: &mut R, epsilon: f64, legal: &[Coord]) -> Option<Coord> {
    if rng.gen::<f64>() < epsilon {
        let idx = rng.gen_range(0..legal.len());
        Some(legal[idx].clone())
    } else {
        None
    }
}

/// Any agent, selected at runtime.
pub enum AgentVariant {
    Random(RandomAgent<ChaCha8Rng>),
    Minimax(MinimaxAgent<ChaCha8Rng>),
    AlphaBeta(AlphaBetaAgent<ChaCha8Rng>),
}

impl AgentVariant {
    /// Build the agent described by `config`, seeding a fresh ChaCha8 stream.
    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        config.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Ok(match config.kind {
            AgentKind::Random => AgentVariant::Random(RandomAgent::new(rng)),
            AgentKind::Minimax => {
                AgentVariant::Minimax(MinimaxAgent::new(config.search.clone(), rng)?)
            }
            AgentKind::AlphaBeta => {
                AgentVariant::AlphaBeta(AlphaBetaAgent::new(config.search.clone(), rng)?)
            }
        })
    }

    pub fn kind(&self) -> AgentKind {
        match self {
            AgentVariant::Random(_) => AgentKind::Random,
            AgentVariant::Minimax(_) => AgentKind::Minimax,
            AgentVariant::AlphaBeta(_) => AgentKind::AlphaBeta,
        }
    }

    /// Nodes visited by the last search, for the searching variants.
    pub fn nodes_searched(&self) -> Option<u64> {
        match self {
            AgentVariant::Random(_) => None,
            AgentVariant::Minimax(agent) => Some(agent.nodes_searched()),
            AgentVariant::AlphaBeta(agent) => Some(agent.nodes_searched()),
        }
    }
}

impl<G: Game> Agent<G> for AgentVariant {
    fn choose_action(&mut self, game: &G, history: &[Observation]) -> Result<Coord> {
        match self {
            AgentVariant::Random(agent) => agent.choose_action(game, history),
            AgentVariant::Minimax(agent) => agent.choose_action(game, history),
            AgentVariant::AlphaBeta(agent) => agent.choose_action(game, history),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_flip() {
        assert_eq!(Role::Max.flip(), Role::Min);
        assert_eq!(Role::Min.flip().flip(), Role::Min);
    }

    #[test]
    fn test_explore_respects_epsilon_bounds() {
        let legal = vec![Coord::from([0, 0]), Coord::from([1, 1])];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..50 {
            assert!(explore(&mut rng, 0.0, &legal).is_none());
            let picked = explore(&mut rng, 1.0, &legal).unwrap();
            assert!(legal.contains(&picked));
        }
    }

    #[test]
    fn test_latest_requires_history() {
        assert_eq!(latest(&[]).unwrap_err(), HypertoeError::EmptyHistory);
    }

    #[test]
    fn test_variant_from_config() {
        let agent = AgentVariant::from_config(&AgentConfig::new(AgentKind::AlphaBeta)).unwrap();
        assert_eq!(agent.kind(), AgentKind::AlphaBeta);
        assert_eq!(agent.nodes_searched(), Some(0));

        let random = AgentVariant::from_config(&AgentConfig::new(AgentKind::Random)).unwrap();
        assert_eq!(random.nodes_searched(), None);

        let bad = AgentConfig::new(AgentKind::Minimax).with_depth(0);
        assert!(AgentVariant::from_config(&bad).is_err());
    }
}
