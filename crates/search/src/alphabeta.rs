//! Minimax search with alpha-beta pruning.
//!
//! Produces exactly the moves [`MinimaxAgent`](crate::MinimaxAgent) produces
//! for the same position, depth and random stream, while skipping subtrees
//! that cannot change the result:
//!
//! - `alpha` is the best value MAX is already guaranteed,
//! - `beta` is the best value MIN is already guaranteed,
//! - a node stops expanding children once `alpha >= beta`.
//!
//! Both bounds are passed down the tree and carried left to right across
//! siblings, including across the root's children.

use hypertoe_core::{Coord, Game, HypertoeError, Observation, Player, Result};
use log::{debug, trace};
use rand::Rng;

use crate::agent::{evaluate_leaf, explore, latest, Agent, Role};
use crate::config::SearchConfig;

/// Epsilon-greedy minimax agent with alpha-beta pruning.
pub struct AlphaBetaAgent<R: Rng> {
    config: SearchConfig,
    rng: R,
    nodes_searched: u64,
}

impl<R: Rng> AlphaBetaAgent<R> {
    /// Create a new alpha-beta agent.
    ///
    /// # Errors
    /// `Configuration` if the search parameters are invalid.
    pub fn new(config: SearchConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng,
            nodes_searched: 0,
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Nodes evaluated below the root during the last `choose_action`.
    /// Reset at the start of every call.
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }

    /// Pruned minimax value of `observation` for `root` within the window
    /// `(alpha, beta)`.
    ///
    /// Values strictly inside the window are exact. A value at or below
    /// `alpha` (at or above `beta`) only bounds the true value from above
    /// (below).
    pub fn alphabeta_value<G: Game>(
        &mut self,
        game: &G,
        observation: &Observation,
        role: Role,
        depth: usize,
        root: Player,
        mut alpha: i64,
        mut beta: i64,
    ) -> Result<i64> {
        self.nodes_searched += 1;

        if depth >= self.config.depth || game.is_terminal(&observation.board) {
            return Ok(evaluate_leaf(game, &observation.board, root));
        }

        let legal = observation.action_mask.legal_actions();
        if legal.is_empty() {
            return Ok(evaluate_leaf(game, &observation.board, root));
        }

        let mover = observation.current_player;
        let mut best = match role {
            Role::Max => i64::MIN,
            Role::Min => i64::MAX,
        };
        for action in &legal {
            let (child, _) = game.simulate(&observation.board, mover, action)?;
            let value =
                self.alphabeta_value(game, &child, role.flip(), depth + 1, root, alpha, beta)?;

            match role {
                Role::Max => {
                    best = best.max(value);
                    alpha = alpha.max(value);
                }
                Role::Min => {
                    best = best.min(value);
                    beta = beta.min(value);
                }
            }

            if alpha >= beta {
                break;
            }
        }
        Ok(best)
    }
}

impl<G: Game, R: Rng> Agent<G> for AlphaBetaAgent<R> {
    fn choose_action(&mut self, game: &G, history: &[Observation]) -> Result<Coord> {
        self.nodes_searched = 0;
        let observation = latest(history)?;
        let legal = observation.action_mask.legal_actions();
        if legal.is_empty() {
            return Err(HypertoeError::NoLegalMoves);
        }

        if let Some(action) = explore(&mut self.rng, self.config.epsilon, &legal) {
            trace!("alphabeta exploring {}", action);
            return Ok(action);
        }

        let root = observation.current_player;
        let (mut alpha, beta) = (i64::MIN, i64::MAX);
        let mut best: Option<(Coord, i64)> = None;
        for action in legal {
            let (child, _) = game.simulate(&observation.board, root, &action)?;
            let value = self.alphabeta_value(game, &child, Role::Min, 1, root, alpha, beta)?;
            // Later children come back at or below alpha unless strictly
            // better, so a strict comparison keeps the first best move.
            if best.as_ref().map_or(true, |(_, best_value)| value > *best_value) {
                best = Some((action, value));
            }
            alpha = alpha.max(value);
        }

        let (action, value) = best.ok_or(HypertoeError::NoLegalMoves)?;
        debug!(
            "alphabeta depth {} chose {} (value {}, {} nodes)",
            self.config.depth, action, value, self.nodes_searched
        );
        Ok(action)
    }
}
