//! Depth-limited minimax search.
//!
//! Explores every legal continuation up to the configured depth and scores
//! cutoff positions by the root mover's score margin. Used as the reference
//! policy that [`AlphaBetaAgent`](crate::AlphaBetaAgent) must reproduce.

use hypertoe_core::{Coord, Game, HypertoeError, Observation, Player, Result};
use log::{debug, trace};
use rand::Rng;

use crate::agent::{evaluate_leaf, explore, latest, Agent, Role};
use crate::config::SearchConfig;

/// Epsilon-greedy minimax agent.
pub struct MinimaxAgent<R: Rng> {
    config: SearchConfig,
    rng: R,
    nodes_searched: u64,
}

impl<R: Rng> MinimaxAgent<R> {
    /// Create a new minimax agent.
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
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }

    /// Minimax value of `observation` for `root`, with `role` to move at
    /// `depth` plies below the root.
    pub fn minimax_value<G: Game>(
        &mut self,
        game: &G,
        observation: &Observation,
        role: Role,
        depth: usize,
        root: Player,
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
            let value = self.minimax_value(game, &child, role.flip(), depth + 1, root)?;
            best = match role {
                Role::Max => best.max(value),
                Role::Min => best.min(value),
            };
        }
        Ok(best)
    }
}

impl<G: Game, R: Rng> Agent<G> for MinimaxAgent<R> {
    fn choose_action(&mut self, game: &G, history: &[Observation]) -> Result<Coord> {
        self.nodes_searched = 0;
        let observation = latest(history)?;
        let legal = observation.action_mask.legal_actions();
        if legal.is_empty() {
            return Err(HypertoeError::NoLegalMoves);
        }

        if let Some(action) = explore(&mut self.rng, self.config.epsilon, &legal) {
            trace!("minimax exploring {}", action);
            return Ok(action);
        }

        let root = observation.current_player;
        let mut best: Option<(Coord, i64)> = None;
        for action in legal {
            let (child, _) = game.simulate(&observation.board, root, &action)?;
            // The opponent replies next and minimizes.
            let value = self.minimax_value(game, &child, Role::Min, 1, root)?;
            if best.as_ref().map_or(true, |(_, best_value)| value > *best_value) {
                best = Some((action, value));
            }
        }

        let (action, value) = best.ok_or(HypertoeError::NoLegalMoves)?;
        debug!(
            "minimax depth {} chose {} (value {}, {} nodes)",
            self.config.depth, action, value, self.nodes_searched
        );
        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hypertoe_core::{Board, Cell};
    use hypertoe_engine::{GameConfig, GameEngine};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn agent(depth: usize) -> MinimaxAgent<ChaCha8Rng> {
        MinimaxAgent::new(SearchConfig::with_depth(depth), ChaCha8Rng::seed_from_u64(42)).unwrap()
    }

    fn position(rows: &str, to_move: Player) -> Observation {
        let cells = rows
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c {
                'X' => Cell::X,
                'O' => Cell::O,
                _ => Cell::Empty,
            })
            .collect();
        Observation::new(Board::from_cells(2, 3, cells).unwrap(), to_move)
    }

    #[test]
    fn test_completes_line() {
        let engine = GameEngine::new(GameConfig::two_dims()).unwrap();
        let history = vec![position("XX. OO. ...", Player::X)];

        let action = agent(1).choose_action(&engine, &history).unwrap();
        assert_eq!(action, Coord::from([0, 2]));
    }

    #[test]
    fn test_blocks_opponent_at_depth_two() {
        let engine = GameEngine::new(GameConfig::two_dims()).unwrap();
        // X cannot score now; O threatens the middle row.
        let history = vec![position("X.. OO. ..X", Player::X)];

        let action = agent(2).choose_action(&engine, &history).unwrap();
        assert_eq!(action, Coord::from([1, 2]));
    }

    #[test]
    fn test_ties_go_to_first_legal_move() {
        let engine = GameEngine::new(GameConfig::two_dims()).unwrap();
        let history = vec![engine.observation()];

        // Nothing can score within one ply of the empty board.
        let action = agent(1).choose_action(&engine, &history).unwrap();
        assert_eq!(action, Coord::from([0, 0]));
    }

    #[test]
    fn test_node_count_depth_one_and_two() {
        let engine = GameEngine::new(GameConfig::two_dims()).unwrap();
        let history = vec![engine.observation()];

        let mut shallow = agent(1);
        shallow.choose_action(&engine, &history).unwrap();
        assert_eq!(shallow.nodes_searched(), 9);

        let mut deeper = agent(2);
        deeper.choose_action(&engine, &history).unwrap();
        assert_eq!(deeper.nodes_searched(), 9 + 9 * 8);
    }

    #[test]
    fn test_leaf_is_root_perspective() {
        let engine = GameEngine::new(GameConfig::two_dims()).unwrap();
        let obs = position("OOO XX. X..", Player::X);
        let mut search = agent(3);

        // O owns the top row; at the depth limit the value is X's margin
        // whichever role is on move.
        let as_max = search.minimax_value(&engine, &obs, Role::Max, 3, Player::X).unwrap();
        let as_min = search.minimax_value(&engine, &obs, Role::Min, 3, Player::X).unwrap();
        assert_eq!(as_max, -1);
        assert_eq!(as_min, -1);
    }

    #[test]
    fn test_does_not_mutate_engine() {
        let mut engine = GameEngine::new(GameConfig::three_dims()).unwrap();
        engine.reset();
        engine.step(&Coord::from([1, 1, 1])).unwrap();
        let before = engine.observation();

        agent(2).choose_action(&engine, &[before.clone()]).unwrap();
        assert_eq!(engine.observation(), before);
    }

    #[test]
    fn test_errors() {
        let engine = GameEngine::new(GameConfig::two_dims()).unwrap();
        assert_eq!(
            agent(1).choose_action(&engine, &[]).unwrap_err(),
            HypertoeError::EmptyHistory
        );
        let rng = ChaCha8Rng::seed_from_u64(0);
        assert!(MinimaxAgent::new(SearchConfig::with_depth(0), rng).is_err());
    }
}
