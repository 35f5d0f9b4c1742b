use hypertoe_core::{Coord, Game, HypertoeError, Observation, Result};
use rand::Rng;

use crate::agent::{latest, Agent};

/// Plays a uniformly random legal move.
pub struct RandomAgent<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomAgent<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<G: Game, R: Rng> Agent<G> for RandomAgent<R> {
    fn choose_action(&mut self, _game: &G, history: &[Observation]) -> Result<Coord> {
        let observation = latest(history)?;
        let legal = observation.action_mask.legal_actions();
        if legal.is_empty() {
            return Err(HypertoeError::NoLegalMoves);
        }
        let idx = self.rng.gen_range(0..legal.len());
        Ok(legal[idx].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hypertoe_core::{Board, Cell, Player};
    use hypertoe_engine::{GameConfig, GameEngine};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_random_agent_plays_legal_moves() {
        let mut engine = GameEngine::new(GameConfig::three_dims()).unwrap();
        let mut agent = RandomAgent::new(ChaCha8Rng::seed_from_u64(1));
        let mut history = vec![engine.reset()];

        while !engine.is_terminal(engine.board()) {
            let action = agent.choose_action(&engine, &history).unwrap();
            assert!(engine.is_legal(engine.board(), &action).unwrap());
            history.push(engine.step(&action).unwrap().observation);
        }
    }

    #[test]
    fn test_random_agent_is_reproducible() {
        let engine = GameEngine::new(GameConfig::two_dims()).unwrap();
        let history = vec![engine.observation()];
        let picks = |seed| {
            let mut agent = RandomAgent::new(ChaCha8Rng::seed_from_u64(seed));
            (0..10)
                .map(|_| agent.choose_action(&engine, &history).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(picks(9), picks(9));
    }

    #[test]
    fn test_full_board_has_no_moves() {
        let engine = GameEngine::new(GameConfig::two_dims()).unwrap();
        let board = Board::from_cells(2, 3, vec![Cell::X; 9]).unwrap();
        let history = vec![Observation::new(board, Player::O)];
        let mut agent = RandomAgent::new(ChaCha8Rng::seed_from_u64(0));
        assert_eq!(
            agent.choose_action(&engine, &history).unwrap_err(),
            HypertoeError::NoLegalMoves
        );
    }
}
