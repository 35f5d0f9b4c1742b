//! Side-by-side runs of minimax and alpha-beta on random positions.

use anyhow::{anyhow, ensure, Result};
use hypertoe_core::{cell_count, Board, Cell, Observation, Player};
use hypertoe_engine::{GameConfig, GameEngine};
use hypertoe_search::{Agent, AlphaBetaAgent, MinimaxAgent, SearchConfig};
use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

/// Mean effort of both agents at one depth.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthSummary {
    pub dimensions: usize,
    pub depth: usize,
    pub positions: usize,
    pub minimax_nodes: f64,
    pub alphabeta_nodes: f64,
}

impl DepthSummary {
    /// Fraction of minimax nodes alpha-beta skipped.
    pub fn pruned(&self) -> f64 {
        if self.minimax_nodes == 0.0 {
            0.0
        } else {
            1.0 - self.alphabeta_nodes / self.minimax_nodes
        }
    }
}

/// A random filling of a 3-wide board with at least one empty cell, X to move.
pub fn random_position(dims: usize, rng: &mut ChaCha8Rng) -> Result<Observation> {
    let len = cell_count(dims, 3).ok_or_else(|| anyhow!("{}D board is too large", dims))?;
    let cells = (0..len)
        .map(|_| match rng.gen_range(0..3) {
            0 => Cell::Empty,
            1 => Cell::X,
            _ => Cell::O,
        })
        .collect::<Vec<_>>();
    let mut board = Board::from_cells(dims, 3, cells)?;
    if board.is_full() {
        let hole = board.coord_of(rng.gen_range(0..len));
        board.set(&hole, Cell::Empty)?;
    }
    Ok(Observation::new(board, Player::X))
}

/// Run both agents on `positions` random positions at `depth` and fail if
/// they ever choose differently.
pub fn compare_depth(
    dims: usize,
    depth: usize,
    positions: usize,
    seed: u64,
) -> Result<DepthSummary> {
    let engine = GameEngine::new(GameConfig::with_shape(dims, 3))?;
    let search = SearchConfig::with_depth(depth);

    let counts = (0..positions)
        .into_par_iter()
        .map(|i| -> Result<(u64, u64)> {
            let position_seed = seed.wrapping_add(i as u64 * 1000);
            let mut rng = ChaCha8Rng::seed_from_u64(position_seed);
            let history = vec![random_position(dims, &mut rng)?];

            let mut minimax = MinimaxAgent::new(search.clone(), rng.clone())?;
            let mut alphabeta = AlphaBetaAgent::new(search.clone(), rng)?;
            let expected = minimax.choose_action(&engine, &history)?;
            let actual = alphabeta.choose_action(&engine, &history)?;
            ensure!(
                actual == expected,
                "{}D depth {} position {}: alphabeta chose {} but minimax chose {}\n{}",
                dims,
                depth,
                i,
                actual,
                expected,
                history[0].board
            );
            Ok((minimax.nodes_searched(), alphabeta.nodes_searched()))
        })
        .collect::<Result<Vec<_>>>()?;

    let n = counts.len().max(1) as f64;
    let summary = DepthSummary {
        dimensions: dims,
        depth,
        positions,
        minimax_nodes: counts.iter().map(|(m, _)| *m as f64).sum::<f64>() / n,
        alphabeta_nodes: counts.iter().map(|(_, a)| *a as f64).sum::<f64>() / n,
    };
    debug!("{:?}", summary);
    Ok(summary)
}
