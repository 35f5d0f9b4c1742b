//! Plays one game between two agents and records the trajectory.

use std::collections::BTreeMap;

use hypertoe_core::{Board, Coord, Observation, Player, Result};
use hypertoe_engine::GameEngine;
use hypertoe_search::Agent;
use log::{trace, warn};
use serde::{Deserialize, Serialize};

/// A single move in a game trajectory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub player: Player,
    pub action: Coord,

    /// Reward the engine returned to the mover.
    pub reward: f64,

    /// Position after the move.
    pub board: Board,
}

/// A complete game trajectory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub steps: Vec<StepRecord>,
    pub final_scores: BTreeMap<Player, u32>,

    /// Strictly higher final score; `None` on a tie.
    pub winner: Option<Player>,

    /// The game stopped at the move cap rather than on a full board.
    pub truncated: bool,
}

/// Play a game from the initial position. `agents[0]` plays X.
///
/// Each player only sees its own observation history: the opening
/// observation goes to X, and every later observation goes to whoever is
/// about to move.
pub fn play_game<A: Agent<GameEngine>>(
    engine: &mut GameEngine,
    agents: &mut [A; 2],
) -> Result<GameRecord> {
    let mut histories: [Vec<Observation>; 2] = [vec![engine.reset()], Vec::new()];
    let mut steps = Vec::new();
    let mut truncated = false;

    loop {
        let player = engine.current_player();
        let seat = player.index();
        let action = agents[seat].choose_action(engine, &histories[seat])?;
        let outcome = engine.step(&action)?;
        trace!("{} plays {} (reward {})", player, action, outcome.reward);

        steps.push(StepRecord {
            player,
            action,
            reward: outcome.reward,
            board: outcome.observation.board.clone(),
        });

        if outcome.terminated || outcome.truncated {
            truncated = outcome.truncated && !outcome.terminated;
            if truncated {
                warn!("game truncated after {} moves", steps.len());
            }
            break;
        }
        let next = outcome.observation.current_player;
        histories[next.index()].push(outcome.observation);
    }

    Ok(GameRecord {
        steps,
        final_scores: engine.scores(),
        winner: engine.determine_winner(engine.board()),
        truncated,
    })
}
