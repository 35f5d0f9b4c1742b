//! N-dimensional tic-tac-toe engine.
//!
//! This crate owns the rules: which lines score, how a move changes the
//! board, what reward it earns and when the game ends. Search agents reach it
//! through the [`hypertoe_core::Game`] trait.
//!
//! # Example
//!
//! ```
//! use hypertoe_core::{Coord, Player};
//! use hypertoe_engine::{GameConfig, GameEngine};
//!
//! let mut engine = GameEngine::new(GameConfig::three_dims()).unwrap();
//! let obs = engine.reset();
//! assert_eq!(obs.action_mask.count(), 27);
//! assert_eq!(engine.scoring_lines().len(), 49);
//!
//! let outcome = engine.step(&Coord::from([1, 1, 1])).unwrap();
//! assert_eq!(outcome.observation.current_player, Player::O);
//! ```

pub mod config;
pub mod engine;
pub mod lines;

pub use config::{GameConfig, RewardMode};
pub use engine::{GameEngine, StepOutcome};
pub use lines::{line_count, scoring_lines, ScoringLine};
