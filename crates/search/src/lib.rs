//! Move-selection agents for N-dimensional tic-tac-toe.
//!
//! Every agent implements [`Agent`] over any [`hypertoe_core::Game`]:
//!
//! - [`RandomAgent`]: uniform over legal moves
//! - [`MinimaxAgent`]: exhaustive depth-limited search
//! - [`AlphaBetaAgent`]: the same search with pruning, making identical choices
//!
//! # Example
//!
//! ```
//! use hypertoe_engine::{GameConfig, GameEngine};
//! use hypertoe_search::{Agent, AgentConfig, AgentKind, AgentVariant};
//!
//! let engine = GameEngine::new(GameConfig::two_dims()).unwrap();
//! let history = vec![engine.observation()];
//!
//! let config = AgentConfig::new(AgentKind::AlphaBeta).with_depth(2);
//! let mut agent = AgentVariant::from_config(&config).unwrap();
//! let action = agent.choose_action(&engine, &history).unwrap();
//! assert!(engine.is_legal(engine.board(), &action).unwrap());
//! ```

pub mod agent;
pub mod alphabeta;
pub mod config;
pub mod minimax;
pub mod random;

pub use agent::{evaluate_leaf, Agent, AgentVariant, Role};
pub use alphabeta::AlphaBetaAgent;
pub use config::{AgentConfig, AgentKind, SearchConfig, DEFAULT_SEED};
pub use minimax::MinimaxAgent;
pub use random::RandomAgent;
