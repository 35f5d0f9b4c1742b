//! Hypertoe Core - board types and game abstractions
//!
//! This crate provides the value types shared by the engine and the search
//! agents of N-dimensional tic-tac-toe, together with the [`Game`] trait
//! through which agents see the rules.
//!
//! # Types
//!
//! - [`Board`] - Dense `[size; dims]` grid of [`Cell`]s
//! - [`Coord`] - A cell position, one component per axis
//! - [`Observation`] - Owned snapshot of board, players and legal moves
//! - [`Game`] - Trait for rule implementations

mod board;
mod error;
mod game;
mod observation;
mod types;

pub use board::{cell_count, ActionMask, Board};
pub use error::{HypertoeError, IllegalReason, Result};
pub use game::Game;
pub use observation::Observation;
pub use types::{Cell, Coord, Player};
