use std::fmt;

use thiserror::Error;

use crate::{Coord, Player};

/// Why a move was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalReason {
    /// The target cell is not empty.
    Occupied,
    /// At least one component lies outside `[0, size)`.
    OutOfRange,
}

impl fmt::Display for IllegalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IllegalReason::Occupied => write!(f, "cell is not empty"),
            IllegalReason::OutOfRange => write!(f, "coordinate is out of range"),
        }
    }
}

/// Errors that can occur while playing or searching a game.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HypertoeError {
    #[error("illegal move {coord}: {reason}")]
    IllegalMove { coord: Coord, reason: IllegalReason },

    #[error("coordinate or board has {got} dimensions, expected {expected}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("reward type '{0}' is not supported")]
    UnsupportedRewardMode(String),

    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("it is {expected}'s turn, not {got}'s")]
    OutOfTurn { expected: Player, got: Player },

    #[error("No legal moves available")]
    NoLegalMoves,

    #[error("agent was asked to act without any observation")]
    EmptyHistory,
}

impl HypertoeError {
    /// Shorthand for an `IllegalMove` error.
    pub fn illegal(coord: &Coord, reason: IllegalReason) -> Self {
        HypertoeError::IllegalMove {
            coord: coord.clone(),
            reason,
        }
    }

    /// True for either flavour of illegal move.
    pub fn is_illegal_move(&self) -> bool {
        matches!(self, HypertoeError::IllegalMove { .. })
    }
}

/// Convenience Result type for game operations
pub type Result<T> = std::result::Result<T, HypertoeError>;
