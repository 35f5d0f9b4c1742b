//! Basic value types shared by the engine and the search agents.
//!
//! - [`Player`]: one of the two alternating roles
//! - [`Cell`]: the content of a single board square
//! - [`Coord`]: a position on a D-dimensional board

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two players. `X` always moves first.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Both players in turn order.
    pub const ALL: [Player; 2] = [Player::X, Player::O];

    /// Get the opposing player.
    pub fn opposite(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Index into per-player arrays (X = 0, O = 1).
    pub fn index(self) -> usize {
        match self {
            Player::X => 0,
            Player::O => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// Content of a single cell.
///
/// `Invalid` marks squares that can never be played (used by variant boards
/// and by analysis positions); they count neither as empty nor as owned.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
    Invalid,
}

impl Cell {
    /// The player owning this cell, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty | Cell::Invalid => None,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Character used by the text rendering of a board.
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
            Cell::Invalid => '#',
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

/// A cell position: one component per board axis, each in `[0, size)`.
///
/// Range checking happens against a concrete [`Board`](crate::Board), since
/// a coordinate on its own does not know the board size.
#[derive(Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coord(Vec<usize>);

impl Coord {
    pub fn new(components: Vec<usize>) -> Self {
        Self(components)
    }

    /// Number of axes.
    pub fn dims(&self) -> usize {
        self.0.len()
    }

    pub fn components(&self) -> &[usize] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

impl From<Vec<usize>> for Coord {
    fn from(components: Vec<usize>) -> Self {
        Self(components)
    }
}

impl<const N: usize> From<[usize; N]> for Coord {
    fn from(components: [usize; N]) -> Self {
        Self(components.to_vec())
    }
}

impl std::ops::Index<usize> for Coord {
    type Output = usize;

    fn index(&self, axis: usize) -> &Self::Output {
        &self.0[axis]
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, ")")
    }
}
