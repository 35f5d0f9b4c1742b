//! Dense D-dimensional board storage.
//!
//! Cells are stored row-major: for a coordinate `(c_0, ..., c_{D-1})` the flat
//! index is `sum(c_i * size^(D-1-i))`. Every enumeration in this crate
//! (legal actions, empty cells) follows that order, which search agents rely on
//! for deterministic tie-breaking.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Cell, Coord, HypertoeError, IllegalReason, Player, Result};

/// Number of cells of a `size^dims` board, or `None` on overflow.
pub fn cell_count(dims: usize, size: usize) -> Option<usize> {
    let exp = u32::try_from(dims).ok()?;
    size.checked_pow(exp)
}

/// Row-major flat index of `coord` on a `[size; dims]` grid.
fn flat_index(dims: usize, size: usize, coord: &Coord) -> Result<usize> {
    if coord.dims() != dims {
        return Err(HypertoeError::DimensionMismatch {
            expected: dims,
            got: coord.dims(),
        });
    }
    let mut index = 0;
    for &c in coord.components() {
        if c >= size {
            return Err(HypertoeError::illegal(coord, IllegalReason::OutOfRange));
        }
        index = index * size + c;
    }
    Ok(index)
}

/// Inverse of [`flat_index`].
fn unflatten(dims: usize, size: usize, index: usize) -> Coord {
    let mut components = vec![0; dims];
    let mut rest = index;
    for slot in components.iter_mut().rev() {
        *slot = rest % size;
        rest /= size;
    }
    Coord::new(components)
}

/// Cell count of a valid, non-empty shape.
fn checked_len(dims: usize, size: usize) -> Result<usize> {
    if dims == 0 || size == 0 {
        return Err(HypertoeError::Configuration(format!(
            "board shape [{}; {}] is empty",
            size, dims
        )));
    }
    cell_count(dims, size).ok_or_else(|| {
        HypertoeError::Configuration(format!("board shape [{}; {}] is too large", size, dims))
    })
}

/// A board of shape `[size; dims]`.
///
/// Invariant: `cells.len() == size^dims`; the shape never changes after
/// construction.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    dims: usize,
    size: usize,
    cells: Vec<Cell>,
}

/// Unchecked wire form of [`Board`].
#[derive(Deserialize)]
struct RawBoard {
    dims: usize,
    size: usize,
    cells: Vec<Cell>,
}

impl TryFrom<RawBoard> for Board {
    type Error = HypertoeError;

    fn try_from(raw: RawBoard) -> Result<Self> {
        Board::from_cells(raw.dims, raw.size, raw.cells)
    }
}

impl Board {
    /// Create an all-empty board.
    ///
    /// # Errors
    /// Returns `HypertoeError::Configuration` if `dims` or `size` is zero, or
    /// if the cell count overflows.
    pub fn new(dims: usize, size: usize) -> Result<Self> {
        let len = checked_len(dims, size)?;
        Ok(Self {
            dims,
            size,
            cells: vec![Cell::Empty; len],
        })
    }

    /// Create a board from row-major cell contents.
    ///
    /// # Errors
    /// Returns `HypertoeError::Configuration` if the shape is invalid or
    /// `cells` has the wrong length.
    pub fn from_cells(dims: usize, size: usize, cells: Vec<Cell>) -> Result<Self> {
        let len = checked_len(dims, size)?;
        if cells.len() != len {
            return Err(HypertoeError::Configuration(format!(
                "board of shape [{}; {}] needs {} cells, got {}",
                size,
                dims,
                len,
                cells.len()
            )));
        }
        Ok(Self { dims, size, cells })
    }


    pub fn dims(&self) -> usize {
        self.dims
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when the board has no cells. Never the case for a constructed
    /// board, since every shape has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row-major view of all cells.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Flat index of `coord`.
    ///
    /// # Errors
    /// `DimensionMismatch` if the coordinate has the wrong number of axes,
    /// `IllegalMove` with `OutOfRange` if any component is `>= size`.
    pub fn index_of(&self, coord: &Coord) -> Result<usize> {
        flat_index(self.dims, self.size, coord)
    }

    /// Coordinate of a flat index. `index` must be `< len()`.
    pub fn coord_of(&self, index: usize) -> Coord {
        debug_assert!(index < self.cells.len());
        unflatten(self.dims, self.size, index)
    }

    pub fn get(&self, coord: &Coord) -> Result<Cell> {
        let index = self.index_of(coord)?;
        Ok(self.cells[index])
    }

    /// Cell at a flat index, `None` past the end.
    pub fn at(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Overwrite a cell without any rule checks.
    pub fn set(&mut self, coord: &Coord, cell: Cell) -> Result<()> {
        let index = self.index_of(coord)?;
        self.cells[index] = cell;
        Ok(())
    }

    /// Place `player`'s mark on an empty cell.
    ///
    /// # Errors
    /// `IllegalMove` if the cell is occupied (or invalid) or out of range.
    /// The board is untouched on error.
    pub fn place(&mut self, coord: &Coord, player: Player) -> Result<()> {
        let index = self.index_of(coord)?;
        if !self.cells[index].is_empty() {
            return Err(HypertoeError::illegal(coord, IllegalReason::Occupied));
        }
        self.cells[index] = Cell::from(player);
        Ok(())
    }

    /// True when no `Empty` cell remains.
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Number of cells equal to `cell`.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Mask of legal targets (empty cells).
    pub fn action_mask(&self) -> ActionMask {
        ActionMask {
            dims: self.dims,
            size: self.size,
            mask: self.cells.iter().map(|c| c.is_empty()).collect(),
        }
    }
}

impl fmt::Display for Board {
    /// Prints the board as 2D slices over the last two axes, separated by
    /// blank lines.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plane = if self.dims == 1 { self.size } else { self.size * self.size };
        for (p, slice) in self.cells.chunks(plane).enumerate() {
            if p > 0 {
                writeln!(f)?;
            }
            for row in slice.chunks(self.size) {
                let line: String = row.iter().map(|c| c.symbol()).collect();
                writeln!(f, "{}", line)?;
            }
        }
        Ok(())
    }
}

/// Boolean mask with the board's shape: true exactly where a move is legal.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawActionMask")]
pub struct ActionMask {
    dims: usize,
    size: usize,
    mask: Vec<bool>,
}

/// Unchecked wire form of [`ActionMask`].
#[derive(Deserialize)]
struct RawActionMask {
    dims: usize,
    size: usize,
    mask: Vec<bool>,
}

impl TryFrom<RawActionMask> for ActionMask {
    type Error = HypertoeError;

    fn try_from(raw: RawActionMask) -> Result<Self> {
        let len = checked_len(raw.dims, raw.size)?;
        if raw.mask.len() != len {
            return Err(HypertoeError::Configuration(format!(
                "action mask of shape [{}; {}] needs {} flags, got {}",
                raw.size,
                raw.dims,
                len,
                raw.mask.len()
            )));
        }
        Ok(ActionMask {
            dims: raw.dims,
            size: raw.size,
            mask: raw.mask,
        })
    }
}

impl ActionMask {
    pub fn dims(&self) -> usize {
        self.dims
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Row-major flags.
    pub fn as_slice(&self) -> &[bool] {
        &self.mask
    }

    /// Number of legal moves.
    pub fn count(&self) -> usize {
        self.mask.iter().filter(|&&legal| legal).count()
    }

    /// True when there is no legal move.
    pub fn is_exhausted(&self) -> bool {
        !self.mask.contains(&true)
    }

    /// Whether `coord` is marked legal.
    ///
    /// # Errors
    /// Same range checks as [`Board::index_of`].
    pub fn is_legal(&self, coord: &Coord) -> Result<bool> {
        let index = flat_index(self.dims, self.size, coord)?;
        Ok(self.mask[index])
    }

    /// Legal coordinates in row-major order.
    pub fn legal_actions(&self) -> Vec<Coord> {
        self.mask
            .iter()
            .enumerate()
            .filter(|(_, &legal)| legal)
            .map(|(i, _)| unflatten(self.dims, self.size, i))
            .collect()
    }
}
