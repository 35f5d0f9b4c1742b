//! Scoring-line generation for boards of any dimensionality.
//!
//! A line visits `size` cells. Along each axis it either stays at a fixed
//! value, walks upwards (`0, 1, ..., size-1`) or walks downwards
//! (`size-1, ..., 0`). Every combination with at least one moving axis is a
//! line; walking it backwards flips every moving axis, so a line is kept only
//! when its first moving axis walks upwards. That leaves
//! `((size + 2)^dims - size^dims) / 2` distinct lines:
//!
//! | dims | size | lines |
//! |------|------|-------|
//! | 2    | 3    | 8     |
//! | 3    | 3    | 49    |
//! | 4    | 3    | 272   |

use hypertoe_core::{cell_count, Board, Cell, Coord, HypertoeError, Player, Result};

/// How a line moves along one axis.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Axis {
    Fixed(usize),
    Up,
    Down,
}

impl Axis {
    fn at(self, step: usize, size: usize) -> usize {
        match self {
            Axis::Fixed(c) => c,
            Axis::Up => step,
            Axis::Down => size - 1 - step,
        }
    }
}

/// A sequence of `size` cells that scores a point when one player owns all
/// of them.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ScoringLine {
    coords: Vec<Coord>,
    /// Row-major flat indices of `coords`.
    offsets: Vec<usize>,
}

impl ScoringLine {
    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// True if every cell of the line holds `player`'s mark.
    ///
    /// `board` must have the shape the line was generated for.
    pub fn is_owned_by(&self, board: &Board, player: Player) -> bool {
        let mark = Cell::from(player);
        self.offsets.iter().all(|&i| board.at(i) == Some(mark))
    }
}

/// Number of lines [`scoring_lines`] returns, or `None` on overflow.
pub fn line_count(dims: usize, size: usize) -> Option<usize> {
    let all = cell_count(dims, size.checked_add(2)?)?;
    let fixed = cell_count(dims, size)?;
    Some((all - fixed) / 2)
}

/// Enumerate every scoring line of a `[size; dims]` board.
///
/// The result depends only on `dims` and `size`. Lines are produced in a fixed
/// order (odometer over per-axis choices, last axis fastest), but scoring never
/// depends on that order.
///
/// # Errors
/// `HypertoeError::Configuration` if `dims == 0`, `size < 2`, or the board is
/// too large to index.
pub fn scoring_lines(dims: usize, size: usize) -> Result<Vec<ScoringLine>> {
    if dims == 0 {
        return Err(HypertoeError::Configuration(
            "board needs at least one dimension".to_string(),
        ));
    }
    if size < 2 {
        return Err(HypertoeError::Configuration(format!(
            "side length {} is too small to form distinct lines",
            size
        )));
    }
    let expected = line_count(dims, size).ok_or_else(|| {
        HypertoeError::Configuration(format!("board shape [{}; {}] is too large", size, dims))
    })?;

    // Per-axis choices: fixed values first, then the two directions.
    let choices: Vec<Axis> = (0..size)
        .map(Axis::Fixed)
        .chain([Axis::Up, Axis::Down])
        .collect();

    let mut lines = Vec::with_capacity(expected);
    let mut digits = vec![0usize; dims];
    loop {
        let axes: Vec<Axis> = digits.iter().map(|&d| choices[d]).collect();
        if first_moving(&axes) == Some(Axis::Up) {
            lines.push(build_line(&axes, size));
        }

        // Advance the odometer; the last axis turns fastest.
        let mut axis = dims;
        loop {
            if axis == 0 {
                debug_assert_eq!(lines.len(), expected);
                return Ok(lines);
            }
            axis -= 1;
            digits[axis] += 1;
            if digits[axis] < choices.len() {
                break;
            }
            digits[axis] = 0;
        }
    }
}

fn first_moving(axes: &[Axis]) -> Option<Axis> {
    axes.iter().copied().find(|a| !matches!(a, Axis::Fixed(_)))
}

fn build_line(axes: &[Axis], size: usize) -> ScoringLine {
    let mut coords = Vec::with_capacity(size);
    let mut offsets = Vec::with_capacity(size);
    for step in 0..size {
        let components: Vec<usize> = axes.iter().map(|a| a.at(step, size)).collect();
        offsets.push(components.iter().fold(0, |acc, &c| acc * size + c));
        coords.push(Coord::new(components));
    }
    ScoringLine { coords, offsets }
}
