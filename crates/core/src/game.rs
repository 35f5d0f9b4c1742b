use crate::{ActionMask, Board, Coord, Observation, Player, Result};

/// Read-only view of the game rules used by search agents.
///
/// Agents never mutate the live game through this trait: every exploration
/// goes through [`Game::simulate`], which works on a copy of the board it is
/// given.
pub trait Game {
    /// Play `action` for `player` on a copy of `board`.
    ///
    /// Returns the resulting observation, in which `player` has become the
    /// next player, and the reward `player` earned for the move.
    ///
    /// # Errors
    /// `IllegalMove` if the target is occupied or out of range.
    fn simulate(
        &self,
        board: &Board,
        player: Player,
        action: &Coord,
    ) -> Result<(Observation, f64)>;

    /// Number of scoring lines fully owned by `player` on `board`, which must
    /// have the shape of the game's own boards.
    fn score(&self, board: &Board, player: Player) -> u32;

    /// True when `board` has no empty cell left.
    fn is_terminal(&self, board: &Board) -> bool {
        board.is_full()
    }

    /// Mask of legal moves on `board`.
    fn action_mask(&self, board: &Board) -> ActionMask {
        board.action_mask()
    }

    /// Player to move in the live game.
    fn current_player(&self) -> Player;

    /// Player moving after the current one in the live game.
    fn next_player(&self) -> Player;
}
