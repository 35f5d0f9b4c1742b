//! The game engine: live board state, transitions and reward shaping.

use std::collections::BTreeMap;

use hypertoe_core::{ActionMask, Board, Coord, Game, HypertoeError, Observation, Player, Result};

use crate::config::{GameConfig, RewardMode};
use crate::lines::{scoring_lines, ScoringLine};

/// Result of a real transition.
#[derive(Clone, Debug, PartialEq)]
pub struct StepOutcome {
    /// Position after the move; `current_player` is now the opponent.
    pub observation: Observation,

    /// Reward earned by the player who moved.
    pub reward: f64,

    /// No empty cell remains.
    pub terminated: bool,

    /// The move cap was reached.
    pub truncated: bool,
}

/// N-dimensional tic-tac-toe game.
///
/// Owns the live board and turn order. Scoring lines are computed once from
/// the board shape and shared by every score computation afterwards; scores
/// themselves are always recomputed from a board, never maintained
/// incrementally.
#[derive(Clone, Debug)]
pub struct GameEngine {
    config: GameConfig,
    reward_mode: RewardMode,
    lines: Vec<ScoringLine>,
    initial: Board,
    board: Board,
    current: Player,
    next: Player,
    move_count: u32,
    scores: [u32; 2],
}

impl GameEngine {
    /// Build an engine and reset it to the initial position.
    ///
    /// # Errors
    /// `Configuration` for malformed shapes, `UnsupportedRewardMode` for an
    /// unknown reward type.
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let reward_mode = config.reward_mode()?;
        let lines = scoring_lines(config.dimensions, config.size)?;
        let initial = Board::new(config.dimensions, config.size)?;
        Ok(Self {
            config,
            reward_mode,
            lines,
            board: initial.clone(),
            initial,
            current: Player::X,
            next: Player::O,
            move_count: 0,
            scores: [0; 2],
        })
    }

    /// Clear the board, zero scores and move count, and give X the move.
    pub fn reset(&mut self) -> Observation {
        self.board = self.initial.clone();
        self.current = Player::X;
        self.next = Player::O;
        self.move_count = 0;
        self.scores = [0; 2];
        self.observation()
    }

    /// Snapshot of the live position.
    pub fn observation(&self) -> Observation {
        Observation {
            current_player: self.current,
            next_player: self.next,
            board: self.board.clone(),
            action_mask: self.board.action_mask(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn scoring_lines(&self) -> &[ScoringLine] {
        &self.lines
    }

    /// Running score of each player on the live board.
    pub fn scores(&self) -> BTreeMap<Player, u32> {
        Player::ALL
            .iter()
            .map(|&p| (p, self.scores[p.index()]))
            .collect()
    }

    /// Whether `coord` is an empty cell of `board`.
    ///
    /// # Errors
    /// `IllegalMove` (out of range) or `DimensionMismatch` for coordinates
    /// that do not address a cell.
    pub fn is_legal(&self, board: &Board, coord: &Coord) -> Result<bool> {
        self.check_shape(board)?;
        Ok(board.get(coord)?.is_empty())
    }

    /// Play `action` for the player on move, advancing the live game.
    pub fn step(&mut self, action: &Coord) -> Result<StepOutcome> {
        self.apply(self.current, action)
    }

    /// Real transition for `player`, who must be the player on move.
    ///
    /// On error the engine is left exactly as it was.
    pub fn apply(&mut self, player: Player, action: &Coord) -> Result<StepOutcome> {
        if player != self.current {
            return Err(HypertoeError::OutOfTurn {
                expected: self.current,
                got: player,
            });
        }

        let mut new_board = self.board.clone();
        new_board.place(action, player)?;
        let reward = self.reward(&self.board, player, action, &new_board);

        self.board = new_board;
        self.move_count += 1;
        self.scores[player.index()] = self.score(&self.board, player);

        let terminated = self.is_terminal(&self.board);
        let truncated = self
            .config
            .max_moves
            .is_some_and(|cap| self.move_count >= cap);

        std::mem::swap(&mut self.current, &mut self.next);

        Ok(StepOutcome {
            observation: self.observation(),
            reward,
            terminated,
            truncated,
        })
    }

    /// Hypothetical transition on a copy of `board`; the engine is untouched.
    ///
    /// In the returned observation `player` is the next player and the
    /// opponent is on move.
    pub fn simulate(
        &self,
        board: &Board,
        player: Player,
        action: &Coord,
    ) -> Result<(Observation, f64)> {
        self.check_shape(board)?;
        let mut new_board = board.clone();
        new_board.place(action, player)?;
        let reward = self.reward(board, player, action, &new_board);
        let action_mask = new_board.action_mask();
        Ok((
            Observation {
                current_player: player.opposite(),
                next_player: player,
                board: new_board,
                action_mask,
            },
            reward,
        ))
    }

    /// Number of scoring lines fully owned by `player`.
    ///
    /// `board` must have the engine's shape; lines are laid out for that
    /// shape only. Use [`checked_score`](Self::checked_score) for boards of
    /// unknown origin.
    pub fn score(&self, board: &Board, player: Player) -> u32 {
        self.lines
            .iter()
            .filter(|line| line.is_owned_by(board, player))
            .count() as u32
    }

    /// [`score`](Self::score) after checking that `board` has the engine's
    /// shape.
    ///
    /// # Errors
    /// `DimensionMismatch` or `Configuration` for a board of another shape.
    pub fn checked_score(&self, board: &Board, player: Player) -> Result<u32> {
        self.check_shape(board)?;
        Ok(self.score(board, player))
    }

    /// Reward `player` earns for moving from `previous` to `new_board`.
    ///
    /// Shared by [`apply`](Self::apply) and [`simulate`](Self::simulate),
    /// which check both boards' shape first.
    pub fn reward(
        &self,
        previous: &Board,
        player: Player,
        _action: &Coord,
        new_board: &Board,
    ) -> f64 {
        let mut reward = match self.reward_mode {
            RewardMode::Dense => {
                f64::from(self.score(new_board, player)) - f64::from(self.score(previous, player))
            }
        };
        if self.config.bonus
            && self.is_terminal(new_board)
            && self.determine_winner(new_board) == Some(player)
        {
            reward += self.config.bonus_value;
        }
        reward
    }

    /// The player with strictly the highest score, or `None` on a tie.
    /// Same shape precondition as [`score`](Self::score).
    pub fn determine_winner(&self, board: &Board) -> Option<Player> {
        let x = self.score(board, Player::X);
        let o = self.score(board, Player::O);
        match x.cmp(&o) {
            std::cmp::Ordering::Greater => Some(Player::X),
            std::cmp::Ordering::Less => Some(Player::O),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// True when no empty cell remains.
    pub fn is_terminal(&self, board: &Board) -> bool {
        board.is_full()
    }

    pub fn action_mask(&self, board: &Board) -> ActionMask {
        board.action_mask()
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn next_player(&self) -> Player {
        self.next
    }

    fn check_shape(&self, board: &Board) -> Result<()> {
        if board.dims() != self.config.dimensions {
            return Err(HypertoeError::DimensionMismatch {
                expected: self.config.dimensions,
                got: board.dims(),
            });
        }
        if board.size() != self.config.size {
            return Err(HypertoeError::Configuration(format!(
                "board side {} does not match engine side {}",
                board.size(),
                self.config.size
            )));
        }
        Ok(())
    }
}

impl Game for GameEngine {
    fn simulate(
        &self,
        board: &Board,
        player: Player,
        action: &Coord,
    ) -> Result<(Observation, f64)> {
        GameEngine::simulate(self, board, player, action)
    }

    fn score(&self, board: &Board, player: Player) -> u32 {
        GameEngine::score(self, board, player)
    }

    fn is_terminal(&self, board: &Board) -> bool {
        GameEngine::is_terminal(self, board)
    }

    fn current_player(&self) -> Player {
        self.current
    }

    fn next_player(&self) -> Player {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hypertoe_core::{Cell, IllegalReason};

    fn board_2d(rows: [&str; 3]) -> Board {
        let cells = rows
            .iter()
            .flat_map(|r| r.chars())
            .map(|c| match c {
                'X' => Cell::X,
                'O' => Cell::O,
                _ => Cell::Empty,
            })
            .collect();
        Board::from_cells(2, 3, cells).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let mut engine = GameEngine::new(GameConfig::two_dims()).unwrap();
        let obs = engine.reset();

        assert_eq!(obs.current_player, Player::X);
        assert_eq!(obs.next_player, Player::O);
        assert_eq!(obs.action_mask.count(), 9);
        assert_eq!(engine.move_count(), 0);
        assert!(engine.scores().values().all(|&s| s == 0));
        assert_eq!(engine.scoring_lines().len(), 8);
    }

    #[test]
    fn test_diagonal_scenario() {
        let engine = GameEngine::new(GameConfig::two_dims()).unwrap();
        let board = board_2d(["XOO", "XXO", "..X"]);

        assert_eq!(engine.score(&board, Player::X), 1);
        assert_eq!(engine.score(&board, Player::O), 0);
        assert_eq!(engine.determine_winner(&board), Some(Player::X));
    }

    #[test]
    fn test_step_switches_players_and_counts_moves() {
        let mut engine = GameEngine::new(GameConfig::two_dims()).unwrap();
        engine.reset();

        let outcome = engine.step(&Coord::from([1, 1])).unwrap();
        assert_eq!(outcome.observation.current_player, Player::O);
        assert_eq!(outcome.observation.next_player, Player::X);
        assert_eq!(outcome.reward, 0.0);
        assert!(!outcome.terminated);
        assert!(!outcome.truncated);
        assert_eq!(engine.move_count(), 1);
        assert_eq!(engine.board().get(&Coord::from([1, 1])).unwrap(), Cell::X);
    }

    #[test]
    fn test_step_rewards_completed_line() {
        let mut engine = GameEngine::new(GameConfig::two_dims()).unwrap();
        engine.reset();
        // X: (0,0) (0,1) (0,2); O: (1,0) (1,1)
        for c in [[0, 0], [1, 0], [0, 1], [1, 1]] {
            engine.step(&Coord::from(c)).unwrap();
        }
        let outcome = engine.step(&Coord::from([0, 2])).unwrap();
        assert_eq!(outcome.reward, 1.0);
        assert_eq!(engine.scores()[&Player::X], 1);
        assert_eq!(engine.scores()[&Player::O], 0);
    }

    #[test]
    fn test_occupied_cell_is_rejected_atomically() {
        let mut engine = GameEngine::new(GameConfig::two_dims()).unwrap();
        engine.reset();
        engine.step(&Coord::from([0, 0])).unwrap();
        let before = engine.board().clone();

        let err = engine.step(&Coord::from([0, 0])).unwrap_err();
        assert_eq!(
            err,
            HypertoeError::illegal(&Coord::from([0, 0]), IllegalReason::Occupied)
        );
        assert_eq!(engine.board(), &before);
        assert_eq!(engine.move_count(), 1);
        assert_eq!(engine.current_player(), Player::O);
    }

    #[test]
    fn test_out_of_range_is_illegal() {
        let mut engine = GameEngine::new(GameConfig::two_dims()).unwrap();
        engine.reset();
        let err = engine.step(&Coord::from([0, 3])).unwrap_err();
        assert!(err.is_illegal_move());
        assert!(engine.is_legal(engine.board(), &Coord::from([5, 0])).is_err());
        assert!(engine.is_legal(engine.board(), &Coord::from([2, 2])).unwrap());
    }

    #[test]
    fn test_apply_out_of_turn() {
        let mut engine = GameEngine::new(GameConfig::two_dims()).unwrap();
        engine.reset();
        let err = engine.apply(Player::O, &Coord::from([0, 0])).unwrap_err();
        assert_eq!(
            err,
            HypertoeError::OutOfTurn {
                expected: Player::X,
                got: Player::O
            }
        );
    }

    #[test]
    fn test_simulate_leaves_engine_untouched() {
        let mut engine = GameEngine::new(GameConfig::two_dims()).unwrap();
        let obs = engine.reset();

        let (child, reward) = engine.simulate(&obs.board, Player::X, &Coord::from([2, 2])).unwrap();
        assert_eq!(reward, 0.0);
        assert_eq!(child.current_player, Player::O);
        assert_eq!(child.next_player, Player::X);
        assert_eq!(child.board.get(&Coord::from([2, 2])).unwrap(), Cell::X);
        assert_eq!(engine.board(), &obs.board);
        assert_eq!(engine.move_count(), 0);
    }

    #[test]
    fn test_simulate_validates_given_board() {
        let engine = GameEngine::new(GameConfig::two_dims()).unwrap();
        let board = board_2d(["X..", "...", "..."]);
        assert!(engine.simulate(&board, Player::O, &Coord::from([0, 0])).is_err());
        assert!(engine.simulate(&board, Player::O, &Coord::from([0, 1])).is_ok());

        let cube = Board::new(3, 3).unwrap();
        assert!(engine.simulate(&cube, Player::O, &Coord::from([0, 0, 0])).is_err());
    }

    #[test]
    fn test_checked_score_rejects_other_shapes() {
        let engine = GameEngine::new(GameConfig::two_dims()).unwrap();
        let wide = Board::from_cells(2, 4, vec![Cell::X; 16]).unwrap();
        assert!(engine.checked_score(&wide, Player::X).is_err());

        let cube = Board::new(3, 3).unwrap();
        assert_eq!(
            engine.checked_score(&cube, Player::X).unwrap_err(),
            HypertoeError::DimensionMismatch { expected: 2, got: 3 }
        );

        let full = board_2d(["XXX", "XXX", "XXX"]);
        assert_eq!(engine.checked_score(&full, Player::X).unwrap(), 8);
    }

    #[test]
    fn test_truncation() {
        let mut engine = GameEngine::new(GameConfig::two_dims().with_max_moves(2)).unwrap();
        engine.reset();
        assert!(!engine.step(&Coord::from([0, 0])).unwrap().truncated);
        assert!(engine.step(&Coord::from([0, 1])).unwrap().truncated);
    }

    #[test]
    fn test_bonus_for_outright_winner() {
        let engine = GameEngine::new(GameConfig::two_dims().with_bonus(10.0)).unwrap();
        // X completes the anti-diagonal with the last empty cell.
        let before = board_2d(["XOX", "OXO", ".XO"]);
        let (child, reward) = engine.simulate(&before, Player::X, &Coord::from([2, 0])).unwrap();
        assert!(engine.is_terminal(&child.board));
        assert_eq!(reward, 11.0);
    }

    #[test]
    fn test_no_bonus_on_tie() {
        let engine = GameEngine::new(GameConfig::two_dims().with_bonus(10.0)).unwrap();
        // Final position: X owns the top row, O the bottom row.
        let before = board_2d(["XXX", "OXO", "OO."]);
        let (child, reward) = engine.simulate(&before, Player::O, &Coord::from([2, 2])).unwrap();
        assert!(engine.is_terminal(&child.board));
        assert_eq!(engine.determine_winner(&child.board), None);
        assert_eq!(reward, 1.0);
    }

    #[test]
    fn test_no_bonus_before_terminal() {
        let engine = GameEngine::new(GameConfig::two_dims().with_bonus(10.0)).unwrap();
        let before = board_2d(["XX.", "OO.", "..."]);
        let (_, reward) = engine.simulate(&before, Player::X, &Coord::from([0, 2])).unwrap();
        assert_eq!(reward, 1.0);
    }

    #[test]
    fn test_reward_is_score_delta() {
        let engine = GameEngine::new(GameConfig::two_dims()).unwrap();
        let before = board_2d(["X.X", ".X.", "X.X"]);
        let after = board_2d(["XXX", ".X.", "X.X"]);
        // Top row plus the (already owned) diagonals: delta is the row only.
        assert_eq!(engine.reward(&before, Player::X, &Coord::from([0, 1]), &after), 1.0);
        assert_eq!(engine.reward(&before, Player::O, &Coord::from([0, 1]), &after), 0.0);
    }

    #[test]
    fn test_unsupported_reward_mode_fails_construction() {
        let config = GameConfig {
            reward_type: "sparse".into(),
            ..Default::default()
        };
        assert_eq!(
            GameEngine::new(config).unwrap_err(),
            HypertoeError::UnsupportedRewardMode("sparse".into())
        );
    }

    #[test]
    fn test_reset_restores_initial_position() {
        let mut engine = GameEngine::new(GameConfig::three_dims()).unwrap();
        let initial = engine.reset();
        engine.step(&Coord::from([1, 1, 1])).unwrap();
        engine.step(&Coord::from([0, 0, 0])).unwrap();

        let again = engine.reset();
        assert_eq!(initial, again);
        assert_eq!(engine.move_count(), 0);
    }
}
