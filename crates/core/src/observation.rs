//! Self-contained snapshots handed to agents.

use serde::{Deserialize, Serialize};

use crate::{ActionMask, Board, HypertoeError, Player, Result};

/// Snapshot of a game position.
///
/// The board is an owned copy; mutating the engine afterwards never changes
/// an observation already handed out.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawObservation")]
pub struct Observation {
    /// Player to move in this position.
    pub current_player: Player,

    /// Player moving after `current_player`.
    pub next_player: Player,

    pub board: Board,

    /// Derived from `board`; true exactly on empty cells.
    pub action_mask: ActionMask,
}

#[derive(Deserialize)]
struct RawObservation {
    current_player: Player,
    next_player: Player,
    board: Board,
    action_mask: ActionMask,
}

impl TryFrom<RawObservation> for Observation {
    type Error = HypertoeError;

    fn try_from(raw: RawObservation) -> Result<Self> {
        if raw.action_mask != raw.board.action_mask() {
            return Err(HypertoeError::Configuration(
                "action mask does not match the board's empty cells".into(),
            ));
        }
        Ok(Self {
            current_player: raw.current_player,
            next_player: raw.next_player,
            board: raw.board,
            action_mask: raw.action_mask,
        })
    }
}

impl Observation {
    /// Build an observation, deriving the action mask from `board`.
    pub fn new(board: Board, current_player: Player) -> Self {
        let action_mask = board.action_mask();
        Self {
            current_player,
            next_player: current_player.opposite(),
            board,
            action_mask,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Coord;

    #[test]
    fn test_new_derives_mask_and_next_player() {
        let mut board = Board::new(2, 3).unwrap();
        board.place(&Coord::from([1, 1]), Player::X).unwrap();

        let obs = Observation::new(board, Player::O);
        assert_eq!(obs.next_player, Player::X);
        assert_eq!(obs.action_mask.count(), 8);
        assert!(!obs.action_mask.is_legal(&Coord::from([1, 1])).unwrap());
    }

    #[test]
    fn test_observation_owns_its_board() {
        let mut board = Board::new(2, 3).unwrap();
        let obs = Observation::new(board.clone(), Player::X);
        board.place(&Coord::from([0, 0]), Player::X).unwrap();
        assert_eq!(obs.board.count(crate::Cell::Empty), 9);
    }

    #[test]
    fn test_deserialize_rejects_stale_mask() {
        let mut board = Board::new(2, 3).unwrap();
        let obs = Observation::new(board.clone(), Player::X);
        let json = serde_json::to_string(&obs).unwrap();
        assert_eq!(serde_json::from_str::<Observation>(&json).unwrap(), obs);

        board.place(&Coord::from([0, 0]), Player::X).unwrap();
        let mut stale = obs;
        stale.board = board;
        let json = serde_json::to_string(&stale).unwrap();
        assert!(serde_json::from_str::<Observation>(&json).is_err());
    }
}
