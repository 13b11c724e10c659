//! Serializable session snapshots.
//!
//! A [`Snapshot`] captures everything needed to resume a
//! [`MatchController`](crate::controller::MatchController) except the
//! pending event queue. The board uses persistent collections, so taking a
//! snapshot is cheap.

use serde::{Deserialize, Serialize};

use crate::board::BoardState;
use crate::controller::{EnRoute, GameOutcome, MovementParams};
use crate::core::SnapshotError;

/// Frozen copy of a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub board: BoardState,
    pub params: MovementParams,
    pub score_per_match: u32,
    pub en_route: Option<EnRoute>,
    pub score: u32,
    pub outcome: GameOutcome,
    pub last_move_matched: bool,
}

impl Snapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(SnapshotError::Encode)
    }

    /// Decode bytes produced by [`Snapshot::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        bincode::deserialize(bytes).map_err(SnapshotError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::MatchController;
    use crate::core::BoardConfig;

    #[test]
    fn test_snapshot_bytes() {
        let mut game = MatchController::setup(&BoardConfig::default()).unwrap();
        let piece = game.board().selectable_pieces()[0];
        game.select_piece(piece).unwrap();
        game.tick(0.1).unwrap();

        let snapshot = game.snapshot();
        let bytes = snapshot.to_bytes().unwrap();
        let back = Snapshot::from_bytes(&bytes).unwrap();
        assert_eq!(snapshot, back);

        let restored = MatchController::restore(back);
        assert_eq!(restored.active_piece(), Some(piece));
        assert_eq!(restored.board(), game.board());
        assert!(restored.pending_events().is_empty());
    }

    #[test]
    fn test_decode_garbage() {
        let err = Snapshot::from_bytes(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, SnapshotError::Decode(_)));
    }

    #[test]
    fn test_restored_session_diverges_independently() {
        let mut game = MatchController::setup(&BoardConfig::default()).unwrap();
        let snapshot = game.snapshot();

        let piece = game.board().selectable_pieces()[0];
        game.select_piece(piece).unwrap();
        game.finalize_move(piece).unwrap();

        let restored = MatchController::restore(snapshot);
        assert_eq!(restored.board().count_on_board(), 15);
        assert_eq!(game.board().count_on_board(), 14);
    }
}
