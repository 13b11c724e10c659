//! Error types.
//!
//! Expected rejections of a selection (`Blocked`, `NoSlotAvailable`, ...)
//! are not errors; they are returned as [`RejectReason`] values and raised
//! as events. The error types here cover programming mistakes (bad
//! coordinates, unknown ids, inconsistent commits) and setup failures.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::coord::Coord;
use super::piece::PieceId;
use crate::board::SlotId;

/// Errors raised by board and controller operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("coordinate {coord} is outside the {rows}x{columns} grid")]
    InvalidCoordinate { coord: Coord, rows: usize, columns: usize },

    #[error("invalid spawn configuration: {0}")]
    InvalidSpawnConfig(String),

    #[error("unknown piece {0}")]
    UnknownPiece(PieceId),

    #[error("unknown slot {0}")]
    UnknownSlot(SlotId),

    #[error("slot {0} is already occupied")]
    SlotOccupied(SlotId),

    #[error("cell {0} is already occupied")]
    CellOccupied(Coord),

    #[error("{piece} is at {actual}, not {expected}")]
    PositionMismatch { piece: PieceId, expected: Coord, actual: Coord },

    #[error("{0} is not on the board")]
    NotOnBoard(PieceId),

    #[error("{0} is not travelling to a slot")]
    NotEnRoute(PieceId),
}

/// Why a selection was turned down. No state changes accompany a rejection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectReason {
    /// Every in-bounds neighbour of the piece is occupied.
    Blocked,
    /// All holding slots are taken.
    NoSlotAvailable,
    /// The piece is already parked or removed.
    NotOnBoard,
    /// The game has been won or lost.
    GameOver,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            RejectReason::Blocked => "piece is blocked by its neighbours",
            RejectReason::NoSlotAvailable => "no holding slot available",
            RejectReason::NotOnBoard => "piece is not on the board",
            RejectReason::GameOver => "game is over",
        };
        f.write_str(text)
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Invalid(#[from] BoardError),
}

/// Errors raised while encoding or decoding a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to encode snapshot: {0}")]
    Encode(bincode::Error),

    #[error("failed to decode snapshot: {0}")]
    Decode(bincode::Error),
}
