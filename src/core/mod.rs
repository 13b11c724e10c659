//! Core engine types: coordinates, pieces, configuration, errors, RNG.
//!
//! Nothing in this module knows about occupancy or game flow; `board` and
//! `controller` build on these types.

pub mod coord;
pub mod piece;
pub mod config;
pub mod error;
pub mod rng;

pub use coord::{Adjacency, Axis, Coord, Direction, WorldPos};
pub use piece::{Piece, PieceColor, PieceId, PieceStatus};
pub use config::{BoardConfig, MATCH_SIZE, MAX_SLOTS};
pub use error::{BoardError, ConfigError, RejectReason, SnapshotError};
pub use rng::GameRng;
