//! # trio-board
//!
//! Engine for a tile-matching puzzle: coloured pieces sit on a grid, the
//! player sends free pieces to a row of holding slots, and every third
//! parked piece of a colour clears that colour from the slots.
//!
//! ## Design Principles
//!
//! 1. **Presentation-Free**: No rendering, input or audio. The engine takes
//!    selections and frame deltas, and reports back through
//!    [`GameEvent`]s.
//!
//! 2. **Single Owner**: One [`MatchController`] owns one [`BoardState`];
//!    all mutation goes through it on a single thread.
//!
//! 3. **Configuration Over Convention**: Grid size, palette, slots and
//!    movement tuning come from [`BoardConfig`].
//!
//! ## Architecture
//!
//! - **Discrete occupancy, continuous movement**: the grid only knows
//!   `Empty` / `Occupied` / `Reserved` cells; a travelling piece carries its
//!   own world position in [`EnRoute`] and drags its occupancy along.
//!
//! - **Persistent Data Structures**: piece records live in an `im` vector so
//!   snapshots are O(1) to take.
//!
//! ## Modules
//!
//! - `core`: coordinates, pieces, configuration, errors, RNG
//! - `board`: grid, holding slots, colour tally, initial spawn
//! - `controller`: selection, movement, removal, outcome, events
//! - `snapshot`: serializable session state

pub mod board;
pub mod controller;
pub mod core;
pub mod snapshot;

// Re-export commonly used types
pub use crate::core::{
    Axis, BoardConfig, BoardError, ConfigError, Coord, Direction, GameRng, Piece, PieceColor,
    PieceId, PieceStatus, RejectReason, WorldPos, MATCH_SIZE, MAX_SLOTS,
};

pub use crate::board::{
    spawn_initial_pieces, BoardState, CellState, ColorTally, Grid, HoldingSlot, SlotId,
};

pub use crate::controller::{
    EnRoute, EventQueue, GameEvent, GameOutcome, MatchController, MovementParams, MovementStatus,
    SelectOutcome,
};

pub use crate::snapshot::Snapshot;
