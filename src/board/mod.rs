//! Board state: occupancy, adjacency, holding slots and colour tally.
//!
//! ## Key Components
//!
//! - [`Grid`]: fixed matrix of `Empty` / `Occupied` / `Reserved` cells
//! - [`HoldingSlot`]: parking spots on the reserved row
//! - [`ColorTally`]: parked pieces per colour
//! - [`BoardState`]: owns all of the above plus the piece records
//! - [`spawn_initial_pieces`]: builds a board with its starting layout
//!
//! The board has no notion of turns, scores or movement; the
//! [`controller`](crate::controller) drives it.

mod grid;
mod slots;
mod spawn;
mod state;
mod tally;

pub use grid::{CellState, Grid};
pub use slots::{HoldingSlot, SlotId};
pub use spawn::{color_pool, spawn_initial_pieces};
pub use state::BoardState;
pub use tally::ColorTally;
