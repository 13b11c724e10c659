//! Match flow on top of the board.
//!
//! ## Key Components
//!
//! - [`MatchController`]: selection, per-tick movement, commit, removal
//!   and win/loss detection
//! - [`EnRoute`]: explicit state of the piece in flight
//! - [`GameEvent`] / [`EventQueue`]: outbound notifications for the
//!   presentation layer
//!
//! The controller owns its [`BoardState`](crate::board::BoardState)
//! exclusively and is driven from a single thread.

mod event;
mod match_controller;
mod movement;

pub use event::{EventQueue, GameEvent, GameOutcome};
pub use match_controller::{MatchController, MovementStatus, SelectOutcome};
pub use movement::{EnRoute, MovementParams, Step};
