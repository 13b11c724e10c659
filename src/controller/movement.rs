//! Per-tick movement towards a holding slot.
//!
//! A travelling piece is modelled as an explicit [`EnRoute`] state that the
//! controller advances on every tick. Movement is axis-aligned:
//!
//! 1. The axis with the larger remaining distance goes first and stays
//!    locked until it is within `arrive_epsilon` of the target; then the
//!    other axis takes over.
//! 2. Before each step the next cell along the locked axis is checked. If
//!    it is occupied, the other axis is tried (it must still have distance
//!    to cover and a free next cell towards the target). If both are
//!    blocked the move is abandoned.
//! 3. Steps are split so a single step never crosses more than one cell
//!    boundary; occupancy follows the piece cell by cell.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::board::{BoardState, SlotId};
use crate::core::{Axis, BoardConfig, BoardError, Coord, PieceId, WorldPos};

/// Speed and arrival threshold.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovementParams {
    /// World units per second.
    pub move_speed: f32,
    /// Distance under which an axis counts as arrived.
    pub arrive_epsilon: f32,
}

impl Default for MovementParams {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            arrive_epsilon: 0.1,
        }
    }
}

impl From<&BoardConfig> for MovementParams {
    fn from(config: &BoardConfig) -> Self {
        Self {
            move_speed: config.move_speed,
            arrive_epsilon: config.arrive_epsilon,
        }
    }
}

/// A piece travelling towards its slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnRoute {
    pub piece: PieceId,
    pub slot: SlotId,
    /// Current continuous position.
    pub position: WorldPos,
    /// World position of the slot.
    pub target: WorldPos,
    /// Axis currently being travelled.
    pub axis: Axis,
}

impl EnRoute {
    /// Start a route at `start`. The longer axis goes first (ties go to Z).
    #[must_use]
    pub fn new(piece: PieceId, slot: SlotId, start: WorldPos, target: WorldPos) -> Self {
        let axis = if (target.x - start.x).abs() > (target.z - start.z).abs() {
            Axis::X
        } else {
            Axis::Z
        };
        Self {
            piece,
            slot,
            position: start,
            target,
            axis,
        }
    }

    /// Remaining signed distance `(dx, dz)`.
    #[must_use]
    pub fn remaining(&self) -> (f32, f32) {
        (self.target.x - self.position.x, self.target.z - self.position.z)
    }

    /// Remaining signed distance along one axis.
    #[must_use]
    pub fn remaining_along(&self, axis: Axis) -> f32 {
        self.target.along(axis) - self.position.along(axis)
    }

    /// Both axes within `epsilon` of the target.
    #[must_use]
    pub fn has_arrived(&self, epsilon: f32) -> bool {
        let (dx, dz) = self.remaining();
        dx.abs() <= epsilon && dz.abs() <= epsilon
    }
}

/// Result of advancing a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Still travelling.
    Moving,
    /// Within epsilon of the target on both axes.
    Arrived,
    /// Both axes blocked.
    Blocked,
}

/// Advance `route` by `dt` seconds.
pub(crate) fn advance(
    route: &mut EnRoute,
    board: &mut BoardState,
    params: &MovementParams,
    dt: f32,
) -> Result<Step, BoardError> {
    let max_step = max_sub_step(board);
    let mut budget = params.move_speed * dt.max(0.0);

    loop {
        if route.has_arrived(params.arrive_epsilon) {
            return Ok(Step::Arrived);
        }
        if budget <= 0.0 {
            return Ok(Step::Moving);
        }
        let step = budget.min(max_step);
        budget -= step;

        if !sub_step(route, board, params.arrive_epsilon, step)? {
            return Ok(Step::Blocked);
        }
    }
}

/// Half the smaller cell dimension: one sub-step crosses at most one cell
/// boundary.
fn max_sub_step(board: &BoardState) -> f32 {
    let origin = board.world_position(Coord::new(0, 0));
    let diagonal = board.world_position(Coord::new(1, 1));
    let width = diagonal.x - origin.x;
    let height = diagonal.z - origin.z;
    0.5 * width.min(height)
}

/// Move at most `step` along a clear axis. Returns `false` if both axes
/// are blocked.
fn sub_step(
    route: &mut EnRoute,
    board: &mut BoardState,
    epsilon: f32,
    step: f32,
) -> Result<bool, BoardError> {
    let cell = board.piece(route.piece)?.cell;
    let cursor = board.cell_at(route.position).unwrap_or(cell);

    if route.remaining_along(route.axis).abs() <= epsilon {
        route.axis = route.axis.other();
    }

    if !is_step_clear(board, cursor, route.axis, route.remaining_along(route.axis)) {
        let other = route.axis.other();
        let remaining = route.remaining_along(other);
        if remaining.abs() > epsilon && is_step_clear(board, cursor, other, remaining) {
            trace!(piece = %route.piece, axis = ?other, "switching axis around obstacle");
            route.axis = other;
        } else {
            return Ok(false);
        }
    }

    route.position = route.position.move_towards(route.axis, route.target, step);

    if let Some(next) = board.cell_at(route.position) {
        if next != cell && next.row != board.reserved_row() {
            board.relocate(route.piece, cell, next)?;
        }
    }
    Ok(true)
}

/// Whether the neighbour of `cursor` along `axis`, towards the target, is
/// free. Reserved and off-grid cells never block.
fn is_step_clear(board: &BoardState, cursor: Coord, axis: Axis, remaining: f32) -> bool {
    let direction = axis.direction(remaining > 0.0);
    match cursor.neighbor(direction, board.rows(), board.columns()) {
        Some(next) => !board.grid().is_occupied(next),
        None => true,
    }
}
