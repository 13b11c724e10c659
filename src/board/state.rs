//! Board state: the single source of truth for occupancy and adjacency.
//!
//! `BoardState` owns:
//! - the occupancy [`Grid`]
//! - the [`HoldingSlot`]s in priority order
//! - the logical [`Piece`] records (indexed by `PieceId`)
//! - the [`ColorTally`] of parked pieces
//!
//! One instance belongs to one game session. Pieces are kept in an
//! `im::Vector` so cloning a board for a snapshot or a look-ahead is cheap.
//!
//! ## Blocking
//!
//! A piece is blocked iff every neighbour that exists on the grid is
//! occupied. Corners consult two neighbours, edges three, interior cells
//! four. Reserved-row cells exist but are never occupied, so a piece next
//! to the reserved row can always move.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use super::grid::{CellState, Grid};
use super::slots::{HoldingSlot, SlotId};
use super::tally::ColorTally;
use crate::core::{
    Adjacency, BoardConfig, BoardError, Coord, Direction, Piece, PieceColor, PieceId, PieceStatus,
    WorldPos,
};

/// Occupancy, slots, pieces and tally for one game session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardState {
    grid: Grid,
    reserved_row: usize,
    cell_width: f32,
    cell_height: f32,
    slots: Vec<HoldingSlot>,
    pieces: Vector<Piece>,
    tally: ColorTally,
}

impl BoardState {
    /// Create an empty board from a validated configuration.
    pub fn new(config: &BoardConfig) -> Result<Self, BoardError> {
        config.validate()?;

        let slots = config
            .slots
            .iter()
            .enumerate()
            .map(|(i, &coord)| HoldingSlot::new(SlotId::new(i as u8), coord))
            .collect();

        Ok(Self {
            grid: Grid::new(config.rows, config.columns, config.reserved_row),
            reserved_row: config.reserved_row,
            cell_width: config.cell_width,
            cell_height: config.cell_height,
            slots,
            pieces: Vector::new(),
            tally: ColorTally::new(),
        })
    }

    // === Shape ===

    #[must_use]
    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.grid.columns()
    }

    #[must_use]
    pub fn reserved_row(&self) -> usize {
        self.reserved_row
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// State of a single cell.
    pub fn cell_state(&self, coord: Coord) -> Result<CellState, BoardError> {
        self.grid.get(coord)
    }

    // === Pieces ===

    /// Put a new piece on an empty play cell.
    pub fn place_piece(&mut self, color: PieceColor, cell: Coord) -> Result<PieceId, BoardError> {
        match self.grid.get(cell)? {
            CellState::Empty => {}
            CellState::Occupied => return Err(BoardError::CellOccupied(cell)),
            CellState::Reserved => {
                return Err(BoardError::InvalidSpawnConfig(format!(
                    "cannot place a piece on reserved cell {cell}"
                )))
            }
        }

        let id = PieceId::new(self.pieces.len() as u32);
        self.grid.set(cell, CellState::Occupied)?;
        self.pieces.push_back(Piece::new(id, color, cell));
        Ok(id)
    }

    /// Look up a piece.
    pub fn piece(&self, id: PieceId) -> Result<&Piece, BoardError> {
        self.pieces.get(id.index()).ok_or(BoardError::UnknownPiece(id))
    }

    fn piece_mut(&mut self, id: PieceId) -> Result<&mut Piece, BoardError> {
        self.pieces.get_mut(id.index()).ok_or(BoardError::UnknownPiece(id))
    }

    /// All pieces ever spawned, in id order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.iter()
    }

    /// Number of pieces with status `OnBoard`.
    #[must_use]
    pub fn count_on_board(&self) -> usize {
        self.pieces.iter().filter(|p| p.is_on_board()).count()
    }

    /// Number of pieces with status `InSlot`.
    #[must_use]
    pub fn count_in_slots(&self) -> usize {
        self.pieces.iter().filter(|p| p.is_in_slot()).count()
    }

    /// On-board pieces that are not blocked, in id order.
    #[must_use]
    pub fn selectable_pieces(&self) -> Vec<PieceId> {
        self.pieces
            .iter()
            .filter(|p| p.is_on_board())
            .filter(|p| !self.is_blocked(p.cell).unwrap_or(true))
            .map(|p| p.id)
            .collect()
    }

    // === Adjacency ===

    /// Raw occupancy of the four orthogonal neighbours.
    /// Out-of-bounds directions report `false`.
    pub fn adjacent_occupancy(&self, coord: Coord) -> Result<Adjacency, BoardError> {
        self.grid.check(coord)?;
        let mut adjacency = Adjacency::default();
        for direction in Direction::ALL {
            let occupied = coord
                .neighbor(direction, self.rows(), self.columns())
                .is_some_and(|n| self.grid.is_occupied(n));
            adjacency.set(direction, occupied);
        }
        Ok(adjacency)
    }

    /// Whether the piece at `coord` is boxed in by its neighbours.
    pub fn is_blocked(&self, coord: Coord) -> Result<bool, BoardError> {
        self.grid.check(coord)?;
        let mut neighbors = Direction::ALL
            .iter()
            .filter_map(|&d| coord.neighbor(d, self.rows(), self.columns()))
            .peekable();

        if neighbors.peek().is_none() {
            return Ok(false);
        }
        Ok(neighbors.all(|n| self.grid.is_occupied(n)))
    }

    // === Slots ===

    /// First available slot in priority order.
    #[must_use]
    pub fn next_free_slot(&self) -> Option<SlotId> {
        self.slots.iter().find(|s| s.is_available()).map(|s| s.id)
    }

    /// Look up a slot.
    pub fn slot(&self, id: SlotId) -> Result<&HoldingSlot, BoardError> {
        self.slots.get(id.index()).ok_or(BoardError::UnknownSlot(id))
    }

    /// All slots in priority order.
    #[must_use]
    pub fn slots(&self) -> &[HoldingSlot] {
        &self.slots
    }

    #[must_use]
    pub fn slot_capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slots still free.
    #[must_use]
    pub fn open_slots(&self) -> usize {
        self.slots.iter().filter(|s| s.is_available()).count()
    }

    // === Tally ===

    #[must_use]
    pub fn tally(&self) -> &ColorTally {
        &self.tally
    }

    /// Count one more parked piece of `color`; returns the new count.
    pub fn record_arrival(&mut self, color: PieceColor) -> usize {
        let count = self.tally.increment(color);
        debug!("{}", self.tally);
        count
    }

    // === Mutations ===

    /// Move an on-board piece from `from` into `slot`.
    ///
    /// Frees `from`, parks the piece in the slot and marks it `InSlot`.
    pub fn commit_move(
        &mut self,
        id: PieceId,
        from: Coord,
        slot: SlotId,
    ) -> Result<(), BoardError> {
        self.grid.check(from)?;
        let piece = self.piece(id)?;
        if !piece.is_on_board() {
            return Err(BoardError::NotOnBoard(id));
        }
        if piece.cell != from {
            return Err(BoardError::PositionMismatch {
                piece: id,
                expected: from,
                actual: piece.cell,
            });
        }
        let color = piece.color;

        let target = self.slot(slot)?;
        if !target.is_available() {
            return Err(BoardError::SlotOccupied(slot));
        }
        let slot_coord = target.coord;

        self.grid.set(from, CellState::Empty)?;
        self.slots[slot.index()].park(id, color);
        let piece = self.piece_mut(id)?;
        piece.cell = slot_coord;
        piece.status = PieceStatus::InSlot;

        debug!(piece = %id, %from, %slot, "committed move");
        trace!("occupancy:\n{}", self.grid);
        Ok(())
    }

    /// Carry a travelling piece's occupancy from `from` into the play cell
    /// `to` as it crosses over.
    pub fn relocate(&mut self, id: PieceId, from: Coord, to: Coord) -> Result<(), BoardError> {
        self.grid.check(from)?;
        match self.grid.get(to)? {
            CellState::Empty => {}
            CellState::Occupied | CellState::Reserved => return Err(BoardError::CellOccupied(to)),
        }
        let piece = self.piece(id)?;
        if !piece.is_on_board() {
            return Err(BoardError::NotOnBoard(id));
        }
        if piece.cell != from {
            return Err(BoardError::PositionMismatch {
                piece: id,
                expected: from,
                actual: piece.cell,
            });
        }

        self.grid.set(from, CellState::Empty)?;
        self.grid.set(to, CellState::Occupied)?;
        self.piece_mut(id)?.cell = to;
        trace!(piece = %id, %from, %to, "relocated");
        Ok(())
    }

    /// Remove every parked piece of `color` on the reserved row: mark it
    /// `Removed`, free its slot and reset the colour's tally.
    pub fn remove_parked(&mut self, color: PieceColor) -> SmallVec<[PieceId; 3]> {
        let mut removed: SmallVec<[PieceId; 3]> = SmallVec::new();
        for slot in &mut self.slots {
            let Some(occupant) = slot.occupant() else {
                continue;
            };
            let Some(piece) = self.pieces.get(occupant.index()) else {
                continue;
            };
            if piece.color == color && piece.is_in_slot() && piece.cell.row == self.reserved_row {
                slot.release();
                removed.push(occupant);
            }
        }

        for id in &removed {
            if let Some(piece) = self.pieces.get_mut(id.index()) {
                piece.status = PieceStatus::Removed;
            }
        }
        self.tally.reset(color);

        debug!(%color, count = removed.len(), "removed parked pieces");
        trace!("occupancy:\n{}", self.grid);
        removed
    }

    // === World space ===

    /// Centre of a cell in world space.
    #[must_use]
    pub fn world_position(&self, coord: Coord) -> WorldPos {
        WorldPos::new(coord.col as f32 * self.cell_width, coord.row as f32 * self.cell_height)
    }

    /// Nearest cell to a world position, if it lies on the grid.
    #[must_use]
    pub fn cell_at(&self, pos: WorldPos) -> Option<Coord> {
        let row = (pos.z / self.cell_height).round();
        let col = (pos.x / self.cell_width).round();
        if row < 0.0 || col < 0.0 {
            return None;
        }
        let coord = Coord::new(row as usize, col as usize);
        self.grid.contains(coord).then_some(coord)
    }
}
