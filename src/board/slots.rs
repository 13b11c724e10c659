//! Holding slots on the reserved row.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Coord, PieceColor, PieceId};

/// Slot identifier: its position in the priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotId(pub u8);

impl SlotId {
    /// Create a new slot ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Priority index (0 is tried first).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Slot({})", self.0)
    }
}

/// A parking spot for a selected piece.
///
/// A slot is available iff it has no occupant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldingSlot {
    pub id: SlotId,
    pub coord: Coord,
    occupant: Option<PieceId>,
    /// Colours parked here. Only the count per colour matters.
    colors: SmallVec<[PieceColor; 3]>,
}

impl HoldingSlot {
    /// Create an empty slot.
    #[must_use]
    pub fn new(id: SlotId, coord: Coord) -> Self {
        Self {
            id,
            coord,
            occupant: None,
            colors: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.occupant.is_none()
    }

    #[must_use]
    pub fn occupant(&self) -> Option<PieceId> {
        self.occupant
    }

    #[must_use]
    pub fn colors(&self) -> &[PieceColor] {
        &self.colors
    }

    pub(crate) fn park(&mut self, piece: PieceId, color: PieceColor) {
        self.occupant = Some(piece);
        self.colors.push(color);
    }

    pub(crate) fn release(&mut self) -> Option<PieceId> {
        self.colors.clear();
        self.occupant.take()
    }
}
