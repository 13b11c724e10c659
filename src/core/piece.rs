//! Piece identity, colour and lifecycle.
//!
//! Every character on the board has a unique `PieceId`. Ids are dense and
//! allocated in spawn order, so they double as indices into the board's
//! piece list.
//!
//! ## Lifecycle
//!
//! ```text
//! OnBoard ──(selected, free, slot available)──▶ [in flight]
//!         ──▶ InSlot ──(3 of a colour)──▶ Removed
//! ```
//!
//! The in-flight sub-state is owned by the match controller; the board only
//! sees `OnBoard` until the move is committed.

use serde::{Deserialize, Serialize};

use super::coord::Coord;

/// Unique identifier for a piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u32);

impl PieceId {
    /// Create a new piece ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Index into the board's piece list.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for PieceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Piece({})", self.0)
    }
}

/// Piece colour.
///
/// The reference palette is `Blue`, `Yellow`, `Magenta`; the rest are
/// available to configurations with larger palettes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceColor {
    Blue,
    Yellow,
    Magenta,
    Red,
    Green,
    Cyan,
    Orange,
    White,
}

impl PieceColor {
    /// The three-colour palette of the reference layout.
    pub const REFERENCE_PALETTE: [PieceColor; 3] =
        [PieceColor::Blue, PieceColor::Yellow, PieceColor::Magenta];

    /// Lowercase name, as used in configuration files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PieceColor::Blue => "blue",
            PieceColor::Yellow => "yellow",
            PieceColor::Magenta => "magenta",
            PieceColor::Red => "red",
            PieceColor::Green => "green",
            PieceColor::Cyan => "cyan",
            PieceColor::Orange => "orange",
            PieceColor::White => "white",
        }
    }
}

impl std::fmt::Display for PieceColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a piece is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceStatus {
    /// On a play cell (including while travelling towards a slot).
    OnBoard,
    /// Parked in a holding slot.
    InSlot,
    /// Cleared by a colour match.
    Removed,
}

/// Logical record of one piece. Visuals belong to the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub color: PieceColor,
    /// Last finalized cell: a play cell while `OnBoard`, the slot
    /// coordinate once `InSlot`.
    pub cell: Coord,
    pub status: PieceStatus,
}

impl Piece {
    /// Create a piece sitting on `cell`.
    #[must_use]
    pub fn new(id: PieceId, color: PieceColor, cell: Coord) -> Self {
        Self {
            id,
            color,
            cell,
            status: PieceStatus::OnBoard,
        }
    }

    #[must_use]
    pub fn is_on_board(&self) -> bool {
        self.status == PieceStatus::OnBoard
    }

    #[must_use]
    pub fn is_in_slot(&self) -> bool {
        self.status == PieceStatus::InSlot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_id() {
        let id = PieceId::new(7);
        assert_eq!(id.raw(), 7);
        assert_eq!(id.index(), 7);
        assert_eq!(PieceId::from(7), id);
        assert_eq!(format!("{}", id), "Piece(7)");
    }

    #[test]
    fn test_new_piece_is_on_board() {
        let piece = Piece::new(PieceId::new(0), PieceColor::Blue, Coord::new(1, 2));
        assert!(piece.is_on_board());
        assert!(!piece.is_in_slot());
    }

    #[test]
    fn test_color_names() {
        assert_eq!(format!("{}", PieceColor::Magenta), "magenta");
        let json = serde_json::to_string(&PieceColor::Yellow).unwrap();
        assert_eq!(json, "\"yellow\"");
    }

    #[test]
    fn test_piece_serialization() {
        let piece = Piece::new(PieceId::new(3), PieceColor::Yellow, Coord::new(0, 5));
        let json = serde_json::to_string(&piece).unwrap();
        let back: Piece = serde_json::from_str(&json).unwrap();
        assert_eq!(piece, back);
    }
}
