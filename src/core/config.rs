//! Board configuration.
//!
//! A `BoardConfig` describes one game session: grid shape, cell size used
//! for world positions, how many pieces to spawn and in which colours,
//! where the holding slots are, and the movement/scoring parameters.
//!
//! Defaults reproduce the reference layout: a 9×6 grid whose last row is
//! reserved for four holding slots, 15 pieces in blue, yellow and magenta.
//!
//! Configurations can be built in code with the `with_*` methods or loaded
//! from TOML; missing keys fall back to the defaults.
//!
//! ```
//! use trio_board::core::BoardConfig;
//!
//! let config = BoardConfig::from_toml_str("spawn_count = 12\nseed = 7").unwrap();
//! assert_eq!(config.spawn_count, 12);
//! assert_eq!(config.rows, 9);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::coord::Coord;
use super::error::{BoardError, ConfigError};
use super::piece::PieceColor;

/// Number of same-coloured parked pieces that triggers a removal.
pub const MATCH_SIZE: usize = 3;

/// Upper bound on holding slots; slot ids are `u8`.
pub const MAX_SLOTS: usize = u8::MAX as usize + 1;

/// Complete configuration for a game session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Grid rows, including the reserved row.
    pub rows: usize,

    /// Grid columns.
    pub columns: usize,

    /// World-space width of a cell (x axis, along columns).
    pub cell_width: f32,

    /// World-space depth of a cell (z axis, along rows).
    pub cell_height: f32,

    /// Pieces to spawn. Must be a positive multiple of [`MATCH_SIZE`].
    pub spawn_count: usize,

    /// Colours handed out in sets of three.
    pub palette: Vec<PieceColor>,

    /// Holding slots in priority order. Every slot must lie on the
    /// reserved row.
    pub slots: Vec<Coord>,

    /// Row dedicated to the holding slots.
    pub reserved_row: usize,

    /// World units per second travelled by a moving piece.
    pub move_speed: f32,

    /// Distance under which an axis counts as arrived.
    pub arrive_epsilon: f32,

    /// Points awarded for each colour removal.
    pub score_per_match: u32,

    /// Seed for the spawn RNG.
    pub seed: u64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: 9,
            columns: 6,
            cell_width: 1.0,
            cell_height: 0.5,
            spawn_count: 15,
            palette: PieceColor::REFERENCE_PALETTE.to_vec(),
            slots: (1..=4).map(|col| Coord::new(8, col)).collect(),
            reserved_row: 8,
            move_speed: 5.0,
            arrive_epsilon: 0.1,
            score_per_match: 5,
            seed: 42,
        }
    }
}

impl BoardConfig {
    /// The reference configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grid shape. The reserved row moves to the new last row and
    /// the slots follow it.
    #[must_use]
    pub fn with_grid(mut self, rows: usize, columns: usize) -> Self {
        self.rows = rows;
        self.columns = columns;
        let reserved = rows.saturating_sub(1);
        self.reserved_row = reserved;
        for slot in &mut self.slots {
            slot.row = reserved;
        }
        self
    }

    /// Set the number of pieces to spawn.
    #[must_use]
    pub fn with_spawn_count(mut self, count: usize) -> Self {
        self.spawn_count = count;
        self
    }

    /// Set the colour palette.
    #[must_use]
    pub fn with_palette(mut self, palette: impl Into<Vec<PieceColor>>) -> Self {
        self.palette = palette.into();
        self
    }

    /// Set the holding slots, in priority order.
    #[must_use]
    pub fn with_slots(mut self, slots: impl Into<Vec<Coord>>) -> Self {
        self.slots = slots.into();
        self
    }

    /// Set the reserved row.
    #[must_use]
    pub fn with_reserved_row(mut self, row: usize) -> Self {
        self.reserved_row = row;
        self
    }

    /// Set the movement speed.
    #[must_use]
    pub fn with_move_speed(mut self, speed: f32) -> Self {
        self.move_speed = speed;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Number of play cells (everything except the reserved row).
    #[must_use]
    pub fn play_cells(&self) -> usize {
        self.rows.saturating_sub(1) * self.columns
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: BoardConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Every failure is reported as `InvalidSpawnConfig`; setup is aborted.
    pub fn validate(&self) -> Result<(), BoardError> {
        let invalid = |msg: String| Err(BoardError::InvalidSpawnConfig(msg));

        if self.rows < 2 || self.columns == 0 {
            return invalid(format!(
                "grid must have at least 2 rows and 1 column, got {}x{}",
                self.rows, self.columns
            ));
        }
        if self.reserved_row >= self.rows {
            return invalid(format!(
                "reserved_row {} is outside {} rows",
                self.reserved_row, self.rows
            ));
        }
        if self.spawn_count == 0 || self.spawn_count % MATCH_SIZE != 0 {
            return invalid(format!(
                "spawn_count must be a positive multiple of {MATCH_SIZE}, got {}",
                self.spawn_count
            ));
        }
        if self.spawn_count > self.play_cells() {
            return invalid(format!(
                "spawn_count {} exceeds the {} play cells",
                self.spawn_count,
                self.play_cells()
            ));
        }
        if self.palette.is_empty() {
            return invalid("palette must not be empty".into());
        }
        if self.slots.len() < MATCH_SIZE {
            return invalid(format!(
                "need at least {MATCH_SIZE} holding slots, got {}",
                self.slots.len()
            ));
        }
        if self.slots.len() > MAX_SLOTS {
            return invalid(format!(
                "at most {MAX_SLOTS} holding slots are supported, got {}",
                self.slots.len()
            ));
        }
        for (i, slot) in self.slots.iter().enumerate() {
            if slot.row != self.reserved_row || slot.col >= self.columns {
                return invalid(format!(
                    "slot {slot} is not a cell of reserved row {}",
                    self.reserved_row
                ));
            }
            if self.slots[..i].contains(slot) {
                return invalid(format!("slot {slot} is listed twice"));
            }
        }
        if !(self.cell_width > 0.0 && self.cell_height > 0.0) {
            return invalid("cell dimensions must be > 0".into());
        }
        if !(self.move_speed > 0.0) {
            return invalid("move_speed must be > 0".into());
        }
        if !(self.arrive_epsilon > 0.0) {
            return invalid("arrive_epsilon must be > 0".into());
        }
        Ok(())
    }
}
