//! Per-colour count of parked pieces.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::PieceColor;

/// Colour → number of pieces of that colour currently parked.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorTally {
    counts: FxHashMap<PieceColor, usize>,
}

impl ColorTally {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count for a colour (0 if never seen).
    #[must_use]
    pub fn get(&self, color: PieceColor) -> usize {
        self.counts.get(&color).copied().unwrap_or(0)
    }

    /// Record one more parked piece of `color`, returning the new count.
    pub fn increment(&mut self, color: PieceColor) -> usize {
        let count = self.counts.entry(color).or_insert(0);
        *count += 1;
        *count
    }

    /// Reset a colour to zero after its removal.
    pub fn reset(&mut self, color: PieceColor) {
        if let Some(count) = self.counts.get_mut(&color) {
            *count = 0;
        }
    }

    /// Sum over all colours.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Colours with a non-zero count, sorted by colour.
    #[must_use]
    pub fn entries(&self) -> Vec<(PieceColor, usize)> {
        let mut entries: Vec<_> = self
            .counts
            .iter()
            .filter(|(_, &n)| n > 0)
            .map(|(&c, &n)| (c, n))
            .collect();
        entries.sort();
        entries
    }
}

impl std::fmt::Display for ColorTally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .entries()
            .into_iter()
            .map(|(color, n)| format!("{color} (Count: {n})"))
            .collect();
        write!(f, "Parked colours: {}", parts.join(", "))
    }
}
