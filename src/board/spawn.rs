//! Initial piece layout.
//!
//! Colours are handed out in sets of three (set `i` gets
//! `palette[i % palette.len()]`), shuffled, then laid out row-major from
//! row 0, skipping the reserved row.

use tracing::{debug, instrument};

use super::state::BoardState;
use crate::core::{BoardConfig, BoardError, Coord, GameRng, PieceColor, MATCH_SIZE};

/// Unshuffled colour pool for `config.spawn_count` pieces.
#[must_use]
pub fn color_pool(config: &BoardConfig) -> Vec<PieceColor> {
    let sets = config.spawn_count / MATCH_SIZE;
    (0..sets)
        .flat_map(|i| std::iter::repeat(config.palette[i % config.palette.len()]).take(MATCH_SIZE))
        .collect()
}

/// Build a board and spawn the initial pieces.
///
/// Fails with `InvalidSpawnConfig` if the configuration is invalid,
/// notably when `spawn_count` is not a multiple of 3.
#[instrument(skip_all, fields(spawn_count = config.spawn_count, seed = rng.seed()))]
pub fn spawn_initial_pieces(
    config: &BoardConfig,
    rng: &mut GameRng,
) -> Result<BoardState, BoardError> {
    let mut board = BoardState::new(config)?;

    let mut pool = color_pool(config);
    rng.shuffle(&mut pool);

    let cells = (0..config.rows)
        .filter(|&row| row != config.reserved_row)
        .flat_map(|row| (0..config.columns).map(move |col| Coord::new(row, col)));

    for (color, cell) in pool.into_iter().zip(cells) {
        board.place_piece(color, cell)?;
    }

    debug!(pieces = board.count_on_board(), "spawned initial pieces");
    Ok(board)
}
