//! Match controller: selection → movement → commit → removal → outcome.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace, warn};

use super::event::{EventQueue, GameEvent, GameOutcome};
use super::movement::{self, EnRoute, MovementParams, Step};
use crate::board::{spawn_initial_pieces, BoardState, SlotId};
use crate::core::{
    BoardConfig, BoardError, Coord, GameRng, PieceColor, PieceId, RejectReason, MATCH_SIZE,
};
use crate::snapshot::Snapshot;

/// Answer to a selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectOutcome {
    /// The piece is travelling towards `slot`.
    Started { slot: SlotId },
    /// The selection was turned down and nothing changed.
    Rejected(RejectReason),
}

/// Progress report from [`MatchController::advance_movement`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementStatus {
    /// The piece is not travelling.
    Idle,
    /// Still on its way.
    InProgress,
    /// Parked at `coord`; the move has been finalized.
    Arrived { coord: Coord },
    /// Both axes were blocked; the piece is idle on `cell`.
    Abandoned { cell: Coord },
}

/// Drives one game session on top of a [`BoardState`].
///
/// At most one piece is in flight at a time: a new selection cancels the
/// previous move, so slot assignment is strictly first-come in selection
/// order and no slot needs reserving ahead of arrival.
///
/// ## Usage
///
/// ```
/// use trio_board::controller::{MatchController, SelectOutcome};
/// use trio_board::core::BoardConfig;
///
/// let mut game = MatchController::setup(&BoardConfig::default()).unwrap();
/// let piece = game.board().selectable_pieces()[0];
///
/// if let SelectOutcome::Started { .. } = game.select_piece(piece).unwrap() {
///     while game.active_piece().is_some() {
///         game.tick(1.0 / 60.0).unwrap();
///     }
/// }
/// let events = game.drain_events();
/// assert!(!events.is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct MatchController {
    board: BoardState,
    params: MovementParams,
    score_per_match: u32,
    en_route: Option<EnRoute>,
    score: u32,
    outcome: GameOutcome,
    last_move_matched: bool,
    events: EventQueue,
}

impl MatchController {
    /// Wrap an existing board.
    #[must_use]
    pub fn new(board: BoardState, config: &BoardConfig) -> Self {
        Self {
            board,
            params: MovementParams::from(config),
            score_per_match: config.score_per_match,
            en_route: None,
            score: 0,
            outcome: GameOutcome::Ongoing,
            last_move_matched: false,
            events: EventQueue::new(),
        }
    }

    /// Validate `config`, spawn the initial pieces and start a session.
    pub fn setup(config: &BoardConfig) -> Result<Self, BoardError> {
        let mut rng = GameRng::new(config.seed);
        let board = spawn_initial_pieces(config, &mut rng)?;
        Ok(Self::new(board, config))
    }

    // === Queries ===

    #[must_use]
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Latched outcome; terminal once reached.
    #[must_use]
    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    /// The piece currently in flight.
    #[must_use]
    pub fn active_piece(&self) -> Option<PieceId> {
        self.en_route.as_ref().map(|r| r.piece)
    }

    /// Route of the piece in flight.
    #[must_use]
    pub fn en_route(&self) -> Option<&EnRoute> {
        self.en_route.as_ref()
    }

    /// Events raised since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    /// Pending events without consuming them.
    #[must_use]
    pub fn pending_events(&self) -> &[GameEvent] {
        self.events.peek()
    }

    /// Greedy choice for autoplay: the selectable piece whose colour already
    /// has the most parked pieces, ties to the lowest id. Pieces in `skip`
    /// are passed over.
    #[must_use]
    pub fn suggest_piece(&self, skip: &[PieceId]) -> Option<PieceId> {
        let board = &self.board;
        board
            .selectable_pieces()
            .into_iter()
            .filter(|id| !skip.contains(id))
            .filter_map(|id| board.piece(id).ok().map(|p| (id, board.tally().get(p.color))))
            .max_by(|(a_id, a), (b_id, b)| a.cmp(b).then(b_id.cmp(a_id)))
            .map(|(id, _)| id)
    }

    // === Selection ===

    /// Try to send a piece to the next free holding slot.
    ///
    /// Any other piece in flight is cancelled first and goes idle where it
    /// is. Re-selecting the piece in flight keeps its move.
    #[instrument(skip(self))]
    pub fn select_piece(&mut self, id: PieceId) -> Result<SelectOutcome, BoardError> {
        let piece = self.board.piece(id)?;
        let (cell, on_board) = (piece.cell, piece.is_on_board());

        if let Some(route) = &self.en_route {
            if route.piece == id {
                return Ok(SelectOutcome::Started { slot: route.slot });
            }
            self.cancel_active()?;
        }

        if self.outcome.is_terminal() {
            return Ok(self.reject(id, RejectReason::GameOver));
        }
        if !on_board {
            return Ok(self.reject(id, RejectReason::NotOnBoard));
        }
        if self.board.is_blocked(cell)? {
            return Ok(self.reject(id, RejectReason::Blocked));
        }
        let Some(slot) = self.board.next_free_slot() else {
            return Ok(self.reject(id, RejectReason::NoSlotAvailable));
        };

        let target = self.board.slot(slot)?.coord;
        self.en_route = Some(EnRoute::new(
            id,
            slot,
            self.board.world_position(cell),
            self.board.world_position(target),
        ));
        self.events.push(GameEvent::MoveStarted { piece: id, slot, target });
        debug!(%slot, %target, "move started");
        Ok(SelectOutcome::Started { slot })
    }

    fn reject(&mut self, piece: PieceId, reason: RejectReason) -> SelectOutcome {
        debug!(%piece, ?reason, "selection rejected");
        self.events.push(GameEvent::MoveRejected { piece, reason });
        SelectOutcome::Rejected(reason)
    }

    fn cancel_active(&mut self) -> Result<(), BoardError> {
        if let Some(route) = self.en_route.take() {
            let cell = self.board.piece(route.piece)?.cell;
            debug!(piece = %route.piece, %cell, "move cancelled");
            self.events.push(GameEvent::MoveCancelled { piece: route.piece, cell });
        }
        Ok(())
    }

    // === Movement ===

    /// Advance the piece in flight by `dt` seconds.
    ///
    /// Returns `Idle` if `id` is not the piece in flight. On arrival the
    /// move is finalized before this returns.
    pub fn advance_movement(&mut self, id: PieceId, dt: f32) -> Result<MovementStatus, BoardError> {
        self.board.piece(id)?;
        let mut route = match self.en_route.take() {
            Some(route) if route.piece == id => route,
            other => {
                self.en_route = other;
                return Ok(MovementStatus::Idle);
            }
        };

        let step = match movement::advance(&mut route, &mut self.board, &self.params, dt) {
            Ok(step) => step,
            Err(e) => {
                self.en_route = Some(route);
                return Err(e);
            }
        };
        trace!(piece = %id, ?step, position = ?route.position, "advanced");

        match step {
            Step::Moving => {
                self.en_route = Some(route);
                Ok(MovementStatus::InProgress)
            }
            Step::Arrived => {
                let coord = self.finalize_route(route)?;
                Ok(MovementStatus::Arrived { coord })
            }
            Step::Blocked => {
                let cell = self.board.piece(id)?.cell;
                warn!(piece = %id, %cell, "both axes blocked, move abandoned");
                self.events.push(GameEvent::MoveAbandoned { piece: id, cell });
                Ok(MovementStatus::Abandoned { cell })
            }
        }
    }

    /// Advance whichever piece is in flight.
    pub fn tick(&mut self, dt: f32) -> Result<MovementStatus, BoardError> {
        match self.active_piece() {
            Some(id) => self.advance_movement(id, dt),
            None => Ok(MovementStatus::Idle),
        }
    }

    // === Commit ===

    /// Park the piece in flight in its slot right away, then apply the
    /// tally, removal and outcome rules.
    #[instrument(skip(self))]
    pub fn finalize_move(&mut self, id: PieceId) -> Result<Coord, BoardError> {
        self.board.piece(id)?;
        match self.en_route.take() {
            Some(route) if route.piece == id => self.finalize_route(route),
            other => {
                self.en_route = other;
                Err(BoardError::NotEnRoute(id))
            }
        }
    }

    fn finalize_route(&mut self, route: EnRoute) -> Result<Coord, BoardError> {
        let piece = self.board.piece(route.piece)?;
        let (from, color) = (piece.cell, piece.color);

        self.board.commit_move(route.piece, from, route.slot)?;
        let coord = self.board.slot(route.slot)?.coord;
        self.events.push(GameEvent::MovementComplete { piece: route.piece, coord });

        let count = self.board.record_arrival(color);
        self.last_move_matched = count >= MATCH_SIZE;
        if self.last_move_matched {
            self.remove_by_color(color);
        }

        self.settle_outcome();
        Ok(coord)
    }

    /// Remove the parked pieces of `color` on the reserved row, reset its
    /// tally and award the match score. Returns how many were removed.
    pub fn remove_by_color(&mut self, color: PieceColor) -> usize {
        let removed = self.board.remove_parked(color);
        if !removed.is_empty() {
            self.score += self.score_per_match;
            self.events.push(GameEvent::ColorRemoved {
                color,
                count: removed.len(),
            });
            self.events.push(GameEvent::ScoreChanged { score: self.score });
        }
        removed.len()
    }

    // === Outcome ===

    /// Outcome implied by the current board.
    ///
    /// `Won` iff no piece is left on the board, whatever the slots hold.
    /// Otherwise `Lost` iff every slot is occupied and the last finalized
    /// move did not remove anything.
    #[must_use]
    pub fn evaluate_outcome(&self) -> GameOutcome {
        if self.board.count_on_board() == 0 {
            GameOutcome::Won
        } else if self.board.open_slots() == 0 && !self.last_move_matched {
            GameOutcome::Lost
        } else {
            GameOutcome::Ongoing
        }
    }

    fn settle_outcome(&mut self) {
        if self.outcome.is_terminal() {
            return;
        }
        let outcome = self.evaluate_outcome();
        if outcome.is_terminal() {
            debug!(?outcome, score = self.score, "game ended");
            self.outcome = outcome;
            self.events.push(GameEvent::GameEnded {
                outcome,
                final_score: self.score,
            });
        }
    }

    // === Snapshots ===

    /// Capture the session. Pending events are not included.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            params: self.params,
            score_per_match: self.score_per_match,
            en_route: self.en_route.clone(),
            score: self.score,
            outcome: self.outcome,
            last_move_matched: self.last_move_matched,
        }
    }

    /// Rebuild a session from a snapshot, with an empty event queue.
    #[must_use]
    pub fn restore(snapshot: Snapshot) -> Self {
        Self {
            board: snapshot.board,
            params: snapshot.params,
            score_per_match: snapshot.score_per_match,
            en_route: snapshot.en_route,
            score: snapshot.score,
            outcome: snapshot.outcome,
            last_move_matched: snapshot.last_move_matched,
            events: EventQueue::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CellState;

    /// Board with pieces on the last play row, one per listed colour.
    fn controller(colors: &[PieceColor]) -> MatchController {
        let config = BoardConfig::default();
        let mut board = BoardState::new(&config).unwrap();
        for (col, &color) in colors.iter().enumerate() {
            board.place_piece(color, Coord::new(7, col)).unwrap();
        }
        MatchController::new(board, &config)
    }

    fn run_to_rest(game: &mut MatchController) -> MovementStatus {
        for _ in 0..10_000 {
            match game.tick(0.05).unwrap() {
                MovementStatus::InProgress => continue,
                status => return status,
            }
        }
        panic!("movement never finished");
    }

    #[test]
    fn test_suggest_piece_prefers_parked_colour() {
        let mut game = controller(&[PieceColor::Blue, PieceColor::Yellow, PieceColor::Yellow]);
        assert_eq!(game.suggest_piece(&[]), Some(PieceId::new(0)));

        game.select_piece(PieceId::new(1)).unwrap();
        game.finalize_move(PieceId::new(1)).unwrap();
        assert_eq!(game.suggest_piece(&[]), Some(PieceId::new(2)));
        assert_eq!(game.suggest_piece(&[PieceId::new(2)]), Some(PieceId::new(0)));
    }

    #[test]
    fn test_select_starts_move() {
        let mut game = controller(&[PieceColor::Blue, PieceColor::Blue]);
        let outcome = game.select_piece(PieceId::new(0)).unwrap();

        assert_eq!(outcome, SelectOutcome::Started { slot: SlotId::new(0) });
        assert_eq!(game.active_piece(), Some(PieceId::new(0)));
        assert_eq!(
            game.drain_events(),
            vec![GameEvent::MoveStarted {
                piece: PieceId::new(0),
                slot: SlotId::new(0),
                target: Coord::new(8, 1),
            }]
        );
    }

    #[test]
    fn test_blocked_selection_changes_nothing() {
        let config = BoardConfig::default();
        let mut board = BoardState::new(&config).unwrap();
        let corner = board.place_piece(PieceColor::Blue, Coord::new(0, 0)).unwrap();
        board.place_piece(PieceColor::Blue, Coord::new(0, 1)).unwrap();
        board.place_piece(PieceColor::Blue, Coord::new(1, 0)).unwrap();
        let mut game = MatchController::new(board, &config);
        let before = game.board().clone();

        let outcome = game.select_piece(corner).unwrap();

        assert_eq!(outcome, SelectOutcome::Rejected(RejectReason::Blocked));
        assert_eq!(game.active_piece(), None);
        assert_eq!(game.board(), &before);
        assert_eq!(
            game.drain_events(),
            vec![GameEvent::MoveRejected {
                piece: corner,
                reason: RejectReason::Blocked
            }]
        );
    }

    #[test]
    fn test_reselecting_active_piece_keeps_move() {
        let mut game = controller(&[PieceColor::Blue]);
        game.select_piece(PieceId::new(0)).unwrap();
        game.tick(0.05).unwrap();
        game.drain_events();

        let again = game.select_piece(PieceId::new(0)).unwrap();
        assert_eq!(again, SelectOutcome::Started { slot: SlotId::new(0) });
        assert!(game.drain_events().is_empty());
        assert_eq!(game.active_piece(), Some(PieceId::new(0)));
    }

    #[test]
    fn test_new_selection_cancels_previous() {
        let mut game = controller(&[PieceColor::Blue, PieceColor::Yellow, PieceColor::Magenta]);
        game.select_piece(PieceId::new(2)).unwrap();
        game.tick(0.05).unwrap();
        game.drain_events();

        game.select_piece(PieceId::new(0)).unwrap();
        let events = game.drain_events();
        assert_eq!(
            events[0],
            GameEvent::MoveCancelled {
                piece: PieceId::new(2),
                cell: Coord::new(7, 2)
            }
        );
        assert!(matches!(
            events[1],
            GameEvent::MoveStarted { piece, .. } if piece == PieceId::new(0)
        ));

        // the cancelled piece no longer advances
        assert_eq!(game.advance_movement(PieceId::new(2), 0.05).unwrap(), MovementStatus::Idle);
        assert!(game.board().piece(PieceId::new(2)).unwrap().is_on_board());
    }

    #[test]
    fn test_arrival_finalizes_and_tallies() {
        let mut game = controller(&[PieceColor::Blue, PieceColor::Blue]);
        game.select_piece(PieceId::new(0)).unwrap();

        let status = run_to_rest(&mut game);

        assert_eq!(status, MovementStatus::Arrived { coord: Coord::new(8, 1) });
        assert_eq!(game.board().tally().get(PieceColor::Blue), 1);
        assert_eq!(game.board().cell_state(Coord::new(7, 0)).unwrap(), CellState::Empty);
        assert!(game.board().piece(PieceId::new(0)).unwrap().is_in_slot());
        assert_eq!(game.active_piece(), None);
        assert_eq!(game.outcome(), GameOutcome::Ongoing);
    }

    #[test]
    fn test_finalize_move_immediately() {
        let mut game = controller(&[PieceColor::Blue, PieceColor::Blue]);
        game.select_piece(PieceId::new(1)).unwrap();

        let coord = game.finalize_move(PieceId::new(1)).unwrap();
        assert_eq!(coord, Coord::new(8, 1));
        assert_eq!(game.board().tally().get(PieceColor::Blue), 1);

        assert_eq!(
            game.finalize_move(PieceId::new(0)),
            Err(BoardError::NotEnRoute(PieceId::new(0)))
        );
    }

    #[test]
    fn test_third_arrival_removes_and_scores() {
        let mut game = controller(&[
            PieceColor::Blue,
            PieceColor::Yellow,
            PieceColor::Blue,
            PieceColor::Blue,
        ]);
        for id in [0, 2, 3] {
            game.select_piece(PieceId::new(id)).unwrap();
            game.finalize_move(PieceId::new(id)).unwrap();
        }

        assert_eq!(game.score(), 5);
        assert_eq!(game.board().tally().get(PieceColor::Blue), 0);
        assert_eq!(game.board().open_slots(), 4);
        let events = game.drain_events();
        assert!(events.contains(&GameEvent::ColorRemoved {
            color: PieceColor::Blue,
            count: 3
        }));
        assert!(events.contains(&GameEvent::ScoreChanged { score: 5 }));
        assert_eq!(game.outcome(), GameOutcome::Ongoing);
    }

    #[test]
    fn test_remove_by_color_without_parked_pieces() {
        let mut game = controller(&[PieceColor::Blue]);
        assert_eq!(game.remove_by_color(PieceColor::Blue), 0);
        assert_eq!(game.score(), 0);
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_full_slots_lose() {
        let colors = [
            PieceColor::Blue,
            PieceColor::Blue,
            PieceColor::Yellow,
            PieceColor::Yellow,
            PieceColor::Magenta,
        ];
        let mut game = controller(&colors);
        for id in 0..4 {
            game.select_piece(PieceId::new(id)).unwrap();
            game.finalize_move(PieceId::new(id)).unwrap();
        }

        assert_eq!(game.outcome(), GameOutcome::Lost);
        assert_eq!(
            game.select_piece(PieceId::new(4)).unwrap(),
            SelectOutcome::Rejected(RejectReason::GameOver)
        );
    }

    #[test]
    fn test_no_slot_available() {
        let colors = [
            PieceColor::Blue,
            PieceColor::Blue,
            PieceColor::Yellow,
            PieceColor::Yellow,
            PieceColor::Magenta,
        ];
        let mut game = controller(&colors);
        for id in 0..4 {
            game.select_piece(PieceId::new(id)).unwrap();
            game.finalize_move(PieceId::new(id)).unwrap();
        }
        // bypass the latched loss to exercise the slot check directly
        game.outcome = GameOutcome::Ongoing;

        assert_eq!(
            game.select_piece(PieceId::new(4)).unwrap(),
            SelectOutcome::Rejected(RejectReason::NoSlotAvailable)
        );
        assert!(game.board().piece(PieceId::new(4)).unwrap().is_on_board());
    }

    #[test]
    fn test_select_parked_piece() {
        let mut game = controller(&[PieceColor::Blue, PieceColor::Yellow]);
        game.select_piece(PieceId::new(0)).unwrap();
        game.finalize_move(PieceId::new(0)).unwrap();

        assert_eq!(
            game.select_piece(PieceId::new(0)).unwrap(),
            SelectOutcome::Rejected(RejectReason::NotOnBoard)
        );
    }

    #[test]
    fn test_unknown_piece_is_error() {
        let mut game = controller(&[PieceColor::Blue]);
        assert_eq!(
            game.select_piece(PieceId::new(99)),
            Err(BoardError::UnknownPiece(PieceId::new(99)))
        );
        assert!(game.advance_movement(PieceId::new(99), 0.1).is_err());
    }

    #[test]
    fn test_abandon_when_boxed_in_transit() {
        let config = BoardConfig::default();
        let mut board = BoardState::new(&config).unwrap();
        // mover at (2,1) heads for slot column 1; (3,1) is in the way and
        // there is no sideways distance to cover
        let mover = board.place_piece(PieceColor::Blue, Coord::new(2, 1)).unwrap();
        board.place_piece(PieceColor::Yellow, Coord::new(3, 1)).unwrap();
        let mut game = MatchController::new(board, &config);

        game.select_piece(mover).unwrap();
        let status = run_to_rest(&mut game);

        assert_eq!(status, MovementStatus::Abandoned { cell: Coord::new(2, 1) });
        assert_eq!(game.active_piece(), None);
        assert!(game.board().piece(mover).unwrap().is_on_board());
        assert!(game
            .drain_events()
            .contains(&GameEvent::MoveAbandoned { piece: mover, cell: Coord::new(2, 1) }));
    }
}
