//! Events raised for the presentation layer.
//!
//! The controller never calls back into rendering code. It pushes
//! [`GameEvent`]s onto an [`EventQueue`] and the presentation layer drains
//! them once per frame.

use serde::{Deserialize, Serialize};

use crate::board::SlotId;
use crate::core::{Coord, PieceColor, PieceId, RejectReason};

/// Result of the game so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    #[default]
    Ongoing,
    /// No pieces left on the board.
    Won,
    /// Every holding slot is full and nothing can be matched.
    Lost,
}

impl GameOutcome {
    /// `Won` and `Lost` are final.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameOutcome::Ongoing)
    }
}

impl std::fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            GameOutcome::Ongoing => "ongoing",
            GameOutcome::Won => "you won",
            GameOutcome::Lost => "you lost",
        };
        f.write_str(text)
    }
}

/// Something the presentation layer should react to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A selected piece started travelling towards `slot`.
    MoveStarted { piece: PieceId, slot: SlotId, target: Coord },

    /// A selection was turned down; nothing changed.
    MoveRejected { piece: PieceId, reason: RejectReason },

    /// A travelling piece was deselected and went idle on `cell`.
    MoveCancelled { piece: PieceId, cell: Coord },

    /// A travelling piece found both axes blocked and went idle on `cell`.
    MoveAbandoned { piece: PieceId, cell: Coord },

    /// A piece arrived and was parked at `coord`.
    MovementComplete { piece: PieceId, coord: Coord },

    /// `count` parked pieces of `color` were removed.
    ColorRemoved { color: PieceColor, count: usize },

    /// The score changed to `score`.
    ScoreChanged { score: u32 },

    /// The game reached a terminal outcome.
    GameEnded { outcome: GameOutcome, final_score: u32 },
}

/// FIFO buffer of pending events.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    pending: Vec<GameEvent>,
}

impl EventQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.pending.push(event);
    }

    /// Take every pending event, oldest first.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Pending events without consuming them.
    #[must_use]
    pub fn peek(&self) -> &[GameEvent] {
        &self.pending
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_terminal() {
        assert!(!GameOutcome::Ongoing.is_terminal());
        assert!(GameOutcome::Won.is_terminal());
        assert!(GameOutcome::Lost.is_terminal());
        assert_eq!(GameOutcome::Lost.to_string(), "you lost");
    }

    #[test]
    fn test_queue_drain_order() {
        let mut queue = EventQueue::new();
        queue.push(GameEvent::ScoreChanged { score: 5 });
        queue.push(GameEvent::ScoreChanged { score: 10 });
        assert_eq!(queue.len(), 2);

        let events = queue.drain();
        assert_eq!(
            events,
            vec![GameEvent::ScoreChanged { score: 5 }, GameEvent::ScoreChanged { score: 10 }]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_event_serialization() {
        let event = GameEvent::ColorRemoved {
            color: PieceColor::Blue,
            count: 3,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
