//! Hand error types.

use thiserror::Error;

use super::entities::{Action, SeatIndex};

/// Errors that abort the current hand.
///
/// The engine voids the hand before returning any of these, so every chip
/// committed to the pot is back on its owner's stack.
#[derive(Debug, Eq, Error, PartialEq)]
pub enum HandError {
    /// The decision policy asked for something the current state can't accept.
    #[error("seat {seat} can't {action}: {reason}")]
    ProtocolViolation {
        seat: SeatIndex,
        action: Action,
        reason: &'static str,
    },

    #[error("seat {seat} acted out of turn, waiting on {expected:?}")]
    OutOfTurn {
        seat: SeatIndex,
        expected: Option<SeatIndex>,
    },

    #[error("betting round is already closed")]
    RoundClosed,

    #[error("deck ran out of cards")]
    DeckExhausted,

    #[error("need 2+ players with chips")]
    NotEnoughPlayers,

    #[error("seat {0} out of bounds")]
    InvalidSeat(usize),

    #[error("{players} players but {policies} decision policies")]
    PolicyCountMismatch { players: usize, policies: usize },

    #[error("invalid settings: {reason}")]
    InvalidSettings { reason: &'static str },

    #[error("table holds more chips than a pot can count")]
    ChipOverflow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HandError::ProtocolViolation {
            seat: 2,
            action: Action::Raise,
            reason: "no chips left",
        };
        assert_eq!(err.to_string(), "seat 2 can't raise: no chips left");

        let err = HandError::PolicyCountMismatch {
            players: 3,
            policies: 2,
        };
        assert!(err.to_string().contains("3 players"));

        assert!(HandError::ChipOverflow.to_string().contains("more chips"));
    }
}
