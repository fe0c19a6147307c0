use thiserror::Error;

use crate::action::Action;
use crate::chip::SeatIndex;

/// The closed set of ways a table/hand operation can fail.
///
/// Every transition in this crate returns `Result<T, EngineError>` instead
/// of panicking; state is never partially mutated on an `Err`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid table config: {reason}")]
    InvalidConfig { reason: String },

    #[error("seat {seat:?} is already occupied")]
    SeatOccupied { seat: SeatIndex },

    #[error("seat {seat:?} is empty")]
    SeatEmpty { seat: SeatIndex },

    #[error("table is full")]
    TableFull,

    #[error("a hand is already in progress")]
    HandInProgress,

    #[error("no hand is in progress")]
    NoHandInProgress,

    #[error("not enough players to start a hand: have {count}, need {min}")]
    NotEnoughPlayers { count: usize, min: usize },

    #[error("it is seat {expected_seat:?}'s turn, not seat {seat:?}'s")]
    NotPlayersTurn {
        seat: SeatIndex,
        expected_seat: SeatIndex,
    },

    #[error("invalid action {action:?}: {reason}")]
    InvalidAction { action: Action, reason: String },

    #[error("invalid game state ({state}): {reason}")]
    InvalidGameState { state: String, reason: String },

    #[error("deck exhausted: requested {requested}, only {remaining} remain")]
    DeckExhausted { requested: usize, remaining: usize },

    #[error("invalid card {input:?}: {reason}")]
    InvalidCard { input: String, reason: String },
}
