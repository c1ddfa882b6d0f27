//! Table geometry error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::geometry::SeatIndex;

/// Errors raised when seats or the button are used without a valid table
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum GeometryError {
    /// No session has been set up yet
    #[error("no table: run setup before asking for positions or moving the button")]
    NoSession,

    /// A table needs a button and at least one blind
    #[error("need 2+ seats, got {0}")]
    TooFewSeats(usize),

    /// Requested seat does not exist at this table
    #[error("seat {seat} out of range for a {max_seats}-seat table")]
    SeatOutOfRange { seat: SeatIndex, max_seats: usize },

    /// Two players asked for the same seat
    #[error("seat {0} is already taken")]
    SeatTaken(SeatIndex),
}

/// Result type for geometry operations
pub type GeometryResult<T> = Result<T, GeometryError>;
