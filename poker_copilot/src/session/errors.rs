//! Session error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::{
    game::entities::{Card, CardParseError},
    table::GeometryError,
};

/// Hand context a read can't be committed without.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextField {
    HoleCards,
    Pot,
    ActionHistory,
}

impl fmt::Display for ContextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::HoleCards => "hole cards",
            Self::Pot => "pot",
            Self::ActionHistory => "action history",
        };
        write!(f, "{repr}")
    }
}

/// Protocol step the caller skipped.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingStep {
    Cards,
    StateUpdate,
    ReadCommit,
}

impl fmt::Display for MissingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Cards => "no cards captured",
            Self::StateUpdate => "no state update",
            Self::ReadCommit => "no read committed",
        };
        write!(f, "{repr}")
    }
}

fn join_fields(fields: &[ContextField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Session errors
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum SessionError {
    /// Commit attempted before the hand context was complete
    #[error("missing context: {}", join_fields(.missing))]
    MissingContext { missing: Vec<ContextField> },

    /// Operation invoked out of protocol order
    #[error("not ready: {missing}")]
    ProtocolViolation { missing: MissingStep },

    #[error(transparent)]
    CardParse(#[from] CardParseError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("need at least one player")]
    EmptyTable,

    #[error("player {0:?} is listed twice")]
    DuplicatePlayer(String),

    #[error("hole cards must be two distinct cards")]
    InvalidHoleCards,

    #[error("hole cards already captured this hand")]
    HoleCardsAlreadyCaptured,

    /// Board of the wrong size, with duplicates, or overlapping hole cards
    #[error("invalid board: {0}")]
    InvalidBoard(String),

    #[error("board can't shrink from {current} to {requested} cards mid-hand")]
    BoardRegression { current: usize, requested: usize },

    /// A card already dealt this hand is missing from the new board
    #[error("board card {0} can't be removed mid-hand")]
    BoardMismatch(Card),

    #[error("act payload is empty")]
    EmptyPayload,

    #[error("invalid config: {0}")]
    Config(String),

    #[error("snapshot: {0}")]
    Snapshot(String),
}

pub type SessionResult<T> = Result<T, SessionError>;
