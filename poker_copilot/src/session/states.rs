//! Turn protocol phases.
//!
//! Each phase is a marker type carried by [`Game`](super::state_machine::Game);
//! [`Phase`] is the plain tag reported to callers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase tag reported to callers and kept in acknowledgements.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    HandStart,
    CardsCaptured,
    StateUpdated,
    ReadCommitted,
    Acted,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::HandStart => "hand start",
            Self::CardsCaptured => "cards captured",
            Self::StateUpdated => "state updated",
            Self::ReadCommitted => "read committed",
            Self::Acted => "acted",
        };
        write!(f, "{repr}")
    }
}

/// Links a marker state to its [`Phase`] tag.
pub trait PhaseTag {
    const PHASE: Phase;
}

/// A new hand; nothing observed yet.
#[derive(Debug, Default)]
pub struct HandStart {}

/// Hole cards are held.
#[derive(Debug)]
pub struct CardsCaptured {}

/// Pot and action history were recorded since the last commit or action.
#[derive(Debug)]
pub struct StateUpdated {}

/// The caller committed to a read of the current state.
#[derive(Clone, Debug)]
pub struct ReadCommitted {
    pub analysis: Option<String>,
}

/// The committed read was acted on.
#[derive(Clone, Debug)]
pub struct Acted {
    pub output: String,
}

impl PhaseTag for HandStart {
    const PHASE: Phase = Phase::HandStart;
}

impl PhaseTag for CardsCaptured {
    const PHASE: Phase = Phase::CardsCaptured;
}

impl PhaseTag for StateUpdated {
    const PHASE: Phase = Phase::StateUpdated;
}

impl PhaseTag for ReadCommitted {
    const PHASE: Phase = Phase::ReadCommitted;
}

impl PhaseTag for Acted {
    const PHASE: Phase = Phase::Acted;
}
