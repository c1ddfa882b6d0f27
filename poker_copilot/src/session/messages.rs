//! Requests into the session and the acknowledgements it returns.
//!
//! Nothing in this module carries the hero's hole cards outward.

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

use crate::{
    game::entities::{Card, Usd},
    opponents::{Tendency, TendencyReport},
    table::{Position, SeatIndex},
};

use super::states::Phase;

/// One entry of the setup player list.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PlayerSeat {
    pub name: String,
    #[serde(default)]
    pub chips: Option<Usd>,
    #[serde(default)]
    pub seat: Option<SeatIndex>,
}

impl PlayerSeat {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            chips: None,
            seat: None,
        }
    }

    #[must_use]
    pub fn with_chips(mut self, chips: Usd) -> Self {
        self.chips = Some(chips);
        self
    }

    #[must_use]
    pub fn with_seat(mut self, seat: SeatIndex) -> Self {
        self.seat = Some(seat);
        self
    }
}

/// Seat and stack of an opponent.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct OpponentRecord {
    pub chips: Usd,
    pub seat: SeatIndex,
    #[serde(default)]
    pub tendency: Tendency,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SetupSummary {
    pub hero_seat: SeatIndex,
    pub button_seat: SeatIndex,
    pub total_seats: usize,
    pub positions: BTreeMap<String, Position>,
    pub opponents: BTreeMap<String, OpponentRecord>,
}

/// What the capture collaborator hands over.
#[derive(Clone, Copy)]
pub enum Capture {
    Cards([Card; 2]),
    /// Capture completed; the cards stay with the collaborator.
    Signal,
}

impl fmt::Debug for Capture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cards(_) => write!(f, "Capture::Cards(<redacted>)"),
            Self::Signal => write!(f, "Capture::Signal"),
        }
    }
}

/// Capture acknowledgement. Deliberately card-free.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CaptureAck {
    pub phase: Phase,
    pub hand_number: u32,
    /// Whether the session holds the actual cards or only the signal.
    pub cards_known: bool,
}

/// An observed opponent action.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PlayerAction {
    pub name: String,
    pub action: String,
}

/// State update from the observing caller.
///
/// `pot` and `action_history` replace the current values; the board, when
/// present, replaces the current board. `chip_updates` sets absolute stacks
/// by player name, the hero's included.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct HandUpdate {
    pub pot: Usd,
    pub action_history: Vec<String>,
    pub player_actions: Vec<PlayerAction>,
    pub community_cards: Option<Vec<Card>>,
    pub chip_updates: BTreeMap<String, Usd>,
    pub new_hand: bool,
}

impl HandUpdate {
    #[must_use]
    pub fn new(pot: Usd, action_history: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            pot,
            action_history: action_history.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_board(mut self, board: Vec<Card>) -> Self {
        self.community_cards = Some(board);
        self
    }

    #[must_use]
    pub fn with_action(mut self, name: impl Into<String>, action: impl Into<String>) -> Self {
        self.player_actions.push(PlayerAction {
            name: name.into(),
            action: action.into(),
        });
        self
    }

    #[must_use]
    pub fn with_chips(mut self, name: impl Into<String>, chips: Usd) -> Self {
        self.chip_updates.insert(name.into(), chips);
        self
    }

    #[must_use]
    pub fn starting_new_hand(mut self) -> Self {
        self.new_hand = true;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UpdateSummary {
    pub phase: Phase,
    pub hand_number: u32,
    pub button_seat: Option<SeatIndex>,
    pub pot: Usd,
    pub community_cards: Vec<Card>,
    pub hero_chips: Usd,
    pub opponent_tendencies: BTreeMap<String, TendencyReport>,
    /// Names in chip updates or actions that matched nobody at the table.
    pub skipped: Vec<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CommitAck {
    pub phase: Phase,
    pub analysis: Option<String>,
    /// True when the read was already committed and was only confirmed again.
    pub reconfirmed: bool,
}
