//! Persisted session record.
//!
//! Storage lives outside the core; it receives a [`SessionSnapshot`] and
//! hands one back. Hole cards never appear in it.

use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{
    game::{
        constants::BOARD_SIZES,
        entities::{Card, Usd},
    },
    opponents::Opponent,
    table::{GeometryError, SeatIndex, TableGeometry},
};

use super::{
    config::SessionConfig,
    entities::{HandContext, SessionData},
    errors::{SessionError, SessionResult},
    messages::OpponentRecord,
    state_machine::{Game, PokerSession, TurnView},
    states::StateUpdated,
};

/// Public part of the current hand.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
pub struct HandRecord {
    pub pot: Option<Usd>,
    pub community_cards: Vec<Card>,
    pub action_history: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub hero_chips: Usd,
    pub hero_seat: SeatIndex,
    pub button_seat: SeatIndex,
    pub total_seats: usize,
    pub opponents: BTreeMap<String, OpponentRecord>,
    pub current_hand: HandRecord,
}

impl SessionSnapshot {
    pub fn to_json(&self) -> SessionResult<String> {
        serde_json::to_string(self).map_err(|e| SessionError::Snapshot(e.to_string()))
    }

    pub fn from_json(json: &str) -> SessionResult<Self> {
        serde_json::from_str(json).map_err(|e| SessionError::Snapshot(e.to_string()))
    }
}

impl PokerSession {
    /// Record of the table and the public hand state. Fails before setup.
    pub fn snapshot(&self) -> SessionResult<SessionSnapshot> {
        let data = self.data();
        let geometry = data.geometry()?;
        let hero_seat = data.hero_seat.ok_or(GeometryError::NoSession)?;
        Ok(SessionSnapshot {
            hero_chips: data.hero_chips,
            hero_seat,
            button_seat: geometry.button_seat(),
            total_seats: geometry.total_seats(),
            opponents: data
                .opponents
                .iter()
                .map(|(name, o)| {
                    let record = OpponentRecord {
                        chips: o.chips,
                        seat: o.seat,
                        tendency: o.tendency.clone(),
                    };
                    (name.clone(), record)
                })
                .collect(),
            current_hand: HandRecord {
                pot: data.hand.pot,
                community_cards: data.hand.board.clone(),
                action_history: data.hand.action_history.clone(),
            },
        })
    }

    /// Rebuild a session from a snapshot.
    ///
    /// The restored hand has no hole cards. It resumes in `StateUpdated` when
    /// the snapshot carries a pot or action history, otherwise in `HandStart`.
    pub fn restore(snapshot: SessionSnapshot, config: SessionConfig) -> SessionResult<Self> {
        config.validate().map_err(SessionError::Config)?;
        let geometry = TableGeometry::new(snapshot.total_seats, snapshot.button_seat)?;
        let mut seats = vec![snapshot.hero_seat];
        seats.extend(snapshot.opponents.values().map(|o| o.seat));
        for (i, &seat) in seats.iter().enumerate() {
            if seat >= snapshot.total_seats {
                return Err(GeometryError::SeatOutOfRange {
                    seat,
                    max_seats: snapshot.total_seats,
                }
                .into());
            }
            if seats[..i].contains(&seat) {
                return Err(GeometryError::SeatTaken(seat).into());
            }
        }

        let board = &snapshot.current_hand.community_cards;
        if !BOARD_SIZES.contains(&board.len()) {
            return Err(SessionError::Snapshot(format!(
                "board of {} cards",
                board.len()
            )));
        }

        let resumes_mid_hand = snapshot.current_hand.pot.is_some()
            || !snapshot.current_hand.action_history.is_empty();
        let HandRecord {
            pot,
            community_cards,
            action_history,
        } = snapshot.current_hand;
        let data = SessionData {
            config,
            geometry: Some(geometry),
            hero_seat: Some(snapshot.hero_seat),
            hero_chips: snapshot.hero_chips,
            opponents: snapshot
                .opponents
                .into_iter()
                .map(|(name, record)| {
                    let mut opponent = Opponent::new(name.clone(), record.chips, record.seat);
                    opponent.tendency = record.tendency;
                    (name, opponent)
                })
                .collect(),
            hand: HandContext {
                hole_cards: None,
                board: community_cards,
                pot,
                action_history,
            },
            hand_number: 1,
        };

        let session: Self = if resumes_mid_hand {
            Game {
                data,
                state: StateUpdated {},
            }
            .into()
        } else {
            Self::from_data(data)
        };
        info!("session restored in {} phase", session.phase());
        Ok(session)
    }
}
