//! The per-hand turn protocol.
//!
//! ```text
//! HandStart ──capture──▶ CardsCaptured ──update──▶ StateUpdated ──commit──▶ ReadCommitted ──act──▶ Acted
//!     ▲                                               ▲    (any phase)                               │
//!     └────────────── update(new_hand) ───────────────┴──────────────────────────────────────────────┘
//! ```
//!
//! Every operation validates against the current phase and data before
//! touching either, so a failed call leaves the session exactly as it was.

use enum_dispatch::enum_dispatch;
use log::{debug, info, warn};
use rand::Rng;
use std::{
    collections::{BTreeMap, HashSet},
    mem,
};

use crate::{
    game::{
        constants::BOARD_SIZES,
        entities::{Card, Usd},
        equity::{Equity, estimate_equity},
    },
    opponents::Opponent,
    table::{Position, SeatIndex, TableGeometry, assign_seats},
};

use super::{
    config::SessionConfig,
    entities::{HandContext, HoleCards, SessionData},
    errors::{MissingStep, SessionError, SessionResult},
    messages::{
        Capture, CaptureAck, CommitAck, HandUpdate, OpponentRecord, PlayerAction, PlayerSeat,
        SetupSummary, UpdateSummary,
    },
    states::{Acted, CardsCaptured, HandStart, Phase, PhaseTag, ReadCommitted, StateUpdated},
};

/// Read access shared by every phase.
#[enum_dispatch]
pub trait TurnView {
    fn phase(&self) -> Phase;
    fn data(&self) -> &SessionData;
}

/// Mutable access, kept inside the crate so phase rules can't be bypassed.
#[enum_dispatch]
trait TurnData {
    fn data_mut(&mut self) -> &mut SessionData;
    fn into_data(self) -> SessionData;
}

/// Session data paired with the marker state of the current phase.
#[derive(Debug)]
pub struct Game<T> {
    pub(crate) data: SessionData,
    pub(crate) state: T,
}

impl<T: PhaseTag> TurnView for Game<T> {
    fn phase(&self) -> Phase {
        T::PHASE
    }

    fn data(&self) -> &SessionData {
        &self.data
    }
}

impl<T: PhaseTag> TurnData for Game<T> {
    fn data_mut(&mut self) -> &mut SessionData {
        &mut self.data
    }

    fn into_data(self) -> SessionData {
        self.data
    }
}

/// One poker session: long-lived table state plus the current hand's phase.
#[enum_dispatch(TurnView, TurnData)]
#[derive(Debug)]
pub enum PokerSession {
    HandStart(Game<HandStart>),
    CardsCaptured(Game<CardsCaptured>),
    StateUpdated(Game<StateUpdated>),
    ReadCommitted(Game<ReadCommitted>),
    Acted(Game<Acted>),
}

impl Default for PokerSession {
    fn default() -> Self {
        Self::from_data(SessionData::default())
    }
}

fn enter<T>(data: SessionData, state: T) -> PokerSession
where
    Game<T>: Into<PokerSession>,
{
    Game { data, state }.into()
}

impl PokerSession {
    pub fn new(config: SessionConfig) -> SessionResult<Self> {
        config.validate().map_err(SessionError::Config)?;
        Ok(Self::from_data(SessionData::new(config)))
    }

    pub(crate) fn from_data(data: SessionData) -> Self {
        enter(data, HandStart {})
    }

    /// Move the data into the phase built by `to`.
    fn transition(&mut self, to: impl FnOnce(SessionData) -> Self) {
        let data = mem::take(self).into_data();
        *self = to(data);
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.data().config
    }

    /// Seat the table and start the first hand.
    ///
    /// The player matching the configured hero name is the hero; when absent
    /// the hero takes the first free seat after everyone listed. The button
    /// starts at seat 0.
    pub fn setup(&mut self, players: &[PlayerSeat], hero_chips: Usd) -> SessionResult<SetupSummary> {
        if players.is_empty() {
            return Err(SessionError::EmptyTable);
        }
        let config = self.config().clone();

        let mut names = HashSet::with_capacity(players.len());
        for player in players {
            if !names.insert(player.name.to_ascii_lowercase()) {
                return Err(SessionError::DuplicatePlayer(player.name.clone()));
            }
        }

        let hero_index = players.iter().position(|p| config.is_hero(&p.name));
        let mut requested: Vec<Option<SeatIndex>> = players.iter().map(|p| p.seat).collect();
        if hero_index.is_none() {
            requested.push(None);
        }
        let (seats, total_seats) = assign_seats(&requested, config.max_seats)?;
        let geometry = TableGeometry::new(total_seats, 0)?;
        let hero_seat = seats[hero_index.unwrap_or(players.len())];

        let opponents: BTreeMap<String, Opponent> = players
            .iter()
            .zip(&seats)
            .enumerate()
            .filter(|(i, _)| Some(*i) != hero_index)
            .map(|(_, (player, &seat))| {
                let chips = player.chips.unwrap_or(config.default_chips);
                (player.name.clone(), Opponent::new(player.name.clone(), chips, seat))
            })
            .collect();

        let data = SessionData {
            config,
            geometry: Some(geometry),
            hero_seat: Some(hero_seat),
            hero_chips,
            opponents,
            hand: HandContext::default(),
            hand_number: 1,
        };
        let summary = SetupSummary {
            hero_seat,
            button_seat: geometry.button_seat(),
            total_seats,
            positions: data.positions()?,
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
        };
        info!(
            "session set up: {} opponents on {total_seats} seats, hero in seat {hero_seat}",
            data.opponents.len()
        );
        *self = Self::from_data(data);
        Ok(summary)
    }

    /// Store the hero's hole cards for this hand.
    ///
    /// Only `HandStart` advances to `CardsCaptured`, clearing the board on the
    /// way; in later phases an empty slot is filled without moving the phase.
    pub fn capture_hole_cards(&mut self, capture: Capture) -> SessionResult<CaptureAck> {
        let hole_cards = match capture {
            Capture::Cards([first, second]) if first == second => {
                return Err(SessionError::InvalidHoleCards);
            }
            Capture::Cards(cards) => HoleCards::Known(cards),
            Capture::Signal => HoleCards::Captured,
        };
        let hand = &self.data().hand;
        if hand.hole_cards.is_some() {
            return Err(SessionError::HoleCardsAlreadyCaptured);
        }
        let starts_hand = self.phase() == Phase::HandStart;
        if let Some(cards) = hole_cards.cards() {
            if !starts_hand && hand.board.iter().any(|card| cards.contains(card)) {
                return Err(SessionError::InvalidHoleCards);
            }
        }

        if starts_hand {
            // Any board seen before the capture belongs to an earlier hand.
            self.transition(|mut data| {
                data.hand.board.clear();
                data.hand.hole_cards = Some(hole_cards);
                enter(data, CardsCaptured {})
            });
        } else {
            self.data_mut().hand.hole_cards = Some(hole_cards);
        }

        let hand_number = self.data().hand_number;
        debug!("hole cards captured for hand {hand_number}");
        Ok(CaptureAck {
            phase: self.phase(),
            hand_number,
            cards_known: hole_cards.is_known(),
        })
    }

    fn validate_update(&self, update: &HandUpdate) -> SessionResult<()> {
        let data = self.data();
        if update.new_hand {
            data.geometry()?;
        }
        let Some(board) = &update.community_cards else {
            return Ok(());
        };

        if !BOARD_SIZES.contains(&board.len()) {
            return Err(SessionError::InvalidBoard(format!(
                "{} cards, expected 0, 3, 4 or 5",
                board.len()
            )));
        }
        let mut seen = HashSet::with_capacity(board.len());
        for card in board {
            if !seen.insert(*card) {
                return Err(SessionError::InvalidBoard(format!("{card} appears twice")));
            }
        }
        if update.new_hand {
            return Ok(());
        }

        if let Some(hole) = data.hand.hole_cards.and_then(|h| h.cards()) {
            if board.iter().any(|card| hole.contains(card)) {
                // Don't name the card; it's one of the hero's.
                return Err(SessionError::InvalidBoard(
                    "board overlaps the hole cards".to_string(),
                ));
            }
        }
        let current = data.hand.board.len();
        if board.len() < current {
            return Err(SessionError::BoardRegression {
                current,
                requested: board.len(),
            });
        }
        if let Some(removed) = data.hand.board.iter().find(|&card| !board.contains(card)) {
            return Err(SessionError::BoardMismatch(*removed));
        }
        Ok(())
    }

    /// Record observed state. Moves to `StateUpdated` from any phase, or to
    /// `HandStart` after rotating the button when `new_hand` is set.
    ///
    /// All-or-nothing: when any part is invalid nothing changes.
    pub fn update(&mut self, update: HandUpdate) -> SessionResult<UpdateSummary> {
        self.validate_update(&update)?;
        let HandUpdate {
            pot,
            action_history,
            player_actions,
            community_cards,
            chip_updates,
            new_hand,
        } = update;

        let data = self.data_mut();
        if new_hand {
            let button = data.start_new_hand()?;
            info!("hand {} starts with the button on seat {button}", data.hand_number);
        }
        data.hand.pot = Some(pot);
        data.hand.action_history = action_history;
        if let Some(board) = community_cards {
            data.hand.board = board;
        }

        let mut skipped = Vec::new();
        for (name, chips) in chip_updates {
            if data.config.is_hero(&name) {
                data.hero_chips = chips;
            } else if let Some(opponent) = data.opponent_mut(&name) {
                opponent.chips = chips;
            } else {
                warn!("chip update for unknown player {name:?} skipped");
                skipped.push(name);
            }
        }
        for PlayerAction { name, action } in player_actions {
            if data.config.is_hero(&name) {
                continue;
            }
            match data.opponent_mut(&name) {
                Some(opponent) => {
                    if opponent.tendency.record(&action).is_none() {
                        debug!("unclassified action {action:?} from {name}");
                    }
                }
                None => {
                    warn!("action for unknown player {name:?} skipped");
                    skipped.push(name);
                }
            }
        }

        if new_hand {
            self.transition(|data| enter(data, HandStart {}));
        } else {
            self.transition(|data| enter(data, StateUpdated {}));
        }
        Ok(self.update_summary(skipped))
    }

    fn update_summary(&self, skipped: Vec<String>) -> UpdateSummary {
        let data = self.data();
        UpdateSummary {
            phase: self.phase(),
            hand_number: data.hand_number,
            button_seat: data.geometry.map(|g| g.button_seat()),
            pot: data.hand.pot.unwrap_or(0),
            community_cards: data.hand.board.clone(),
            hero_chips: data.hero_chips,
            opponent_tendencies: data
                .opponents
                .iter()
                .map(|(name, o)| (name.clone(), o.tendency.report()))
                .collect(),
            skipped,
        }
    }

    /// Commit to a read of the current state.
    ///
    /// Needs hole cards, a pot and a non-empty action history. Committing
    /// again while committed re-confirms; new analysis text replaces the old.
    pub fn commit_read(&mut self, analysis: Option<String>) -> SessionResult<CommitAck> {
        let missing = self.data().hand.missing_context();
        if !missing.is_empty() {
            return Err(SessionError::MissingContext { missing });
        }

        let reconfirmed = match self.phase() {
            Phase::StateUpdated => {
                self.transition(|data| enter(data, ReadCommitted { analysis }));
                false
            }
            Phase::ReadCommitted => {
                if let (Self::ReadCommitted(game), Some(text)) = (&mut *self, analysis) {
                    game.state.analysis = Some(text);
                }
                true
            }
            Phase::HandStart | Phase::CardsCaptured | Phase::Acted => {
                return Err(SessionError::ProtocolViolation {
                    missing: MissingStep::StateUpdate,
                });
            }
        };
        debug!("read committed for hand {}", self.data().hand_number);
        Ok(CommitAck {
            phase: self.phase(),
            analysis: self.analysis().map(str::to_string),
            reconfirmed,
        })
    }

    /// Act on the committed read. Only legal from `ReadCommitted`; the
    /// returned payload is what the caller may surface.
    pub fn act(&mut self, payload: &str) -> SessionResult<String> {
        if let Some(missing) = self.next_step() {
            warn!("act rejected in {} phase: {missing}", self.phase());
            return Err(SessionError::ProtocolViolation { missing });
        }
        if payload.trim().is_empty() {
            return Err(SessionError::EmptyPayload);
        }
        let output = payload.to_string();
        self.transition(|data| {
            enter(
                data,
                Acted {
                    output: output.clone(),
                },
            )
        });
        info!("acted in hand {}", self.data().hand_number);
        Ok(output)
    }

    /// The first protocol step still missing before `act` is allowed, or
    /// `None` when the session is ready to act.
    #[must_use]
    pub fn next_step(&self) -> Option<MissingStep> {
        match self.phase() {
            Phase::ReadCommitted => None,
            _ if !self.data().hand.has_hole_cards() => Some(MissingStep::Cards),
            Phase::StateUpdated => Some(MissingStep::ReadCommit),
            Phase::HandStart | Phase::CardsCaptured | Phase::Acted => Some(MissingStep::StateUpdate),
        }
    }

    #[must_use]
    pub fn analysis(&self) -> Option<&str> {
        match self {
            Self::ReadCommitted(game) => game.state.analysis.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn last_output(&self) -> Option<&str> {
        match self {
            Self::Acted(game) => Some(&game.state.output),
            _ => None,
        }
    }

    /// Echo the hole cards to the caller. `None` when nothing was captured
    /// or only a capture signal is held.
    #[must_use]
    pub fn reveal_hole_cards(&self) -> Option<[Card; 2]> {
        let cards = self.data().hand.hole_cards.and_then(|h| h.cards());
        if cards.is_some() {
            info!("hole cards revealed to caller");
        }
        cards
    }

    /// Hero equity against the current board using the held cards.
    pub fn hero_equity<R: Rng + ?Sized>(&self, trials: u32, rng: &mut R) -> Option<Equity> {
        let data = self.data();
        let cards = data.hand.hole_cards.and_then(|h| h.cards())?;
        Some(estimate_equity(&cards, &data.hand.board, trials, rng))
    }

    pub fn positions(&self) -> SessionResult<BTreeMap<String, Position>> {
        Ok(self.data().positions()?)
    }

    pub fn hero_position(&self) -> SessionResult<Position> {
        Ok(self.data().hero_position()?)
    }
}
