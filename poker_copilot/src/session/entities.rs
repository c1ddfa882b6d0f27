use std::{collections::BTreeMap, fmt};

use crate::{
    game::entities::{Card, Usd},
    opponents::Opponent,
    table::{GeometryError, GeometryResult, Position, SeatIndex, TableGeometry},
};

use super::{config::SessionConfig, errors::ContextField};

/// The hero's private cards.
///
/// `Debug` never prints the cards and there is no `Serialize`; the only
/// caller-visible read is [`PokerSession::reveal_hole_cards`].
///
/// [`PokerSession::reveal_hole_cards`]: super::PokerSession::reveal_hole_cards
#[derive(Clone, Copy, Eq, PartialEq)]
pub enum HoleCards {
    Known([Card; 2]),
    /// The capture collaborator holds the cards; the session only knows
    /// that capture finished.
    Captured,
}

impl HoleCards {
    pub(crate) fn cards(&self) -> Option<[Card; 2]> {
        match self {
            Self::Known(cards) => Some(*cards),
            Self::Captured => None,
        }
    }

    #[must_use]
    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }
}

impl fmt::Debug for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(_) => write!(f, "HoleCards(<redacted>)"),
            Self::Captured => write!(f, "HoleCards(<captured>)"),
        }
    }
}

/// Per-hand state, cleared at every hand boundary.
#[derive(Clone, Debug, Default)]
pub struct HandContext {
    pub(crate) hole_cards: Option<HoleCards>,
    pub(crate) board: Vec<Card>,
    pub(crate) pot: Option<Usd>,
    pub(crate) action_history: Vec<String>,
}

impl HandContext {
    #[must_use]
    pub fn board(&self) -> &[Card] {
        &self.board
    }

    #[must_use]
    pub fn pot(&self) -> Option<Usd> {
        self.pot
    }

    #[must_use]
    pub fn action_history(&self) -> &[String] {
        &self.action_history
    }

    #[must_use]
    pub fn has_hole_cards(&self) -> bool {
        self.hole_cards.is_some()
    }

    /// Fields a read commit needs, in a fixed order.
    #[must_use]
    pub fn missing_context(&self) -> Vec<ContextField> {
        let mut missing = Vec::new();
        if self.hole_cards.is_none() {
            missing.push(ContextField::HoleCards);
        }
        if self.pot.is_none() {
            missing.push(ContextField::Pot);
        }
        if self.action_history.is_empty() {
            missing.push(ContextField::ActionHistory);
        }
        missing
    }
}

/// Everything the session owns, independent of the protocol phase.
#[derive(Debug, Default)]
pub struct SessionData {
    pub(crate) config: SessionConfig,
    /// `None` until setup.
    pub(crate) geometry: Option<TableGeometry>,
    pub(crate) hero_seat: Option<SeatIndex>,
    pub(crate) hero_chips: Usd,
    pub(crate) opponents: BTreeMap<String, Opponent>,
    pub(crate) hand: HandContext,
    pub(crate) hand_number: u32,
}

impl SessionData {
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            hero_chips: config.default_chips,
            config,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn hand(&self) -> &HandContext {
        &self.hand
    }

    #[must_use]
    pub fn hero_chips(&self) -> Usd {
        self.hero_chips
    }

    #[must_use]
    pub fn hero_seat(&self) -> Option<SeatIndex> {
        self.hero_seat
    }

    #[must_use]
    pub fn hand_number(&self) -> u32 {
        self.hand_number
    }

    #[must_use]
    pub fn opponents(&self) -> &BTreeMap<String, Opponent> {
        &self.opponents
    }

    /// Case-insensitive opponent lookup.
    #[must_use]
    pub fn opponent(&self, name: &str) -> Option<&Opponent> {
        self.opponents
            .get(name)
            .or_else(|| self.opponents.values().find(|o| o.is_named(name)))
    }

    pub(crate) fn opponent_mut(&mut self, name: &str) -> Option<&mut Opponent> {
        if self.opponents.contains_key(name) {
            return self.opponents.get_mut(name);
        }
        self.opponents.values_mut().find(|o| o.is_named(name))
    }

    pub fn geometry(&self) -> GeometryResult<&TableGeometry> {
        self.geometry.as_ref().ok_or(GeometryError::NoSession)
    }

    /// Position of every seated player for the current hand, hero included.
    pub fn positions(&self) -> GeometryResult<BTreeMap<String, Position>> {
        let geometry = self.geometry()?;
        let mut positions: BTreeMap<String, Position> = self
            .opponents
            .values()
            .map(|o| (o.name.clone(), geometry.position(o.seat)))
            .collect();
        if let Some(seat) = self.hero_seat {
            positions.insert(self.config.hero_name.clone(), geometry.position(seat));
        }
        Ok(positions)
    }

    pub fn hero_position(&self) -> GeometryResult<Position> {
        let geometry = self.geometry()?;
        let seat = self.hero_seat.ok_or(GeometryError::NoSession)?;
        Ok(geometry.position(seat))
    }

    /// Rotate the button and clear the hand. Fails before setup.
    pub(crate) fn start_new_hand(&mut self) -> GeometryResult<SeatIndex> {
        let geometry = self.geometry.as_mut().ok_or(GeometryError::NoSession)?;
        let button = geometry.rotate_button();
        self.hand = HandContext::default();
        self.hand_number += 1;
        Ok(button)
    }
}
