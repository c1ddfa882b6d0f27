//! # Poker Copilot
//!
//! Decision-support core for a live Texas Hold'em player: a hand evaluator,
//! a Monte-Carlo equity estimator, table geometry with button rotation,
//! opponent tendency counters, and a turn protocol that only lets the
//! caller act after cards, state and a committed read are in place.
//!
//! ## Core Modules
//!
//! - [`game`]: cards, the hand evaluator and equity estimation
//! - [`table`]: seats, positions and the button
//! - [`opponents`]: per-opponent action tendencies
//! - [`session`]: the session aggregate and its turn state machine
//!
//! ## Example
//!
//! ```
//! use poker_copilot::{Card, HandCategory, eval};
//!
//! let cards = Card::parse_many(&["Ah", "2d", "3s", "4c", "5h"]).unwrap();
//! let rank = eval(&cards);
//! assert_eq!(rank.category, HandCategory::Straight);
//! assert_eq!(rank.tiebreakers, vec![5]);
//! ```

/// Cards, evaluation and equity.
pub mod game;
pub use game::{
    constants::{self, DEFAULT_EQUITY_TRIALS},
    entities::{self, Card, CardParseError, Deck, HandCategory, HandRank, Suit, Usd, Value},
    equity::{
        self, Equity, EquityError, EquitySource, estimate_equity, estimate_equity_default,
        estimate_equity_parallel, pot_odds,
    },
    functional::{self, argmax, eval},
};

/// Table geometry.
pub mod table;
pub use table::{GeometryError, Position, SeatIndex, TableGeometry, position_of};

pub mod opponents;
pub use opponents::{ActionKind, Opponent, Tendency, TendencyReport};

/// Session state and the turn protocol.
pub mod session;
pub use session::{
    Capture, HandUpdate, Phase, PlayerSeat, PokerSession, SessionConfig, SessionError,
    SessionResult, SessionSnapshot, TurnView,
};
