//! Session state and the turn protocol.
//!
//! A [`PokerSession`] owns the table (seats, button, stacks, opponents) and
//! the current hand, and walks each hand through
//! `HandStart → CardsCaptured → StateUpdated → ReadCommitted → Acted`.
//! Acting is only legal from `ReadCommitted`; every rejection names the
//! step the caller skipped.
//!
//! ## Example
//!
//! ```
//! use poker_copilot::game::entities::Card;
//! use poker_copilot::session::{Capture, HandUpdate, Phase, PlayerSeat, PokerSession, TurnView};
//!
//! let mut session = PokerSession::default();
//! session.setup(&[PlayerSeat::new("alice"), PlayerSeat::new("bob")], 1000)?;
//! assert!(session.act("raise").is_err());
//!
//! let cards = [Card::parse("Ah")?, Card::parse("Kd")?];
//! session.capture_hole_cards(Capture::Cards(cards))?;
//! session.update(HandUpdate::new(30, ["alice raises to 20"]))?;
//! session.commit_read(None)?;
//! session.act("raise to 60")?;
//! assert_eq!(session.phase(), Phase::Acted);
//! # Ok::<(), poker_copilot::session::SessionError>(())
//! ```

pub mod config;
pub mod entities;
pub mod errors;
pub mod messages;
pub mod snapshot;
pub mod state_machine;
pub mod states;

pub use config::SessionConfig;
pub use entities::{HandContext, HoleCards, SessionData};
pub use errors::{ContextField, MissingStep, SessionError, SessionResult};
pub use messages::{
    Capture, CaptureAck, CommitAck, HandUpdate, OpponentRecord, PlayerAction, PlayerSeat,
    SetupSummary, UpdateSummary,
};
pub use snapshot::{HandRecord, SessionSnapshot};
pub use state_machine::{Game, PokerSession, TurnView};
pub use states::Phase;
