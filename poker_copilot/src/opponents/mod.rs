//! Opponent tracking: chip stacks and empirical action tendencies.
//!
//! The tracker only counts. Raw counters are the single source of truth;
//! every percentage is derived from them on demand, so the numbers reported
//! after an update can never drift from the counts that produced them.
//!
//! ## Classification
//!
//! Action strings are matched case-insensitively by substring, first match
//! wins: "raise" or "bet" → raise, "call" → call, "fold" → fold,
//! "check" → check. Anything else is ignored.
//!
//! ## Example
//!
//! ```
//! use poker_copilot::opponents::Tendency;
//!
//! let mut tendency = Tendency::default();
//! tendency.record("Raises to 60");
//! tendency.record("raise");
//! tendency.record("calls");
//!
//! let report = tendency.report();
//! assert_eq!(report.aggression_pct, 66.7);
//! assert_eq!(report.vpip_pct, 100.0);
//! ```

pub mod models;

pub use models::{ActionKind, Opponent, Tendency, TendencyReport};
