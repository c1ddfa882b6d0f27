use super::entities::Value;

/// Lowest card value (deuce).
pub const MIN_VALUE: Value = 2;
/// Highest card value. Aces are always 14; the wheel is special-cased in
/// straight detection only.
pub const ACE: Value = 14;

pub const RANK_CHARS: [char; 13] = [
    '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A',
];
pub const SUIT_CHARS: [char; 4] = ['s', 'h', 'd', 'c'];

pub const DECK_SIZE: usize = 52;
pub const HOLE_CARDS: usize = 2;
pub const HAND_SIZE: usize = 5;
pub const FULL_BOARD: usize = 5;
/// Board sizes that can legally be observed: preflop, flop, turn, river.
pub const BOARD_SIZES: [usize; 4] = [0, 3, 4, 5];

pub const DEFAULT_EQUITY_TRIALS: u32 = 1000;
/// Equity reported when a simulation could not run.
pub const NEUTRAL_EQUITY: f64 = 0.5;
