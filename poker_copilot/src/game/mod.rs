//! Cards, hand evaluation and equity.
//!
//! - [`entities`]: cards, suits, hand ranks and the deck
//! - [`functional`]: the 5-to-7 card evaluator
//! - [`equity`]: Monte-Carlo equity and pot odds

pub mod constants;
pub mod entities;
pub mod equity;
pub mod functional;
