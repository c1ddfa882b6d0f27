//! Monte-Carlo equity against a single uniformly random opponent hand.
//!
//! Each trial deals the opponent two unseen cards and completes the board
//! from the remaining unseen cards, without replacement inside the trial.
//! Trials are independent of each other. There is no closed form here; the
//! variance shrinks linearly with the trial count.

use log::{debug, warn};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use super::{
    constants::{BOARD_SIZES, FULL_BOARD, HOLE_CARDS, NEUTRAL_EQUITY},
    entities::{Card, Deck},
    functional::eval,
};

/// Trials simulated by one rayon task in [`estimate_equity_parallel`].
/// Fixed so results depend on the seed only, not on the thread count.
const TRIALS_PER_CHUNK: u32 = 256;

/// Why a simulation could not run.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum EquityError {
    #[error("hero needs exactly 2 hole cards, got {0}")]
    HoleCardCount(usize),
    #[error("board must hold 0, 3, 4 or 5 cards, got {0}")]
    BoardSize(usize),
    #[error("card {0} appears more than once")]
    DuplicateCard(Card),
    #[error("trial count must be positive")]
    NoTrials,
    #[error("card value {} is outside 2..=14", .0.value())]
    InvalidCard(Card),
}

/// Where an equity number came from.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EquitySource {
    /// Result of `trials` random playouts.
    Simulated { trials: u32 },
    /// Neutral placeholder because the inputs could not be simulated.
    /// This is not a read on the hand.
    Fallback { reason: EquityError },
}

/// Win probability for the hero, with splits counted as half a win.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Equity {
    pub probability: f64,
    pub source: EquitySource,
}

impl Equity {
    fn fallback(reason: EquityError) -> Self {
        warn!("equity fallback to {NEUTRAL_EQUITY}: {reason}");
        Self {
            probability: NEUTRAL_EQUITY,
            source: EquitySource::Fallback { reason },
        }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, EquitySource::Fallback { .. })
    }
}

/// Check the inputs and build the deck of unseen cards.
fn unseen_deck(hero: &[Card], board: &[Card], trials: u32) -> Result<Deck, EquityError> {
    if hero.len() != HOLE_CARDS {
        return Err(EquityError::HoleCardCount(hero.len()));
    }
    if !BOARD_SIZES.contains(&board.len()) {
        return Err(EquityError::BoardSize(board.len()));
    }
    if trials == 0 {
        return Err(EquityError::NoTrials);
    }
    let mut seen = HashSet::with_capacity(hero.len() + board.len());
    for card in hero.iter().chain(board) {
        if !card.is_valid() {
            return Err(EquityError::InvalidCard(*card));
        }
        if !seen.insert(*card) {
            return Err(EquityError::DuplicateCard(*card));
        }
    }
    let known: Vec<Card> = hero.iter().chain(board).copied().collect();
    Ok(Deck::without(&known))
}

/// Sum of trial scores: 2 per win, 1 per split, 0 per loss. Kept in
/// half-points so chunk results add up exactly.
fn run_trials<R: Rng + ?Sized>(
    hero: &[Card],
    board: &[Card],
    deck: &mut Deck,
    trials: u32,
    rng: &mut R,
) -> u64 {
    let missing = FULL_BOARD - board.len();
    let mut hero_hand = Vec::with_capacity(HOLE_CARDS + FULL_BOARD);
    let mut villain_hand = Vec::with_capacity(HOLE_CARDS + FULL_BOARD);
    let mut half_points = 0;

    for _ in 0..trials {
        // The deck always holds at least 45 cards, so the draw cannot fail.
        let Some(drawn) = deck.draw(rng, HOLE_CARDS + missing) else {
            break;
        };
        let (villain, runout) = drawn.split_at(HOLE_CARDS);

        hero_hand.clear();
        hero_hand.extend_from_slice(hero);
        hero_hand.extend_from_slice(board);
        hero_hand.extend_from_slice(runout);

        villain_hand.clear();
        villain_hand.extend_from_slice(villain);
        villain_hand.extend_from_slice(board);
        villain_hand.extend_from_slice(runout);

        half_points += match eval(&hero_hand).cmp(&eval(&villain_hand)) {
            std::cmp::Ordering::Greater => 2,
            std::cmp::Ordering::Equal => 1,
            std::cmp::Ordering::Less => 0,
        };
    }
    half_points
}

/// Estimate the hero's equity with randomness drawn from `rng`.
///
/// Never fails: invalid inputs produce a neutral 0.5 tagged
/// [`EquitySource::Fallback`] and a warning in the log.
pub fn estimate_equity<R: Rng + ?Sized>(
    hero: &[Card],
    board: &[Card],
    trials: u32,
    rng: &mut R,
) -> Equity {
    let mut deck = match unseen_deck(hero, board, trials) {
        Ok(deck) => deck,
        Err(reason) => return Equity::fallback(reason),
    };
    let half_points = run_trials(hero, board, &mut deck, trials, rng);
    let probability = half_points as f64 / (2.0 * f64::from(trials));
    debug!("equity {probability:.3} over {trials} trials");
    Equity {
        probability,
        source: EquitySource::Simulated { trials },
    }
}

/// Estimate equity using a fast generator seeded from the OS.
pub fn estimate_equity_default(hero: &[Card], board: &[Card], trials: u32) -> Equity {
    let mut rng = SmallRng::from_os_rng();
    estimate_equity(hero, board, trials, &mut rng)
}

/// Same estimate as [`estimate_equity`], with trials split across the rayon
/// pool. Chunk `i` draws from a generator seeded with `seed + i`, so a given
/// seed always produces the same result.
pub fn estimate_equity_parallel(hero: &[Card], board: &[Card], trials: u32, seed: u64) -> Equity {
    let deck = match unseen_deck(hero, board, trials) {
        Ok(deck) => deck,
        Err(reason) => return Equity::fallback(reason),
    };
    let chunks = trials.div_ceil(TRIALS_PER_CHUNK);
    let half_points: u64 = (0..chunks)
        .into_par_iter()
        .map(|chunk| {
            let start = chunk * TRIALS_PER_CHUNK;
            let size = TRIALS_PER_CHUNK.min(trials - start);
            let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(u64::from(chunk)));
            let mut deck = deck.clone();
            run_trials(hero, board, &mut deck, size, &mut rng)
        })
        .sum();
    let probability = half_points as f64 / (2.0 * f64::from(trials));
    debug!("parallel equity {probability:.3} over {trials} trials in {chunks} chunks");
    Equity {
        probability,
        source: EquitySource::Simulated { trials },
    }
}

/// Share of the final pot the hero must put in to call `bet`:
/// `bet / (pot + bet)`, or 0 when both are zero.
#[must_use]
pub fn pot_odds(pot: u32, bet: u32) -> f64 {
    let total = u64::from(pot) + u64::from(bet);
    if total == 0 {
        return 0.0;
    }
    f64::from(bet) / total as f64
}
