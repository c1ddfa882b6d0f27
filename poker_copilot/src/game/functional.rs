//! Hand evaluation and winner selection.
//!
//! `eval` ranks the best five-card hand contained in 5..=7 cards (more cards
//! work too). Categories are checked strongest first; a straight flush is
//! found by scanning each flush suit's own values for a run rather than by
//! combining an independent flush check with an independent straight check.

use super::{
    constants::{ACE, HAND_SIZE, MIN_VALUE},
    entities::{Card, HandCategory, HandRank, Suit, Value},
};

/// Bit set of values, bit `v` set when value `v` is present.
type ValueMask = u16;

const SUITS: usize = Suit::ALL.len();

fn mask_of(values: impl IntoIterator<Item = Value>) -> ValueMask {
    values.into_iter().fold(0, |mask, v| mask | (1 << v))
}

/// High card of the best straight in `mask`, if any.
///
/// The wheel (A-2-3-4-5) is reported with a high card of 5, so it sits
/// below every other straight. The ace is never valued 1 anywhere else.
fn straight_high(mask: ValueMask) -> Option<Value> {
    (MIN_VALUE + HAND_SIZE as Value - 1..=ACE).rev().find_map(|high| {
        let run = mask_of(high + 1 - HAND_SIZE as Value..=high);
        (mask & run == run).then_some(high)
    }).or_else(|| {
        let wheel = mask_of([ACE, 2, 3, 4, 5]);
        (mask & wheel == wheel).then_some(5)
    })
}

/// Values of `mask` from highest to lowest.
fn descending(mask: ValueMask) -> impl Iterator<Item = Value> {
    (MIN_VALUE..=ACE).rev().filter(move |v| mask & (1 << v) != 0)
}

/// Rank the best five-card hand in `cards`.
///
/// Fewer than five cards yields [`HandRank::unranked`] instead of an error;
/// callers comparing hands should check [`HandRank::is_ranked`] first.
#[must_use]
pub fn eval(cards: &[Card]) -> HandRank {
    if cards.len() < HAND_SIZE {
        return HandRank::unranked();
    }

    let mut value_counts = [0u8; ACE as usize + 1];
    let mut suit_masks = [0 as ValueMask; SUITS];
    let mut suit_counts = [0usize; SUITS];
    for card in cards {
        value_counts[usize::from(card.0)] += 1;
        suit_masks[card.1 as usize] |= 1 << card.0;
        suit_counts[card.1 as usize] += 1;
    }

    // Flush suit, if any. With at most 7 cards only one suit can reach 5;
    // for larger inputs prefer the suit whose top cards rank highest.
    let flush_mask = suit_counts
        .iter()
        .zip(suit_masks)
        .filter(|(count, _)| **count >= HAND_SIZE)
        .map(|(_, mask)| mask)
        .max_by(|a, b| descending(*a).take(HAND_SIZE).cmp(descending(*b).take(HAND_SIZE)));

    let straight_flush = suit_counts
        .iter()
        .zip(suit_masks)
        .filter(|(count, _)| **count >= HAND_SIZE)
        .filter_map(|(_, mask)| straight_high(mask))
        .max();
    if let Some(high) = straight_flush {
        return HandRank::new(HandCategory::StraightFlush, vec![high]);
    }

    // Groups of equal value sorted by (count desc, value desc).
    let mut groups: Vec<(u8, Value)> = (MIN_VALUE..=ACE)
        .filter(|&v| value_counts[usize::from(v)] > 0)
        .map(|v| (value_counts[usize::from(v)], v))
        .collect();
    groups.sort_unstable_by(|a, b| b.cmp(a));

    let best_kickers = |used: &[Value], n: usize| -> Vec<Value> {
        descending(mask_of(groups.iter().map(|&(_, v)| v)))
            .filter(|v| !used.contains(v))
            .take(n)
            .collect()
    };

    let (top_count, top_value) = groups[0];

    if top_count >= 4 {
        let mut tiebreakers = vec![top_value];
        tiebreakers.extend(best_kickers(&[top_value], 1));
        return HandRank::new(HandCategory::FourOfAKind, tiebreakers);
    }

    if top_count == 3 {
        let pair = groups[1..]
            .iter()
            .filter(|&&(count, _)| count >= 2)
            .map(|&(_, v)| v)
            .max();
        if let Some(pair) = pair {
            return HandRank::new(HandCategory::FullHouse, vec![top_value, pair]);
        }
    }

    if let Some(mask) = flush_mask {
        return HandRank::new(HandCategory::Flush, descending(mask).take(HAND_SIZE).collect());
    }

    if let Some(high) = straight_high(mask_of(groups.iter().map(|&(_, v)| v))) {
        return HandRank::new(HandCategory::Straight, vec![high]);
    }

    if top_count == 3 {
        let mut tiebreakers = vec![top_value];
        tiebreakers.extend(best_kickers(&[top_value], 2));
        return HandRank::new(HandCategory::ThreeOfAKind, tiebreakers);
    }

    if top_count == 2 && groups.len() > 1 && groups[1].0 == 2 {
        let (high_pair, low_pair) = (top_value, groups[1].1);
        let mut tiebreakers = vec![high_pair, low_pair];
        tiebreakers.extend(best_kickers(&[high_pair, low_pair], 1));
        return HandRank::new(HandCategory::TwoPair, tiebreakers);
    }

    if top_count == 2 {
        let mut tiebreakers = vec![top_value];
        tiebreakers.extend(best_kickers(&[top_value], 3));
        return HandRank::new(HandCategory::OnePair, tiebreakers);
    }

    HandRank::new(HandCategory::HighCard, best_kickers(&[], HAND_SIZE))
}

/// Indices of every hand sharing the best rank, in ascending order.
/// More than one index means a split pot.
#[must_use]
pub fn argmax(hands: &[HandRank]) -> Vec<usize> {
    let Some(best) = hands.iter().max() else {
        return Vec::new();
    };
    hands
        .iter()
        .enumerate()
        .filter(|(_, hand)| *hand == best)
        .map(|(idx, _)| idx)
        .collect()
}
