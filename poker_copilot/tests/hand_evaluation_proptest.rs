/// Property-based tests for card parsing and hand evaluation using proptest
///
/// These tests check the parser grammar and that the evaluator's ranking
/// is deterministic, bounded and ordered across random card combinations.
use poker_copilot::game::{
    constants::{RANK_CHARS, SUIT_CHARS},
    entities::{Card, CardParseError, HandCategory, HandRank, Suit},
    functional::{argmax, eval},
};
use proptest::prelude::*;
use std::collections::BTreeSet;

// Strategy to generate a valid card (values 2-14, aces high)
fn card_strategy() -> impl Strategy<Value = Card> {
    (2u8..=14, 0usize..4).prop_map(|(value, suit_idx)| Card(value, Suit::ALL[suit_idx]))
}

// Strategy to generate a vec of unique cards (no duplicates)
fn unique_cards_strategy(min: usize, max: usize) -> impl Strategy<Value = Vec<Card>> {
    prop::collection::vec(card_strategy(), min..=max).prop_filter("Cards must be unique", |cards| {
        let set: BTreeSet<_> = cards.iter().collect();
        set.len() == cards.len()
    })
}

fn suit_of(idx: u8) -> Suit {
    Suit::ALL[usize::from(idx) % 4]
}

fn hand(layout: &[(u8, Suit)]) -> Vec<Card> {
    layout.iter().map(|&(value, suit)| Card(value, suit)).collect()
}

proptest! {
    #[test]
    fn test_parse_accepts_grammar(rank in 0usize..13, suit in 0usize..4) {
        let token: String = [RANK_CHARS[rank], SUIT_CHARS[suit]].iter().collect();
        let card = Card::parse(&token).unwrap();
        prop_assert_eq!(card.value() as usize, rank + 2);
        prop_assert_eq!(card.suit(), Suit::ALL[suit]);
        prop_assert_eq!(card.to_string(), token);
    }

    #[test]
    fn test_parse_rejects_bad_rank(rank in "[^23456789TJQKA]", suit in 0usize..4) {
        let token = format!("{rank}{}", SUIT_CHARS[suit]);
        let is_invalid_rank = matches!(Card::parse(&token), Err(CardParseError::InvalidRank { .. }));
        prop_assert!(is_invalid_rank, "{} should be an invalid rank", token);
    }

    #[test]
    fn test_parse_rejects_bad_suit(rank in 0usize..13, suit in "[^shdc]") {
        let token = format!("{}{suit}", RANK_CHARS[rank]);
        let is_invalid_suit = matches!(Card::parse(&token), Err(CardParseError::InvalidSuit { .. }));
        prop_assert!(is_invalid_suit, "{} should be an invalid suit", token);
    }

    #[test]
    fn test_parse_rejects_wrong_length(token in "[2-9TJQKAshdc]{3,6}") {
        let is_wrong_length = matches!(Card::parse(&token), Err(CardParseError::WrongLength { .. }));
        prop_assert!(is_wrong_length);
    }

    #[test]
    fn test_eval_short_hands_are_unranked(cards in unique_cards_strategy(0, 4)) {
        prop_assert_eq!(eval(&cards), HandRank::unranked());
    }

    #[test]
    fn test_eval_deterministic(cards in unique_cards_strategy(7, 7)) {
        let rank1 = eval(&cards);
        let rank2 = eval(&cards);
        prop_assert_eq!(rank1, rank2);
    }

    #[test]
    fn test_eval_ignores_card_order(mut cards in unique_cards_strategy(5, 7)) {
        let before = eval(&cards);
        cards.reverse();
        prop_assert_eq!(before, eval(&cards));
    }

    #[test]
    fn test_eval_is_ranked_with_bounded_tiebreakers(cards in unique_cards_strategy(5, 7)) {
        let rank = eval(&cards);
        prop_assert!(rank.is_ranked());
        prop_assert!(!rank.tiebreakers.is_empty());
        prop_assert!(rank.tiebreakers.len() <= 5);
        prop_assert!(rank.tiebreakers.iter().all(|v| (2..=14).contains(v)));
    }

    #[test]
    fn test_more_cards_never_hurt(cards in unique_cards_strategy(7, 7)) {
        let five = eval(&cards[..5]);
        let six = eval(&cards[..6]);
        let seven = eval(&cards);
        prop_assert!(six >= five);
        prop_assert!(seven >= six);
    }

    #[test]
    fn test_argmax_single_hand_returns_zero(cards in unique_cards_strategy(5, 5)) {
        prop_assert_eq!(argmax(&[eval(&cards)]), vec![0]);
    }

    #[test]
    fn test_argmax_identical_hands_all_win(cards in unique_cards_strategy(5, 5)) {
        let rank = eval(&cards);
        let ranks = vec![rank.clone(), rank.clone(), rank];
        prop_assert_eq!(argmax(&ranks), vec![0, 1, 2]);
    }

    #[test]
    fn test_argmax_returns_maximum(
        hand1 in unique_cards_strategy(7, 7),
        hand2 in unique_cards_strategy(7, 7),
        hand3 in unique_cards_strategy(7, 7),
    ) {
        let ranks = vec![eval(&hand1), eval(&hand2), eval(&hand3)];
        let winners = argmax(&ranks);
        prop_assert!(!winners.is_empty());
        for &i in &winners {
            prop_assert!(ranks.iter().all(|r| &ranks[i] >= r));
        }
    }
}

proptest! {
    #[test]
    fn test_straight_flush_beats_four_kind(suit_idx in 0u8..4, high in 6u8..=14) {
        let suit = suit_of(suit_idx);
        let straight_flush: Vec<Card> = (high - 4..=high).map(|v| Card(v, suit)).collect();
        let quads = hand(&[
            (14, Suit::Spade), (14, Suit::Heart), (14, Suit::Diamond), (14, Suit::Club), (13, Suit::Spade),
        ]);
        let rank = eval(&straight_flush);
        prop_assert_eq!(rank.category, HandCategory::StraightFlush);
        prop_assert_eq!(&rank.tiebreakers, &vec![high]);
        prop_assert!(rank > eval(&quads));
    }

    #[test]
    fn test_four_kind_beats_full_house(quad_value in 2u8..=14, trip_value in 2u8..=14) {
        prop_assume!(quad_value != trip_value);
        let quads = hand(&[
            (quad_value, Suit::Spade), (quad_value, Suit::Heart),
            (quad_value, Suit::Diamond), (quad_value, Suit::Club),
            (trip_value, Suit::Spade),
        ]);
        let pair_value = if trip_value == 2 { 3 } else { 2 };
        prop_assume!(pair_value != quad_value);
        let full_house = hand(&[
            (trip_value, Suit::Spade), (trip_value, Suit::Heart), (trip_value, Suit::Diamond),
            (pair_value, Suit::Spade), (pair_value, Suit::Heart),
        ]);
        prop_assert_eq!(eval(&quads).category, HandCategory::FourOfAKind);
        prop_assert_eq!(eval(&full_house).category, HandCategory::FullHouse);
        prop_assert!(eval(&quads) > eval(&full_house));
    }

    #[test]
    fn test_flush_beats_straight(suit_idx in 0u8..4) {
        let suit = suit_of(suit_idx);
        let other = suit_of(suit_idx + 1);
        let flush = hand(&[(2, suit), (5, suit), (7, suit), (9, suit), (12, suit)]);
        let straight = hand(&[(10, suit), (11, other), (12, suit), (13, other), (14, suit)]);
        prop_assert_eq!(eval(&flush).category, HandCategory::Flush);
        prop_assert_eq!(eval(&straight).category, HandCategory::Straight);
        prop_assert!(eval(&flush) > eval(&straight));
    }

    #[test]
    fn test_pair_kickers_decide(pair in 2u8..=14, suit_idx in 0u8..4) {
        let suit = suit_of(suit_idx);
        let other = suit_of(suit_idx + 1);
        let kickers: Vec<u8> = (2..=14).rev().filter(|&v| v != pair).take(4).collect();
        let strong = hand(&[
            (pair, suit), (pair, other), (kickers[0], suit), (kickers[1], other), (kickers[2], suit),
        ]);
        let weak = hand(&[
            (pair, suit), (pair, other), (kickers[0], suit), (kickers[1], other), (kickers[3], suit),
        ]);
        prop_assert_eq!(eval(&strong).category, HandCategory::OnePair);
        prop_assert!(eval(&strong) > eval(&weak));
    }

    #[test]
    fn test_hand_comparison_transitive(
        hand1 in unique_cards_strategy(5, 7),
        hand2 in unique_cards_strategy(5, 7),
        hand3 in unique_cards_strategy(5, 7),
    ) {
        let (r1, r2, r3) = (eval(&hand1), eval(&hand2), eval(&hand3));
        if r1 > r2 && r2 > r3 {
            prop_assert!(r1 > r3);
        }
        if r1 == r2 && r2 == r3 {
            prop_assert_eq!(r1, r3);
        }
    }
}

#[test]
fn test_wheel_loses_to_six_high_straight() {
    let wheel = Card::parse_many(&["Ah", "2d", "3s", "4c", "5h"]).unwrap();
    let six_high = Card::parse_many(&["2h", "3d", "4s", "5c", "6h"]).unwrap();
    assert_eq!(eval(&wheel), HandRank::new(HandCategory::Straight, vec![5]));
    assert!(eval(&six_high) > eval(&wheel));
}

#[test]
fn test_seven_card_flush_tiebreakers() {
    let cards = Card::parse_many(&["2h", "3h", "5h", "7h", "9h", "Jh", "Kh"]).unwrap();
    assert_eq!(
        eval(&cards),
        HandRank::new(HandCategory::Flush, vec![13, 11, 9, 7, 5])
    );
}

#[test]
fn test_canonical_category_ladder() {
    let ladder = [
        ["Ts", "Js", "Qs", "Ks", "As"],
        ["9c", "9d", "9h", "9s", "2d"],
        ["8c", "8d", "8h", "4s", "4d"],
        ["2h", "6h", "9h", "Jh", "Kh"],
        ["5c", "6d", "7h", "8s", "9d"],
        ["7c", "7d", "7h", "Ks", "2d"],
        ["Jc", "Jd", "4h", "4s", "Ad"],
        ["Qc", "Qd", "8h", "5s", "3d"],
        ["Ac", "Jd", "8h", "5s", "3d"],
    ];
    let ranks: Vec<HandRank> = ladder
        .iter()
        .map(|tokens| eval(&Card::parse_many(tokens).unwrap()))
        .collect();
    for (i, stronger) in ranks.iter().enumerate() {
        for weaker in &ranks[i + 1..] {
            assert!(stronger > weaker, "{stronger} should beat {weaker}");
        }
    }
}
