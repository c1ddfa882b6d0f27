use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use thiserror::Error;

use super::constants::{self, ACE, DECK_SIZE, MIN_VALUE, RANK_CHARS, SUIT_CHARS};

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Suit {
    Spade,
    Heart,
    Diamond,
    Club,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spade, Suit::Heart, Suit::Diamond, Suit::Club];

    /// Strict lowercase mapping; `H` or `S` are not suits.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            's' => Some(Self::Spade),
            'h' => Some(Self::Heart),
            'd' => Some(Self::Diamond),
            'c' => Some(Self::Club),
            _ => None,
        }
    }

    #[must_use]
    pub const fn to_char(self) -> char {
        SUIT_CHARS[self as usize]
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Spade => "♠",
            Self::Heart => "♥",
            Self::Diamond => "♦",
            Self::Club => "♣",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Placeholder for card values (deuce=2u8 ... ace=14u8).
pub type Value = u8;

/// Type alias for whole chips. Pots, bets and stacks are whole numbers.
pub type Usd = u32;

/// Errors raised while parsing a card token such as `"Ah"`.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum CardParseError {
    #[error("card must be a non-empty string")]
    Empty,
    #[error("card must be exactly 2 characters, got {len} in {token:?}")]
    WrongLength { token: String, len: usize },
    #[error("Invalid rank {rank:?} in {token:?} (expected one of 23456789TJQKA)")]
    InvalidRank { token: String, rank: char },
    #[error("Invalid suit {suit:?} in {token:?} (expected one of shdc)")]
    InvalidSuit { token: String, suit: char },
}

/// A card is a tuple of a value (2..=14) and a suit.
///
/// The evaluator only ever looks at values for pairing, straight and kicker
/// logic; suits only matter for flushes.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Card(pub Value, pub Suit);

impl Card {
    /// Parse a 2-character token: an uppercase rank from `23456789TJQKA`
    /// followed by a lowercase suit from `shdc`. Nothing is normalized.
    pub fn parse(token: &str) -> Result<Self, CardParseError> {
        if token.is_empty() {
            return Err(CardParseError::Empty);
        }
        let chars: Vec<char> = token.chars().collect();
        let &[rank, suit] = chars.as_slice() else {
            return Err(CardParseError::WrongLength {
                token: token.to_string(),
                len: chars.len(),
            });
        };
        let value = value_from_char(rank).ok_or_else(|| CardParseError::InvalidRank {
            token: token.to_string(),
            rank,
        })?;
        let suit = Suit::from_char(suit).ok_or_else(|| CardParseError::InvalidSuit {
            token: token.to_string(),
            suit,
        })?;
        Ok(Self(value, suit))
    }

    /// Parse a sequence of tokens, failing on the first bad one.
    pub fn parse_many<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<Self>, CardParseError> {
        tokens.iter().map(|t| Self::parse(t.as_ref())).collect()
    }

    #[must_use]
    pub const fn value(&self) -> Value {
        self.0
    }

    #[must_use]
    pub const fn suit(&self) -> Suit {
        self.1
    }

    /// False for hand-built cards whose value lies outside deuce..=ace.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.0 >= MIN_VALUE && self.0 <= ACE
    }
}

fn value_from_char(c: char) -> Option<Value> {
    RANK_CHARS
        .iter()
        .position(|&r| r == c)
        .map(|idx| idx as Value + MIN_VALUE)
}

fn value_to_char(value: Value) -> char {
    RANK_CHARS[usize::from(value.clamp(MIN_VALUE, ACE) - MIN_VALUE)]
}

impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", value_to_char(self.0), self.1.to_char())
    }
}

impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Hand categories, weakest first. `Unranked` is the sentinel for inputs
/// with fewer than five cards and never compares above a real hand.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HandCategory {
    Unranked,
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl HandCategory {
    /// Numeric category, 0 for unranked through 9 for a straight flush.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Unranked => "unranked",
            Self::HighCard => "high card",
            Self::OnePair => "one pair",
            Self::TwoPair => "two pair",
            Self::ThreeOfAKind => "three of a kind",
            Self::Straight => "straight",
            Self::Flush => "flush",
            Self::FullHouse => "full house",
            Self::FourOfAKind => "four of a kind",
            Self::StraightFlush => "straight flush",
        };
        write!(f, "{repr}")
    }
}

/// Result of evaluating a hand. The derived ordering compares the category
/// first, then the tiebreakers lexicographically, most significant first.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct HandRank {
    pub category: HandCategory,
    pub tiebreakers: Vec<Value>,
}

impl HandRank {
    #[must_use]
    pub fn new(category: HandCategory, tiebreakers: Vec<Value>) -> Self {
        Self {
            category,
            tiebreakers,
        }
    }

    #[must_use]
    pub fn unranked() -> Self {
        Self::new(HandCategory::Unranked, Vec::new())
    }

    #[must_use]
    pub fn is_ranked(&self) -> bool {
        self.category != HandCategory::Unranked
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.category, self.tiebreakers)
    }
}

/// Cards remaining to be dealt.
#[derive(Clone, Debug)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// A deck holding every card except `excluded`.
    #[must_use]
    pub fn without(excluded: &[Card]) -> Self {
        let mut deck = Self::default();
        deck.cards.retain(|card| !excluded.contains(card));
        deck
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Draw `n` distinct cards uniformly at random. The deck itself keeps
    /// every card, so consecutive draws are independent of each other.
    /// Returns `None` if fewer than `n` cards remain.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R, n: usize) -> Option<&[Card]> {
        if n > self.cards.len() {
            return None;
        }
        let (drawn, _) = self.cards.partial_shuffle(rng, n);
        Some(drawn)
    }
}

impl Default for Deck {
    fn default() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for value in MIN_VALUE..=constants::ACE {
            for suit in Suit::ALL {
                cards.push(Card(value, suit));
            }
        }
        Self { cards }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::HashSet;

    // === Card Tests ===

    #[test]
    fn test_parse_every_rank() {
        for (idx, rank) in "23456789TJQKA".chars().enumerate() {
            let card = Card::parse(&format!("{rank}h")).unwrap();
            assert_eq!(card.0, idx as u8 + 2);
            assert_eq!(card.1, Suit::Heart);
        }
    }

    #[test]
    fn test_parse_every_suit() {
        assert_eq!(Card::parse("As").unwrap(), Card(14, Suit::Spade));
        assert_eq!(Card::parse("Ah").unwrap(), Card(14, Suit::Heart));
        assert_eq!(Card::parse("Ad").unwrap(), Card(14, Suit::Diamond));
        assert_eq!(Card::parse("Ac").unwrap(), Card(14, Suit::Club));
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Card::parse(""), Err(CardParseError::Empty));
    }

    #[test]
    fn test_parse_wrong_length() {
        assert!(matches!(
            Card::parse("A"),
            Err(CardParseError::WrongLength { len: 1, .. })
        ));
        assert!(matches!(
            Card::parse("Ahx"),
            Err(CardParseError::WrongLength { len: 3, .. })
        ));
    }

    #[test]
    fn test_parse_invalid_rank() {
        for token in ["Xh", "1h", "0h", "ah", "kd", "ts"] {
            assert!(
                matches!(Card::parse(token), Err(CardParseError::InvalidRank { .. })),
                "{token} should have an invalid rank"
            );
        }
    }

    #[test]
    fn test_parse_invalid_suit() {
        for token in ["Ax", "A1", "AH", "KS"] {
            assert!(
                matches!(Card::parse(token), Err(CardParseError::InvalidSuit { .. })),
                "{token} should have an invalid suit"
            );
        }
    }

    #[test]
    fn test_parse_error_messages_are_readable() {
        let err = Card::parse("Xh").unwrap_err();
        assert!(err.to_string().contains("Invalid rank"));
        let err = Card::parse("A").unwrap_err();
        assert!(err.to_string().contains("exactly 2 characters"));
        let err = Card::parse("").unwrap_err();
        assert!(err.to_string().contains("non-empty string"));
    }

    #[test]
    fn test_parse_multibyte_suit_is_rejected() {
        assert!(matches!(
            Card::parse("A♠"),
            Err(CardParseError::InvalidSuit { suit: '♠', .. })
        ));
    }

    #[test]
    fn test_card_display_round_trips() {
        for token in ["2c", "Td", "Jh", "Qs", "Ks", "Ac"] {
            assert_eq!(Card::parse(token).unwrap().to_string(), token);
        }
    }

    #[test]
    fn test_card_serde_uses_token() {
        let card = Card(10, Suit::Diamond);
        let json = serde_json::to_string(&card).unwrap();
        assert_eq!(json, "\"Td\"");
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(back, card);
        assert!(serde_json::from_str::<Card>("\"td\"").is_err());
    }

    // === Category Tests ===

    #[test]
    fn test_category_ordering() {
        assert!(HandCategory::Unranked < HandCategory::HighCard);
        assert!(HandCategory::HighCard < HandCategory::OnePair);
        assert!(HandCategory::OnePair < HandCategory::TwoPair);
        assert!(HandCategory::TwoPair < HandCategory::ThreeOfAKind);
        assert!(HandCategory::ThreeOfAKind < HandCategory::Straight);
        assert!(HandCategory::Straight < HandCategory::Flush);
        assert!(HandCategory::Flush < HandCategory::FullHouse);
        assert!(HandCategory::FullHouse < HandCategory::FourOfAKind);
        assert!(HandCategory::FourOfAKind < HandCategory::StraightFlush);
    }

    #[test]
    fn test_category_values() {
        assert_eq!(HandCategory::Unranked.value(), 0);
        assert_eq!(HandCategory::HighCard.value(), 1);
        assert_eq!(HandCategory::StraightFlush.value(), 9);
    }

    #[test]
    fn test_hand_rank_category_dominates() {
        let two_pair = HandRank::new(HandCategory::TwoPair, vec![5, 4, 3]);
        let one_pair = HandRank::new(HandCategory::OnePair, vec![14, 13, 12, 11]);
        assert!(two_pair > one_pair);
    }

    #[test]
    fn test_hand_rank_tiebreakers_compare_lexicographically() {
        let aces_kings = HandRank::new(HandCategory::TwoPair, vec![14, 13, 2]);
        let aces_queens = HandRank::new(HandCategory::TwoPair, vec![14, 12, 11]);
        assert!(aces_kings > aces_queens);
        assert_eq!(aces_kings.clone(), aces_kings);
    }

    // === Deck Tests ===

    #[test]
    fn test_deck_initialization() {
        let deck = Deck::default();
        assert_eq!(deck.len(), 52);
        let unique: HashSet<_> = deck.cards.iter().collect();
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn test_deck_without_excludes_cards() {
        let known = [Card(14, Suit::Heart), Card(14, Suit::Diamond)];
        let deck = Deck::without(&known);
        assert_eq!(deck.len(), 50);
        assert!(known.iter().all(|card| !deck.cards.contains(card)));
    }

    #[test]
    fn test_deck_draw_distinct_cards() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut deck = Deck::default();
        let drawn = deck.draw(&mut rng, 7).unwrap().to_vec();
        let unique: HashSet<_> = drawn.iter().collect();
        assert_eq!(unique.len(), 7);
        assert_eq!(deck.len(), 52);
    }

    #[test]
    fn test_deck_draw_too_many() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut deck = Deck::without(&Deck::default().cards[..50]);
        assert!(deck.draw(&mut rng, 3).is_none());
        assert!(deck.draw(&mut rng, 2).is_some());
    }
}
