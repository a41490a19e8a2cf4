//! Card - suit, rank and the compact token format
//!
//! Ordering is by `value()` (3..=17); suit only breaks ties for display.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Card suit. Jokers carry the sentinel `Joker` suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Spades,
    Hearts,
    Clubs,
    Diamonds,
    Joker,
}

impl Suit {
    /// The four ordinary suits, in display order
    pub const STANDARD: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds];

    pub fn glyph(&self) -> &'static str {
        match self {
            Suit::Spades => "♠",
            Suit::Hearts => "♥",
            Suit::Clubs => "♣",
            Suit::Diamonds => "♦",
            Suit::Joker => "",
        }
    }

    pub fn from_glyph(c: char) -> Option<Self> {
        match c {
            '♠' => Some(Suit::Spades),
            '♥' => Some(Suit::Hearts),
            '♣' => Some(Suit::Clubs),
            '♦' => Some(Suit::Diamonds),
            _ => None,
        }
    }
}

/// Card rank. The discriminant is the comparison value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
    Two = 15,
    SmallJoker = 16,
    BigJoker = 17,
}

impl Rank {
    /// Ranks that appear once per ordinary suit
    pub const STANDARD: [Rank; 13] = [
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
        Rank::Two,
    ];

    #[inline]
    pub const fn value(self) -> u8 {
        self as u8
    }

    pub const fn is_joker(self) -> bool {
        matches!(self, Rank::SmallJoker | Rank::BigJoker)
    }

    pub fn token(&self) -> &'static str {
        match self {
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::SmallJoker => "SJ",
            Rank::BigJoker => "BJ",
        }
    }

    fn from_token(s: &str) -> Option<Self> {
        match s {
            "3" => Some(Rank::Three),
            "4" => Some(Rank::Four),
            "5" => Some(Rank::Five),
            "6" => Some(Rank::Six),
            "7" => Some(Rank::Seven),
            "8" => Some(Rank::Eight),
            "9" => Some(Rank::Nine),
            "10" | "T" => Some(Rank::Ten),
            "J" => Some(Rank::Jack),
            "Q" => Some(Rank::Queen),
            "K" => Some(Rank::King),
            "A" => Some(Rank::Ace),
            "2" => Some(Rank::Two),
            _ => None,
        }
    }
}

/// A single playing card. Identity is `(suit, rank)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub const SMALL_JOKER: Card = Card::new(Suit::Joker, Rank::SmallJoker);
    pub const BIG_JOKER: Card = Card::new(Suit::Joker, Rank::BigJoker);

    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// Comparison value, 3..=17
    #[inline]
    pub const fn value(&self) -> u8 {
        self.rank.value()
    }

    pub const fn is_joker(&self) -> bool {
        self.rank.is_joker()
    }
}

impl Ord for Card {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value()
            .cmp(&other.value())
            .then(self.suit.cmp(&other.suit))
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.suit.glyph(), self.rank.token())
    }
}

/// Error returned when a card token cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown card token: {0:?}")]
pub struct CardParseError(pub String);

impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SJ" => return Ok(Card::SMALL_JOKER),
            "BJ" => return Ok(Card::BIG_JOKER),
            _ => {}
        }

        let mut chars = s.chars();
        let suit = chars
            .next()
            .and_then(Suit::from_glyph)
            .ok_or_else(|| CardParseError(s.to_string()))?;
        let rank = Rank::from_token(chars.as_str()).ok_or_else(|| CardParseError(s.to_string()))?;

        Ok(Card::new(suit, rank))
    }
}

impl TryFrom<String> for Card {
    type Error = CardParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.to_string()
    }
}

/// Parse a card token, `None` when unknown
pub fn card_from_str(token: &str) -> Option<Card> {
    token.parse().ok()
}

/// Parse a whitespace or comma separated list of tokens
pub fn parse_cards(input: &str) -> Result<Vec<Card>, CardParseError> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(str::parse)
        .collect()
}

/// Render cards as space separated tokens
pub fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::create_deck;

    #[test]
    fn test_rank_values_ascend() {
        let mut previous = 0;
        for rank in Rank::STANDARD {
            assert!(rank.value() > previous);
            previous = rank.value();
        }
        assert_eq!(Rank::Three.value(), 3);
        assert_eq!(Rank::Two.value(), 15);
        assert_eq!(Rank::SmallJoker.value(), 16);
        assert_eq!(Rank::BigJoker.value(), 17);
    }

    #[test]
    fn test_suit_does_not_affect_value() {
        let spade = Card::new(Suit::Spades, Rank::King);
        let diamond = Card::new(Suit::Diamonds, Rank::King);
        assert_eq!(spade.value(), diamond.value());
        assert_ne!(spade, diamond);
        assert!(spade < diamond); // suit tie-break only
        assert!(diamond < Card::new(Suit::Spades, Rank::Ace));
    }

    #[test]
    fn test_token_round_trip_all_cards() {
        for card in create_deck() {
            let token = card.to_string();
            assert_eq!(card_from_str(&token), Some(card), "token {token}");
        }
    }

    #[test]
    fn test_token_format() {
        assert_eq!(Card::new(Suit::Spades, Rank::Three).to_string(), "♠3");
        assert_eq!(Card::new(Suit::Hearts, Rank::Ten).to_string(), "♥10");
        assert_eq!(Card::SMALL_JOKER.to_string(), "SJ");
        assert_eq!(Card::BIG_JOKER.to_string(), "BJ");
        assert_eq!(card_from_str("♦T"), Some(Card::new(Suit::Diamonds, Rank::Ten)));
    }

    #[test]
    fn test_unknown_tokens() {
        assert_eq!(card_from_str(""), None);
        assert_eq!(card_from_str("♠"), None);
        assert_eq!(card_from_str("♠1"), None);
        assert_eq!(card_from_str("X3"), None);
        assert_eq!(card_from_str("♠SJ"), None);
        assert!("zz".parse::<Card>().is_err());
    }

    #[test]
    fn test_parse_cards_list() {
        let cards = parse_cards("♠3, ♥4 ♦5").unwrap();
        assert_eq!(cards.len(), 3);
        assert_eq!(format_cards(&cards), "♠3 ♥4 ♦5");
        assert!(parse_cards("♠3 nope").is_err());
    }

    #[test]
    fn test_serde_uses_tokens() {
        let card = Card::new(Suit::Clubs, Rank::Queen);
        let json = serde_json::to_string(&card).unwrap();
        assert_eq!(json, "\"♣Q\"");
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(back, card);
        assert!(serde_json::from_str::<Card>("\"??\"").is_err());
    }
}
