//! Card representation: a 52-card universe ordered rank-major, plus a
//! bijective string notation (`"Ah"`, `"Td"`, `"2c"`, ...).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::EngineError;

/// Represents one of the four suits in a standard 52-card deck.
/// `Display`/`FromStr` use the standard one-letter shorthand (`c`, `d`, `h`, `s`).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub fn as_char(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }

    pub fn from_char(c: char) -> Result<Suit, EngineError> {
        match c.to_ascii_lowercase() {
            'c' => Ok(Suit::Clubs),
            'd' => Ok(Suit::Diamonds),
            'h' => Ok(Suit::Hearts),
            's' => Ok(Suit::Spades),
            other => Err(EngineError::InvalidCard {
                input: other.to_string(),
                reason: "suit must be one of c, d, h, s".to_string(),
            }),
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Represents the rank (face value) of a playing card from Two through Ace.
/// The discriminants double as the rank's numeric value (`2..=14`).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub fn from_u8(v: u8) -> Result<Rank, EngineError> {
        match v {
            2 => Ok(Rank::Two),
            3 => Ok(Rank::Three),
            4 => Ok(Rank::Four),
            5 => Ok(Rank::Five),
            6 => Ok(Rank::Six),
            7 => Ok(Rank::Seven),
            8 => Ok(Rank::Eight),
            9 => Ok(Rank::Nine),
            10 => Ok(Rank::Ten),
            11 => Ok(Rank::Jack),
            12 => Ok(Rank::Queen),
            13 => Ok(Rank::King),
            14 => Ok(Rank::Ace),
            other => Err(EngineError::InvalidCard {
                input: other.to_string(),
                reason: "rank must be in 2..=14".to_string(),
            }),
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }

    fn as_char(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }

    fn from_char(c: char) -> Result<Rank, EngineError> {
        match c.to_ascii_uppercase() {
            '2' => Ok(Rank::Two),
            '3' => Ok(Rank::Three),
            '4' => Ok(Rank::Four),
            '5' => Ok(Rank::Five),
            '6' => Ok(Rank::Six),
            '7' => Ok(Rank::Seven),
            '8' => Ok(Rank::Eight),
            '9' => Ok(Rank::Nine),
            'T' => Ok(Rank::Ten),
            'J' => Ok(Rank::Jack),
            'Q' => Ok(Rank::Queen),
            'K' => Ok(Rank::King),
            'A' => Ok(Rank::Ace),
            other => Err(EngineError::InvalidCard {
                input: other.to_string(),
                reason: "rank must be one of 2-9, T, J, Q, K, A".to_string(),
            }),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Represents a single playing card with a rank and suit.
/// Equal iff both components are equal.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Card { rank, suit }
    }

    /// Parses the standard two-character notation, e.g. `"Ah"`, `"Td"`, `"2c"`.
    pub fn from_str_notation(s: &str) -> Result<Card, EngineError> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 2 {
            return Err(EngineError::InvalidCard {
                input: s.to_string(),
                reason: "card notation must be exactly 2 characters".to_string(),
            });
        }
        let rank = Rank::from_char(chars[0])?;
        let suit = Suit::from_char(chars[1])?;
        Ok(Card::new(rank, suit))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Two,
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
    ]
}

/// The 52-card universe, ordered rank-major (all four suits of Two, then
/// all four suits of Three, ...).
pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(52);
    for &r in &all_ranks() {
        for &s in &all_suits() {
            v.push(Card::new(r, s));
        }
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_deck_has_52_unique_cards() {
        let deck = full_deck();
        assert_eq!(deck.len(), 52);
        let mut unique = deck.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn notation_round_trips_over_the_full_universe() {
        for card in full_deck() {
            let s = card.to_string();
            let parsed = Card::from_str_notation(&s).unwrap();
            assert_eq!(card, parsed);
        }
    }

    #[test]
    fn rejects_malformed_notation() {
        assert!(Card::from_str_notation("").is_err());
        assert!(Card::from_str_notation("Ahh").is_err());
        assert!(Card::from_str_notation("1h").is_err());
        assert!(Card::from_str_notation("Ax").is_err());
    }
}
