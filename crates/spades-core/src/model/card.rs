use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const TWO_OF_CLUBS: Card = Card::new(Rank::Two, Suit::Clubs);

    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub const fn is_spade(self) -> bool {
        self.suit.is_spade()
    }

    pub fn is_two_of_clubs(self) -> bool {
        self == Self::TWO_OF_CLUBS
    }

    /// Long form used in announcements, e.g. "queen of spades".
    pub fn describe(self) -> String {
        format!("{} of {}", self.rank.name(), self.suit.name())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardParseError {
    #[error("card text is empty")]
    Empty,
    #[error("unknown suit in card '{0}'")]
    Suit(String),
    #[error("unknown rank in card '{0}'")]
    Rank(String),
}

impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let Some(symbol) = text.chars().last() else {
            return Err(CardParseError::Empty);
        };
        let suit = Suit::from_symbol(symbol).ok_or_else(|| CardParseError::Suit(text.to_string()))?;
        let rank_text = &text[..text.len() - symbol.len_utf8()];
        let rank =
            Rank::from_symbol(rank_text).ok_or_else(|| CardParseError::Rank(text.to_string()))?;
        Ok(Card::new(rank, suit))
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}
