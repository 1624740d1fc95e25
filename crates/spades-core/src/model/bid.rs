use crate::model::player::Seat;
use core::fmt;
use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;

pub const MAX_BID: u8 = 13;

/// Tricks a seat commits to for the round, always within `0..=13`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Bid(u8);

impl Bid {
    pub fn new(value: i32) -> Result<Self, BidError> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= MAX_BID)
            .map(Bid)
            .ok_or(BidError::OutOfRange { value })
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Bid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Bid {
    type Err = BidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<i32>()
            .map_err(|_| BidError::NotANumber(s.trim().to_string()))?;
        Bid::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BidError {
    #[error("bid {value} is out of range (0..={max})", max = MAX_BID)]
    OutOfRange { value: i32 },
    #[error("bid '{0}' is not a whole number")]
    NotANumber(String),
    #[error("not this seat's turn to bid: expected {expected}, got {actual}")]
    OutOfTurn { expected: Seat, actual: Seat },
    #[error("bids are not being taken right now")]
    NotInBiddingPhase,
}
