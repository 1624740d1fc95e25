use crate::model::card::Card;
use crate::model::player::Seat;
use crate::model::suit::Suit;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trick {
    leader: Seat,
    plays: Vec<Play>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Play {
    pub seat: Seat,
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrickError {
    #[error("trick already complete")]
    TrickComplete,
    #[error("expected {expected} to play next but got {actual}")]
    OutOfTurn { expected: Seat, actual: Seat },
    #[error("{0} has already played this trick")]
    AlreadyPlayed(Seat),
}

impl Trick {
    pub fn new(leader: Seat) -> Self {
        Self {
            leader,
            plays: Vec::with_capacity(Seat::COUNT),
        }
    }

    pub fn leader(&self) -> Seat {
        self.leader
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == Seat::COUNT
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.plays.first().map(|play| play.card.suit)
    }

    /// Seat due to play next; `None` once all four cards are down.
    pub fn next_seat(&self) -> Option<Seat> {
        if self.is_complete() {
            return None;
        }
        Some(
            self.plays
                .last()
                .map(|play| play.seat.next())
                .unwrap_or(self.leader),
        )
    }

    pub fn play(&mut self, seat: Seat, card: Card) -> Result<(), TrickError> {
        let Some(expected) = self.next_seat() else {
            return Err(TrickError::TrickComplete);
        };

        if self.plays.iter().any(|play| play.seat == seat) {
            return Err(TrickError::AlreadyPlayed(seat));
        }

        if expected != seat {
            return Err(TrickError::OutOfTurn {
                expected,
                actual: seat,
            });
        }

        self.plays.push(Play { seat, card });
        Ok(())
    }

    /// Winning play of a complete trick. Spades trump any other lead;
    /// otherwise the highest card of the led suit wins.
    pub fn winning_play(&self) -> Option<Play> {
        if !self.is_complete() {
            return None;
        }
        let lead_suit = self.lead_suit()?;
        let trumped = lead_suit != Suit::Spades && self.plays.iter().any(|p| p.card.is_spade());
        let deciding = if trumped { Suit::Spades } else { lead_suit };
        self.plays
            .iter()
            .filter(|play| play.card.suit == deciding)
            .max_by_key(|play| play.card.rank)
            .copied()
    }

    pub fn winner(&self) -> Option<Seat> {
        self.winning_play().map(|play| play.seat)
    }
}
