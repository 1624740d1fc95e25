use crate::model::team::Team;
use core::fmt;
use serde::Serialize;

/// One of the four fixed seats, numbered 0..=3 in turn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Seat(u8);

impl Seat {
    pub const COUNT: usize = 4;

    pub const LOOP: [Seat; 4] = [Seat(0), Seat(1), Seat(2), Seat(3)];

    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::COUNT {
            Some(Seat(index as u8))
        } else {
            None
        }
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn next(self) -> Seat {
        Seat((self.0 + 1) % 4)
    }

    pub const fn previous(self) -> Seat {
        Seat((self.0 + 3) % 4)
    }

    pub const fn team(self) -> Team {
        match self.0 {
            0 | 3 => Team::A,
            _ => Team::B,
        }
    }

    pub const fn partner(self) -> Seat {
        Seat(3 - self.0)
    }

    /// Seats in turn order beginning with `self`.
    pub fn rotation(self) -> [Seat; 4] {
        let mut seats = [self; 4];
        for i in 1..4 {
            seats[i] = seats[i - 1].next();
        }
        seats
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}
