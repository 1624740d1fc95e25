use crate::model::player::Seat;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Partnerships: A holds seats 0 and 3, B holds seats 1 and 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    A,
    B,
}

impl Team {
    pub const ALL: [Team; 2] = [Team::A, Team::B];

    pub const fn index(self) -> usize {
        match self {
            Team::A => 0,
            Team::B => 1,
        }
    }

    pub fn members(self) -> [Seat; 2] {
        match self {
            Team::A => [Seat::LOOP[0], Seat::LOOP[3]],
            Team::B => [Seat::LOOP[1], Seat::LOOP[2]],
        }
    }

    pub const fn opponent(self) -> Team {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::A => f.write_str("Team A"),
            Team::B => f.write_str("Team B"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Team;

    #[test]
    fn members_report_their_team() {
        for team in Team::ALL {
            for seat in team.members() {
                assert_eq!(seat.team(), team);
            }
        }
    }

    #[test]
    fn opponent_flips() {
        assert_eq!(Team::A.opponent(), Team::B);
        assert_eq!(Team::B.opponent().index(), 0);
    }
}
