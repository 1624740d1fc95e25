use crate::model::player::Seat;
use crate::model::team::Team;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TARGET_SCORE: i32 = 500;
pub const DEFAULT_BAG_LIMIT: u32 = 10;
pub const DEFAULT_BAG_PENALTY: i32 = 100;

/// How to pick a winner when both teams reach the target in the same round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    #[default]
    TeamA,
    HigherScore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    pub target_score: i32,
    pub bag_limit: u32,
    pub bag_penalty: i32,
    pub tie_break: TieBreak,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            target_score: DEFAULT_TARGET_SCORE,
            bag_limit: DEFAULT_BAG_LIMIT,
            bag_penalty: DEFAULT_BAG_PENALTY,
            tie_break: TieBreak::TeamA,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TeamScore {
    pub score: i32,
    pub bags: u32,
}

/// One team's line in a round's scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TeamRoundResult {
    pub team: Team,
    pub bid: u32,
    pub tricks: u32,
    pub points: i32,
    pub bags_added: u32,
    pub bag_penalties: u32,
}

impl TeamRoundResult {
    pub fn made_contract(&self) -> bool {
        self.tricks >= self.bid
    }
}

/// Points and overtricks for a team contract. Made contracts score ten per
/// bid trick plus one per bag; a set contract loses ten per bid trick.
pub fn contract_points(bid: u32, tricks: u32) -> (i32, u32) {
    let bid_points = (bid as i32) * 10;
    if tricks >= bid {
        let bags = tricks - bid;
        (bid_points + bags as i32, bags)
    } else {
        (-bid_points, 0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreBoard {
    teams: [TeamScore; 2],
}

impl ScoreBoard {
    pub const fn new() -> Self {
        Self {
            teams: [TeamScore { score: 0, bags: 0 }; 2],
        }
    }

    pub fn team(&self, team: Team) -> TeamScore {
        self.teams[team.index()]
    }

    pub fn score(&self, team: Team) -> i32 {
        self.teams[team.index()].score
    }

    pub fn bags(&self, team: Team) -> u32 {
        self.teams[team.index()].bags
    }

    pub fn set_team(&mut self, team: Team, value: TeamScore) {
        self.teams[team.index()] = value;
    }

    pub fn standings(&self) -> [TeamScore; 2] {
        self.teams
    }

    /// Folds one round into the running totals. `bids` and `tricks` are
    /// indexed by seat.
    pub fn apply_round(
        &mut self,
        bids: [u8; 4],
        tricks: [u8; 4],
        rules: &ScoringRules,
    ) -> [TeamRoundResult; 2] {
        Team::ALL.map(|team| {
            let sum = |values: &[u8; 4]| -> u32 {
                team.members()
                    .iter()
                    .map(|seat: &Seat| u32::from(values[seat.index()]))
                    .sum()
            };
            let bid = sum(&bids);
            let taken = sum(&tricks);
            let (points, bags_added) = contract_points(bid, taken);

            let entry = &mut self.teams[team.index()];
            entry.score += points;
            entry.bags += bags_added;

            let mut bag_penalties = 0;
            while rules.bag_limit > 0 && entry.bags >= rules.bag_limit {
                entry.score -= rules.bag_penalty;
                entry.bags -= rules.bag_limit;
                bag_penalties += 1;
            }

            TeamRoundResult {
                team,
                bid,
                tricks: taken,
                points,
                bags_added,
                bag_penalties,
            }
        })
    }

    pub fn winner(&self, rules: &ScoringRules) -> Option<Team> {
        let a = self.score(Team::A);
        let b = self.score(Team::B);
        match (a >= rules.target_score, b >= rules.target_score) {
            (true, true) => match rules.tie_break {
                TieBreak::TeamA => Some(Team::A),
                TieBreak::HigherScore if b > a => Some(Team::B),
                TieBreak::HigherScore => Some(Team::A),
            },
            (true, false) => Some(Team::A),
            (false, true) => Some(Team::B),
            (false, false) => None,
        }
    }
}
