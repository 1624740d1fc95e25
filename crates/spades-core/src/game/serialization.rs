use super::match_state::MatchState;
use crate::model::bid::Bid;
use crate::model::hand::Hand;
use crate::model::player::Seat;
use crate::model::round::{RoundPhase, TrickState};
use crate::model::score::TeamScore;
use crate::model::team::Team;
use crate::model::trick::Play;
use serde::Serialize;

/// Read-only view of a game for renderers and logs.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GameSnapshot {
    pub seed: u64,
    pub round_number: u32,
    pub phase: RoundPhase,
    pub trick_state: TrickState,
    pub round_starting_player: Seat,
    pub current_player: Option<Seat>,
    pub spades_broken: bool,
    pub hands: [Hand; 4],
    pub bids: [Option<Bid>; 4],
    pub tricks_won: [u8; 4],
    pub current_trick: Vec<Play>,
    pub scores: [TeamScore; 2],
    pub winner: Option<Team>,
}

impl GameSnapshot {
    pub fn capture(state: &MatchState) -> Self {
        let round = state.round();
        GameSnapshot {
            seed: state.seed(),
            round_number: state.round_number(),
            phase: round.phase(),
            trick_state: round.trick_state(),
            round_starting_player: round.starting_player(),
            current_player: state.current_player(),
            spades_broken: round.spades_broken(),
            hands: round.hands().clone(),
            bids: round.bidding().bids(),
            tricks_won: round.tricks_won_by_seat(),
            current_trick: round.current_trick().plays().to_vec(),
            scores: state.scores().standings(),
            winner: state.winner(),
        }
    }

    pub fn to_json(state: &MatchState) -> serde_json::Result<String> {
        let snapshot = Self::capture(state);
        serde_json::to_string_pretty(&snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::GameSnapshot;
    use crate::game::config::GameConfig;
    use crate::game::match_state::MatchState;
    use crate::model::round::{RoundPhase, TrickState};
    use serde_json::Value;

    #[test]
    fn capture_reflects_a_fresh_game() {
        let state = MatchState::with_seed(GameConfig::default(), 17);
        let snapshot = GameSnapshot::capture(&state);
        assert_eq!(snapshot.seed, 17);
        assert_eq!(snapshot.round_number, 1);
        assert_eq!(snapshot.phase, RoundPhase::Bidding);
        assert_eq!(snapshot.trick_state, TrickState::AwaitingFirstLead);
        assert_eq!(snapshot.current_player, Some(snapshot.round_starting_player));
        assert!(snapshot.bids.iter().all(Option::is_none));
        assert!(snapshot.hands.iter().all(|hand| hand.len() == 13));
        assert_eq!(snapshot.winner, None);
    }

    #[test]
    fn json_uses_card_strings_and_seat_numbers() {
        let state = MatchState::with_seed(GameConfig::default(), 17);
        let json = GameSnapshot::to_json(&state).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["round_number"], 1);
        assert_eq!(value["phase"], "bidding");
        assert!(value["round_starting_player"].is_u64());
        let first_card = &value["hands"][0][0];
        assert!(first_card.as_str().is_some_and(|text| text.len() >= 2));
        assert_eq!(value["scores"][0]["score"], 0);
    }
}
