use crate::model::bid::Bid;
use crate::model::card::Card;
use crate::model::player::Seat;
use crate::model::round::TrickResult;
use crate::model::score::{TeamRoundResult, TeamScore};
use crate::model::team::Team;
use serde::Serialize;

/// Everything a presentation layer needs to re-render after an input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    RoundStarted {
        round: u32,
        starting_player: Seat,
    },
    BidPlaced {
        seat: Seat,
        bid: Bid,
    },
    BidRejected {
        seat: Seat,
        value: i32,
        reason: String,
    },
    BiddingComplete {
        bids: [Bid; 4],
    },
    CardPlayed {
        seat: Seat,
        card: Card,
    },
    SpadesBroken {
        seat: Seat,
    },
    /// Fourth card is down; the winner is not settled yet.
    TrickCompleted {
        cards: [Card; 4],
    },
    TrickResolved(TrickResult),
    RoundScored(RoundSummary),
    GameOver {
        winner: Team,
        scores: [TeamScore; 2],
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundSummary {
    pub round: u32,
    pub bids: [u8; 4],
    pub tricks_won: [u8; 4],
    pub teams: [TeamRoundResult; 2],
    pub standings: [TeamScore; 2],
}

impl GameEvent {
    /// Short human-readable line, the text a UI would announce.
    pub fn headline(&self) -> String {
        match self {
            GameEvent::RoundStarted {
                round,
                starting_player,
            } => format!("Round {round} begins; {starting_player} leads"),
            GameEvent::BidPlaced { seat, bid } => format!("{seat} bids {bid}"),
            GameEvent::BidRejected { seat, value, reason } => {
                format!("{seat} bid {value} rejected: {reason}")
            }
            GameEvent::BiddingComplete { bids } => {
                let total: u32 = bids.iter().map(|b| u32::from(b.value())).sum();
                format!("Bidding complete ({total} tricks bid)")
            }
            GameEvent::CardPlayed { seat, card } => format!("{seat} plays {}", card.describe()),
            GameEvent::SpadesBroken { seat } => format!("{seat} broke spades"),
            GameEvent::TrickCompleted { .. } => "Trick complete".to_string(),
            GameEvent::TrickResolved(result) => format!(
                "{} wins the trick with the {}!",
                result.winner,
                result.winning_card.describe()
            ),
            GameEvent::RoundScored(summary) => format!(
                "Round {} scored: Team A {} ({} bags), Team B {} ({} bags)",
                summary.round,
                summary.standings[0].score,
                summary.standings[0].bags,
                summary.standings[1].score,
                summary.standings[1].bags
            ),
            GameEvent::GameOver { winner, .. } => format!("Game Over! {winner} wins!"),
        }
    }
}
