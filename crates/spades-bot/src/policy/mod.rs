mod simple;

pub use simple::{LowestLegalPlayer, RandomLegalPlayer};

use spades_core::model::card::Card;
use spades_core::model::player::Seat;
use spades_core::model::round::RoundState;
use spades_core::model::score::ScoreBoard;

/// Context provided to policies for decision-making
pub struct PolicyContext<'a> {
    pub seat: Seat,
    pub round: &'a RoundState,
    pub scores: &'a ScoreBoard,
    pub legal: &'a [Card],
}

/// Chooses the card a seat plays. Implementations must return one of
/// `ctx.legal`, or `None` when it is empty.
pub trait PlayPolicy: Send {
    fn choose_play(&mut self, ctx: &PolicyContext) -> Option<Card>;
}
