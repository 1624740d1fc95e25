use crate::game::events::GameEvent;
use crate::model::bid::Bid;
use crate::model::hand::Hand;
use crate::model::player::Seat;
use crate::model::score::TeamScore;

/// What a bid source sees when asked for a seat's bid.
#[derive(Debug, Clone)]
pub struct BidRequest {
    pub seat: Seat,
    pub round: u32,
    pub hand: Hand,
    pub bids: [Option<Bid>; 4],
    pub standings: [TeamScore; 2],
    /// Invalid answers already given for this seat in this request cycle.
    pub attempt: u32,
}

/// Supplies bids for seats: a human prompt, a strategy, a script.
pub trait BidSource {
    fn request_bid(&mut self, request: &BidRequest) -> i32;
}

impl<F> BidSource for F
where
    F: FnMut(&BidRequest) -> i32,
{
    fn request_bid(&mut self, request: &BidRequest) -> i32 {
        self(request)
    }
}

/// Receives engine events; the engine never renders anything itself.
pub trait GameObserver {
    fn notify(&mut self, event: &GameEvent);
}

impl GameObserver for Vec<GameEvent> {
    fn notify(&mut self, event: &GameEvent) {
        self.push(event.clone());
    }
}
